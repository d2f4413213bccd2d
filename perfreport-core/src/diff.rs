use serde::{Deserialize, Serialize};

use crate::stats::StatisticsSummary;

/// Signed change between a run and its predecessor.
///
/// `samples_count_diff` is previous minus current ("how many fewer samples
/// than before"); the other three are current minus previous.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Diff {
    pub average_diff: i64,
    pub median_diff: i64,
    pub error_percent_diff: f64,
    pub samples_count_diff: i64,
}

impl Diff {
    pub fn between(current: &StatisticsSummary, previous: Option<&StatisticsSummary>) -> Self {
        let baseline = StatisticsSummary::default();
        let previous = previous.unwrap_or(&baseline);

        Self {
            average_diff: current.average - previous.average,
            median_diff: current.median - previous.median,
            error_percent_diff: current.error_percent - previous.error_percent,
            samples_count_diff: previous.samples_count as i64 - current.samples_count as i64,
        }
    }
}
