use serde::{Deserialize, Serialize};

use crate::diff::Diff;
use crate::sample_set::SampleSet;

/// Return the duration at index `floor(n * p / 100) - 1`, clamped to the
/// bounds of `sorted`. Returns 0 for an empty slice.
///
/// This is deliberately not nearest-rank: for `[0, 5, 10]` the 50th
/// percentile is `0` and the 90th is `5`. Reports compared across runs rely
/// on this exact index.
pub fn percentile(sorted: &[i64], p: f64) -> i64 {
    if sorted.is_empty() {
        return 0;
    }
    let n = sorted.len();
    let idx = (n as f64 * p / 100.0).floor() as i64 - 1;
    sorted[idx.clamp(0, n as i64 - 1) as usize]
}

/// One configured percentile threshold and the duration it resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value: i64,
}

/// Owned snapshot of every statistic of a [`StatisticsView`].
///
/// This is the form in which a previous run is kept around for diffing.
/// `Default` is the all-zero baseline of an empty run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub samples_count: usize,
    pub error_count: usize,
    pub average: i64,
    pub min: i64,
    pub max: i64,
    pub median: i64,
    pub error_percent: f64,
    pub failed: bool,
    #[serde(default)]
    pub percentiles: Vec<PercentileValue>,
}

/// Read-only statistics computed over the current contents of a [`SampleSet`].
#[derive(Debug, Clone, Copy)]
pub struct StatisticsView<'a> {
    samples: &'a SampleSet,
    percentiles: &'a [f64],
    build_failed: bool,
}

impl<'a> StatisticsView<'a> {
    pub fn new(samples: &'a SampleSet, percentiles: &'a [f64]) -> Self {
        Self { samples, percentiles, build_failed: false }
    }

    /// OR an externally decided build failure into [`StatisticsView::is_failed`].
    pub fn with_build_failed(mut self, build_failed: bool) -> Self {
        self.build_failed = build_failed;
        self
    }

    pub fn size(&self) -> usize {
        self.samples.size()
    }

    pub fn error_count(&self) -> usize {
        self.samples.error_count()
    }

    /// Truncated mean duration, 0 when empty.
    pub fn average(&self) -> i64 {
        match self.samples.size() {
            0 => 0,
            // the mean never exceeds the largest duration, so it fits in i64
            n => (self.samples.duration_sum() / n as i128) as i64,
        }
    }

    pub fn min(&self) -> i64 {
        self.samples.sorted_by_latency().first().copied().unwrap_or(0)
    }

    pub fn max(&self) -> i64 {
        self.samples.sorted_by_latency().last().copied().unwrap_or(0)
    }

    pub fn percentile(&self, p: f64) -> i64 {
        percentile(self.samples.sorted_by_latency(), p)
    }

    pub fn median(&self) -> i64 {
        self.percentile(50.0)
    }

    pub fn line_90(&self) -> i64 {
        self.percentile(90.0)
    }

    pub fn line_95(&self) -> i64 {
        self.percentile(95.0)
    }

    /// Every configured threshold, in configuration order.
    pub fn percentiles(&self) -> Vec<PercentileValue> {
        let sorted = self.samples.sorted_by_latency();
        self.percentiles
            .iter()
            .map(|&p| PercentileValue { percentile: p, value: percentile(sorted, p) })
            .collect()
    }

    pub fn error_percent(&self) -> f64 {
        match self.samples.size() {
            0 => 0.0,
            n => 100.0 * self.samples.error_count() as f64 / n as f64,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.build_failed || self.samples.error_count() > 0
    }

    pub fn summary(&self) -> StatisticsSummary {
        StatisticsSummary {
            samples_count: self.size(),
            error_count: self.error_count(),
            average: self.average(),
            min: self.min(),
            max: self.max(),
            median: self.median(),
            error_percent: self.error_percent(),
            failed: self.is_failed(),
            percentiles: self.percentiles(),
        }
    }

    /// Deltas against `previous`; an absent previous view counts as empty.
    pub fn diff(&self, previous: Option<&StatisticsView<'_>>) -> Diff {
        let previous = previous.map(|view| view.summary());
        Diff::between(&self.summary(), previous.as_ref())
    }
}
