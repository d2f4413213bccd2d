use std::cell::OnceCell;

use perfreport_common::{PerfReportError, Result, Sample};
use tracing::warn;

/// Append-only collection of the samples recorded for one endpoint.
///
/// Count, error count and duration sum are maintained as samples arrive;
/// the latency-sorted durations are built on first use and dropped again
/// whenever a new sample is appended.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    samples: Vec<Sample>,
    error_count: usize,
    duration_sum: i128,
    sorted_durations: OnceCell<Vec<i64>>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sample`. Rejects negative durations and leaves the set untouched.
    pub fn add(&mut self, sample: Sample) -> Result<()> {
        if sample.duration < 0 {
            warn!(duration = sample.duration, "rejecting sample with negative duration");
            return Err(PerfReportError::InvalidSample(sample.duration));
        }

        if sample.is_error() {
            self.error_count += 1;
        }
        self.duration_sum += i128::from(sample.duration);
        self.samples.push(sample);
        self.sorted_durations.take();
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn has_samples(&self) -> bool {
        !self.is_empty()
    }

    /// Number of samples flagged unsuccessful or carrying a logged error.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Widened so that summing any number of `i64` durations cannot overflow.
    pub fn duration_sum(&self) -> i128 {
        self.duration_sum
    }

    /// Samples in insertion order, or in sorted order after [`SampleSet::sort`].
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Stable sort by duration, then timestamp.
    pub fn sort(&mut self) {
        // Reordering does not change the duration multiset, so the latency
        // cache stays valid.
        self.samples.sort();
    }

    /// All durations in ascending order.
    pub fn sorted_by_latency(&self) -> &[i64] {
        self.sorted_durations.get_or_init(|| {
            let mut durations: Vec<i64> = self.samples.iter().map(|s| s.duration).collect();
            durations.sort_unstable();
            durations
        })
    }
}
