use perfreport_common::{Result, Sample};
use tracing::debug;

use crate::diff::Diff;
use crate::sample_set::SampleSet;
use crate::stats::{PercentileValue, StatisticsSummary, StatisticsView};

/// Samples and statistics for one endpoint within a run.
#[derive(Debug, Clone)]
pub struct UriReport {
    uri: String,
    percentiles: Vec<f64>,
    samples: SampleSet,
    build_failed: bool,
    last_build: Option<StatisticsSummary>,
}

impl UriReport {
    pub fn new(uri: impl Into<String>, percentiles: Vec<f64>) -> Self {
        Self {
            uri: uri.into(),
            percentiles,
            samples: SampleSet::new(),
            build_failed: false,
            last_build: None,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn add_sample(&mut self, sample: Sample) -> Result<()> {
        self.samples.add(sample)
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Sort the raw samples by duration, then timestamp.
    pub fn sort_samples(&mut self) {
        self.samples.sort();
    }

    /// Mark the build as failed by criteria decided outside this report.
    pub fn set_build_failed(&mut self, build_failed: bool) {
        self.build_failed = build_failed;
    }

    pub fn view(&self) -> StatisticsView<'_> {
        StatisticsView::new(&self.samples, &self.percentiles).with_build_failed(self.build_failed)
    }

    pub fn summary(&self) -> StatisticsSummary {
        self.view().summary()
    }

    pub fn add_last_build_report(&mut self, last: &UriReport) {
        self.set_last_build(last.summary());
    }

    pub fn set_last_build(&mut self, summary: StatisticsSummary) {
        debug!(
            uri = %self.uri,
            previous_samples = summary.samples_count,
            "attached last build baseline"
        );
        self.last_build = Some(summary);
    }

    pub fn last_build(&self) -> Option<&StatisticsSummary> {
        self.last_build.as_ref()
    }

    /// Deltas against the attached last build, or against zero when none is set.
    pub fn diff(&self) -> Diff {
        Diff::between(&self.summary(), self.last_build.as_ref())
    }

    pub fn has_samples(&self) -> bool {
        self.samples.has_samples()
    }

    pub fn samples_count(&self) -> usize {
        self.samples.size()
    }

    pub fn count_errors(&self) -> usize {
        self.samples.error_count()
    }

    pub fn error_percent(&self) -> f64 {
        self.view().error_percent()
    }

    pub fn is_failed(&self) -> bool {
        self.view().is_failed()
    }

    pub fn average(&self) -> i64 {
        self.view().average()
    }

    pub fn min(&self) -> i64 {
        self.view().min()
    }

    pub fn max(&self) -> i64 {
        self.view().max()
    }

    pub fn median(&self) -> i64 {
        self.view().median()
    }

    pub fn line_90(&self) -> i64 {
        self.view().line_90()
    }

    pub fn line_95(&self) -> i64 {
        self.view().line_95()
    }

    pub fn percentile_values(&self) -> Vec<PercentileValue> {
        self.view().percentiles()
    }

    pub fn average_diff(&self) -> i64 {
        self.diff().average_diff
    }

    pub fn median_diff(&self) -> i64 {
        self.diff().median_diff
    }

    pub fn error_percent_diff(&self) -> f64 {
        self.diff().error_percent_diff
    }

    pub fn samples_count_diff(&self) -> i64 {
        self.diff().samples_count_diff
    }
}
