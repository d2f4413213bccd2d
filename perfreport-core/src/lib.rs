//! Per-endpoint latency statistics for load-test runs.
//!
//! Samples for one endpoint are collected into a [`SampleSet`]; a
//! [`StatisticsView`] computes averages, percentiles and error rates over it,
//! and a [`Diff`] compares those figures with a previous run.

pub mod diff;
pub mod report;
pub mod sample_set;
pub mod stats;
pub mod uri_report;

pub use diff::Diff;
pub use report::PerformanceReport;
pub use sample_set::SampleSet;
pub use stats::{percentile, PercentileValue, StatisticsSummary, StatisticsView};
pub use uri_report::UriReport;
