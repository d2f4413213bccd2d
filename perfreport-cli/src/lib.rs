use std::path::Path;

use perfreport_common::{PerfReportError, Result, Sample};
use perfreport_core::PerformanceReport;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One line of a run file: a sample tagged with the endpoint it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub uri: String,
    #[serde(flatten)]
    pub sample: Sample,
}

/// Parse a JSON array of [`RunRecord`]s.
pub fn parse_run(json: &str) -> Result<Vec<RunRecord>> {
    serde_json::from_str(json).map_err(|e| PerfReportError::InvalidRunFile(e.to_string()))
}

/// Group `records` into a report, in file order. Stops at the first invalid sample.
pub fn build_report(records: Vec<RunRecord>, percentiles: &[f64]) -> Result<PerformanceReport> {
    let mut report = PerformanceReport::new(percentiles.to_vec());
    for record in records {
        report.add_sample(&record.uri, record.sample)?;
    }
    Ok(report)
}

/// Read and aggregate the run file at `path`.
pub fn load_run(path: &Path, percentiles: &[f64]) -> Result<PerformanceReport> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| PerfReportError::InvalidRunFile(format!("{}: {e}", path.display())))?;
    let report = build_report(parse_run(&json)?, percentiles)?;
    info!(
        path = %path.display(),
        endpoints = report.size(),
        samples = report.samples_count(),
        "loaded run"
    );
    Ok(report)
}

/// Endpoints whose error percentage is strictly above `max_error_percent`.
pub fn endpoints_over_threshold(report: &PerformanceReport, max_error_percent: f64) -> Vec<&str> {
    report
        .uri_reports()
        .filter(|r| r.error_percent() > max_error_percent)
        .map(|r| r.uri())
        .collect()
}

/// Render a delta with an explicit sign, e.g. `+3` or `-4`.
pub fn signed(delta: i64) -> String {
    format!("{delta:+}")
}
