use std::collections::BTreeMap;

use perfreport_common::{parse_percentiles, Result, Sample, DEFAULT_PERCENTILES};
use tracing::debug;

use crate::uri_report::UriReport;

/// All endpoint reports of one run, keyed by uri.
///
/// Endpoints are independent; nothing here relates one endpoint's samples to
/// another's beyond the run-wide totals.
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    percentiles: Vec<f64>,
    uri_reports: BTreeMap<String, UriReport>,
    build_failed: bool,
}

impl Default for PerformanceReport {
    fn default() -> Self {
        Self::new(DEFAULT_PERCENTILES.to_vec())
    }
}

impl PerformanceReport {
    pub fn new(percentiles: Vec<f64>) -> Self {
        Self { percentiles, uri_reports: BTreeMap::new(), build_failed: false }
    }

    /// Build an empty report from a comma-separated percentile list.
    pub fn with_percentile_config(config: &str) -> Result<Self> {
        Ok(Self::new(parse_percentiles(config)?))
    }

    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    /// Route `sample` to the report for `uri`, creating it on first use.
    /// A rejected sample never creates an empty endpoint.
    pub fn add_sample(&mut self, uri: &str, sample: Sample) -> Result<()> {
        if let Some(report) = self.uri_reports.get_mut(uri) {
            return report.add_sample(sample);
        }

        let mut report = UriReport::new(uri, self.percentiles.clone());
        report.set_build_failed(self.build_failed);
        report.add_sample(sample)?;
        debug!(uri, "created endpoint report");
        self.uri_reports.insert(uri.to_string(), report);
        Ok(())
    }

    pub fn uri_report(&self, uri: &str) -> Option<&UriReport> {
        self.uri_reports.get(uri)
    }

    pub fn uri_report_mut(&mut self, uri: &str) -> Option<&mut UriReport> {
        self.uri_reports.get_mut(uri)
    }

    /// Endpoint reports ordered by uri.
    pub fn uri_reports(&self) -> impl Iterator<Item = &UriReport> {
        self.uri_reports.values()
    }

    /// Number of endpoints.
    pub fn size(&self) -> usize {
        self.uri_reports.len()
    }

    /// Mark the whole run, including endpoints that have not been seen yet.
    pub fn set_build_failed(&mut self, build_failed: bool) {
        self.build_failed = build_failed;
        for report in self.uri_reports.values_mut() {
            report.set_build_failed(build_failed);
        }
    }

    /// Attach each endpoint's summary from `previous` as its diff baseline.
    /// Endpoints the previous run never saw keep the zero baseline.
    pub fn set_last_build(&mut self, previous: &PerformanceReport) {
        for (uri, report) in self.uri_reports.iter_mut() {
            if let Some(last) = previous.uri_reports.get(uri) {
                report.add_last_build_report(last);
            }
        }
    }

    pub fn samples_count(&self) -> usize {
        self.uri_reports.values().map(UriReport::samples_count).sum()
    }

    pub fn count_errors(&self) -> usize {
        self.uri_reports.values().map(UriReport::count_errors).sum()
    }

    pub fn error_percent(&self) -> f64 {
        match self.samples_count() {
            0 => 0.0,
            n => 100.0 * self.count_errors() as f64 / n as f64,
        }
    }

    /// Truncated mean over every sample of every endpoint.
    pub fn average(&self) -> i64 {
        let total: i128 = self.uri_reports.values().map(|r| r.samples().duration_sum()).sum();
        match self.samples_count() {
            0 => 0,
            n => (total / n as i128) as i64,
        }
    }
}
