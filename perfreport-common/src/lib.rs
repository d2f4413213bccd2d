use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Percentile thresholds reported when no explicit configuration is given.
pub const DEFAULT_PERCENTILES: &[f64] = &[0.0, 50.0, 90.0, 100.0];

/// Error types for PerfReport operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerfReportError {
    #[error("Sample duration must be non-negative, got {0}")]
    InvalidSample(i64),

    #[error("Invalid percentile: {0}")]
    InvalidPercentile(String),

    #[error("Invalid run file: {0}")]
    InvalidRunFile(String),
}

/// Result type for PerfReport operations
pub type Result<T> = std::result::Result<T, PerfReportError>;

/// One measured request against a single endpoint.
///
/// Samples order by duration first, then by timestamp (an absent timestamp
/// ranks below any present one). The remaining fields only break ties so
/// that `Ord` agrees with `Eq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub duration: i64,
    #[serde(default)]
    pub response_code: String,
    pub successful: bool,
    /// Set when the load tool logged an error even though the request may
    /// have been reported as successful.
    #[serde(default)]
    pub error_obtained: bool,
}

impl Sample {
    pub fn new(
        timestamp: Option<DateTime<Utc>>,
        duration: i64,
        response_code: impl Into<String>,
        successful: bool,
        error_obtained: bool,
    ) -> Self {
        Self {
            timestamp,
            duration,
            response_code: response_code.into(),
            successful,
            error_obtained,
        }
    }

    /// Either flag marks the sample as an error; they are never counted twice.
    pub fn is_error(&self) -> bool {
        !self.successful || self.error_obtained
    }
}

impl Ord for Sample {
    fn cmp(&self, other: &Self) -> Ordering {
        // Option<T> already ranks None below Some(_), so absent timestamps
        // need no special casing.
        self.duration
            .cmp(&other.duration)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
            .then_with(|| self.response_code.cmp(&other.response_code))
            .then_with(|| self.successful.cmp(&other.successful))
            .then_with(|| self.error_obtained.cmp(&other.error_obtained))
    }
}

impl PartialOrd for Sample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parse a comma-separated percentile list such as `"0,50,90,100"`.
///
/// Entries are trimmed and must lie in `[0, 100]`. An empty or blank string
/// yields [`DEFAULT_PERCENTILES`].
pub fn parse_percentiles(config: &str) -> Result<Vec<f64>> {
    if config.trim().is_empty() {
        return Ok(DEFAULT_PERCENTILES.to_vec());
    }

    config
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            let value: f64 = entry
                .parse()
                .map_err(|_| PerfReportError::InvalidPercentile(entry.to_string()))?;
            if !(0.0..=100.0).contains(&value) {
                return Err(PerfReportError::InvalidPercentile(entry.to_string()));
            }
            Ok(value)
        })
        .collect()
}
