//! Per-request outcomes and the result of one probe run

use crate::types::RequestStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Status code counted as a clean response
pub const SUCCESS_STATUS: u16 = 200;

/// Outcome of a single request attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// Response received with status 200
    Success { latency_ms: f64 },
    /// Response received with a non-200 status; still a latency sample
    HttpError { status: u16, latency_ms: f64 },
    /// No response received (timeout, refused, DNS failure, ...)
    TransportError { reason: String },
}

impl ProbeOutcome {
    /// Classify a received response
    pub fn from_response(status: u16, elapsed: Duration) -> Self {
        let latency_ms = elapsed.as_secs_f64() * 1000.0;
        if status == SUCCESS_STATUS {
            Self::Success { latency_ms }
        } else {
            Self::HttpError { status, latency_ms }
        }
    }

    /// Build a transport failure outcome
    pub fn transport<S: Into<String>>(reason: S) -> Self {
        Self::TransportError { reason: reason.into() }
    }

    /// Latency sample carried by this outcome, if a response was received
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency_ms } | Self::HttpError { latency_ms, .. } => Some(*latency_ms),
            Self::TransportError { .. } => None,
        }
    }

    /// Whether this outcome increments the error count
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Success { .. })
    }

    /// Coarse classification
    pub fn status(&self) -> RequestStatus {
        match self {
            Self::Success { .. } => RequestStatus::Success,
            Self::HttpError { .. } => RequestStatus::HttpError,
            Self::TransportError { .. } => RequestStatus::TransportError,
        }
    }

    /// HTTP status if a response was received
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Success { .. } => Some(SUCCESS_STATUS),
            Self::HttpError { status, .. } => Some(*status),
            Self::TransportError { .. } => None,
        }
    }
}

/// Latency samples and error count produced by one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Latency of every received response in request order (milliseconds)
    pub latencies: Vec<f64>,

    /// Transport failures plus non-200 responses
    pub errors: u64,

    /// Loop iterations performed
    pub attempts: u64,

    /// Wall time of the whole run
    pub elapsed: Duration,

    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl RunResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self {
            latencies: Vec::new(),
            errors: 0,
            attempts: 0,
            elapsed: Duration::ZERO,
            started_at: Utc::now(),
        }
    }

    /// Fold one attempt into the result
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.attempts += 1;
        if let Some(latency_ms) = outcome.latency_ms() {
            self.latencies.push(latency_ms);
        }
        if outcome.is_error() {
            self.errors += 1;
        }
    }

    /// Whether any response was received
    pub fn is_empty(&self) -> bool {
        self.latencies.is_empty()
    }

    /// Attempts that never produced a response
    pub fn transport_failures(&self) -> u64 {
        self.attempts - self.latencies.len() as u64
    }

    /// Achieved request rate over the run
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for RunResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_classification() {
        let ok = ProbeOutcome::from_response(200, Duration::from_millis(12));
        assert_eq!(ok, ProbeOutcome::Success { latency_ms: 12.0 });
        assert!(!ok.is_error());
        assert_eq!(ok.http_status(), Some(200));

        let not_found = ProbeOutcome::from_response(404, Duration::from_millis(3));
        assert_eq!(not_found.latency_ms(), Some(3.0));
        assert!(not_found.is_error());
        assert_eq!(not_found.status(), RequestStatus::HttpError);

        let failed = ProbeOutcome::transport("connection refused");
        assert_eq!(failed.latency_ms(), None);
        assert!(failed.is_error());
        assert_eq!(failed.http_status(), None);
    }

    #[test]
    fn test_redirect_status_is_counted_as_error() {
        // Only 200 is clean; 204 and 3xx still count
        assert!(ProbeOutcome::from_response(204, Duration::ZERO).is_error());
        assert!(ProbeOutcome::from_response(301, Duration::ZERO).is_error());
    }

    #[test]
    fn test_record_dual_counts_http_errors() {
        let mut result = RunResult::new();
        result.record(&ProbeOutcome::Success { latency_ms: 10.0 });
        result.record(&ProbeOutcome::HttpError { status: 500, latency_ms: 20.0 });
        result.record(&ProbeOutcome::transport("timed out"));

        assert_eq!(result.latencies, vec![10.0, 20.0]);
        assert_eq!(result.errors, 2);
        assert_eq!(result.attempts, 3);
        assert_eq!(result.transport_failures(), 1);
    }

    #[test]
    fn test_empty_result() {
        let result = RunResult::default();
        assert!(result.is_empty());
        assert_eq!(result.errors, 0);
        assert_eq!(result.requests_per_second(), 0.0);
    }

    #[test]
    fn test_requests_per_second() {
        let mut result = RunResult::new();
        for _ in 0..10 {
            result.record(&ProbeOutcome::Success { latency_ms: 1.0 });
        }
        result.elapsed = Duration::from_secs(2);
        assert_eq!(result.requests_per_second(), 5.0);
    }
}
