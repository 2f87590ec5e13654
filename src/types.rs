//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// How the prober schedules requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// One request in flight at a time
    Sequential,
    /// A fixed number of workers, each running the deadline loop
    Concurrent { workers: usize },
}

impl ExecutionMode {
    /// Pick the mode for a configured worker count
    pub fn from_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            Self::Sequential
        } else {
            Self::Concurrent { workers: concurrency }
        }
    }

    /// Number of requests that may be in flight at once
    pub fn workers(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Concurrent { workers } => *workers,
        }
    }
}

/// Classification of a single request attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Response received with status 200
    Success,
    /// Response received with any other status
    HttpError,
    /// No response received
    TransportError,
}

impl RequestStatus {
    /// Short label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::HttpError => "http_error",
            Self::TransportError => "transport_error",
        }
    }
}
