//! 1回のポーリング結果

use std::fmt;

use reqwest::{Method, StatusCode, Url};
use tracing::{info, warn};

/// Why a request attempt produced no response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request exceeded the client timeout
    Timeout,
    /// Shutdown was requested while the request was in flight
    Cancelled,
    /// Any other transport failure (DNS, connection refused, ...)
    Transport,
}

/// Result of a single poll attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The target answered; the body was read best-effort
    Response {
        /// Response status code, redirects included
        status: StatusCode,
        /// Raw response body (empty if the read failed)
        body: String,
    },
    /// The attempt was abandoned before a response arrived
    Failed {
        /// Request method
        method: Method,
        /// Request URL
        url: Url,
        /// Failure class
        kind: FailureKind,
        /// Error message
        error: String,
    },
}

impl PollOutcome {
    /// Returns true if the target produced a response.
    pub fn is_response(&self) -> bool {
        matches!(self, PollOutcome::Response { .. })
    }

    /// Emit the outcome as a log line.
    pub fn log(&self) {
        match self {
            PollOutcome::Response { .. } => info!("{}", self),
            PollOutcome::Failed { .. } => warn!("{}", self),
        }
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollOutcome::Response { status, body } => write!(f, "({}) {}", status.as_u16(), body),
            PollOutcome::Failed {
                method, url, error, ..
            } => write!(f, "failed to send {} {}: {}", method, url, error),
        }
    }
}
