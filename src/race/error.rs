//! Race failure taxonomy.

use thiserror::Error;

use crate::context::ContextError;
use crate::endpoint::Endpoint;
use crate::probe::ProbeFailure;

/// Errors that end a race without a winner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaceError {
    /// The race context was cancelled before a winner emerged.
    #[error("context canceled")]
    Cancelled,

    /// The race context's deadline passed before a winner emerged.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// No endpoints were supplied.
    #[error("no endpoints to race")]
    NoEndpoints,

    /// Every probe finished without success.
    #[error("all {attempts} probes failed")]
    Exhausted {
        attempts: usize,
        failures: Vec<(Endpoint, ProbeFailure)>,
    },
}

impl RaceError {
    /// True when the race ended because its context completed.
    pub fn is_context(&self) -> bool {
        matches!(self, RaceError::Cancelled | RaceError::DeadlineExceeded)
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RaceError::Cancelled => "cancelled",
            RaceError::DeadlineExceeded => "deadline_exceeded",
            RaceError::NoEndpoints => "no_endpoints",
            RaceError::Exhausted { .. } => "exhausted",
        }
    }
}

impl From<ContextError> for RaceError {
    fn from(reason: ContextError) -> Self {
        match reason {
            ContextError::Cancelled => RaceError::Cancelled,
            ContextError::DeadlineExceeded => RaceError::DeadlineExceeded,
        }
    }
}
