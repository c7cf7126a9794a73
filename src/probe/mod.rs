//! Probes: one success/failure check against one endpoint.
//!
//! # Data Flow
//! ```text
//! spawn_probe(prober, endpoint, scope)
//!     → tokio task runs prober.probe() raced against scope.done()
//!     → exactly one ProbeOutcome sent on a oneshot
//!     → task ends
//! ```
//!
//! # Design Decisions
//! - The outbound call is dropped (aborted) as soon as the scope completes
//! - Every failure is reported with its reason instead of being swallowed
//! - A closed outcome channel is read as a cancelled probe

pub mod http;

#[cfg(test)]
pub(crate) mod scripted;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Instrument;

use crate::context::RaceContext;
use crate::endpoint::Endpoint;
use crate::observability::metrics;

pub use self::http::{HttpProber, ProberBuildError};

/// Transport-specific success check against a single endpoint.
///
/// Implementations issue one outbound call per invocation and fold every
/// result into a [`ProbeOutcome`]. Cancellation is handled by the caller
/// dropping the returned future.
pub trait Prober: Send + Sync + 'static {
    fn probe(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeOutcome> + Send;
}

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(Endpoint),
    Failure(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }
}

/// Why a probe did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// The request could not be built (malformed URL, bad scheme).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connect, I/O or per-request timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived with a status outside the success set.
    #[error("unsuccessful status {0}")]
    Status(u16),

    /// The probe's scope completed before it finished.
    #[error("probe cancelled")]
    Cancelled,
}

impl ProbeFailure {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeFailure::InvalidRequest(_) => "invalid_request",
            ProbeFailure::Transport(_) => "transport",
            ProbeFailure::Status(_) => "status",
            ProbeFailure::Cancelled => "cancelled",
        }
    }
}

/// Handle to an in-flight probe task.
///
/// Owned by the racer that spawned it. [`Probe::outcome`] yields the single
/// result; [`Probe::join`] waits for the task itself to end.
#[derive(Debug)]
pub struct Probe {
    endpoint: Endpoint,
    outcome: oneshot::Receiver<ProbeOutcome>,
    task: JoinHandle<()>,
}

impl Probe {
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Wait for the probe's outcome.
    ///
    /// Must not be awaited again once it has returned.
    pub async fn outcome(&mut self) -> ProbeOutcome {
        match (&mut self.outcome).await {
            Ok(outcome) => outcome,
            Err(_) => ProbeOutcome::Failure(ProbeFailure::Cancelled),
        }
    }

    /// Wait for the probe task to terminate.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::warn!(endpoint = %self.endpoint, error = %e, "Probe task did not complete cleanly");
        }
    }
}

/// Start probing `endpoint` on a new task bound to `scope`.
pub fn spawn_probe<P: Prober>(prober: Arc<P>, endpoint: Endpoint, scope: &RaceContext) -> Probe {
    let (tx, rx) = oneshot::channel();
    let scope = scope.clone();
    let target = endpoint.clone();

    let task = tokio::spawn(
        async move {
            let started = Instant::now();
            tracing::debug!(endpoint = %target, "Probing endpoint");

            let outcome = tokio::select! {
                biased;
                _ = scope.done() => ProbeOutcome::Failure(ProbeFailure::Cancelled),
                outcome = prober.probe(&target) => outcome,
            };

            match &outcome {
                ProbeOutcome::Success(_) => {
                    tracing::debug!(
                        endpoint = %target,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Probe succeeded"
                    );
                }
                ProbeOutcome::Failure(reason) => {
                    tracing::debug!(endpoint = %target, reason = %reason, "Probe failed");
                }
            }
            metrics::record_probe(&outcome, started);

            // The receiver may already be gone if the race has finished.
            let _ = tx.send(outcome);
        }
        .in_current_span(),
    );

    Probe {
        endpoint,
        outcome: rx,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedProber;
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_probe_reports_success() {
        let prober = Arc::new(ScriptedProber::new().respond("a", Duration::from_millis(5), true));
        let mut probe = spawn_probe(prober.clone(), Endpoint::from("a"), &RaceContext::new());

        assert_eq!(probe.outcome().await, ProbeOutcome::Success(Endpoint::from("a")));
        probe.join().await;
        assert_eq!(prober.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_probe_reports_failure_reason() {
        let prober = Arc::new(ScriptedProber::new().respond("a", Duration::ZERO, false));
        let mut probe = spawn_probe(prober, Endpoint::from("a"), &RaceContext::new());

        assert_eq!(probe.outcome().await, ProbeOutcome::Failure(ProbeFailure::Status(503)));
        probe.join().await;
    }

    #[tokio::test]
    async fn test_probe_aborts_on_cancel() {
        let prober = Arc::new(ScriptedProber::new().respond("slow", Duration::from_secs(10), true));
        let scope = RaceContext::new();
        let mut probe = spawn_probe(prober.clone(), Endpoint::from("slow"), &scope);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(prober.in_flight(), 1);

        scope.cancel();
        let outcome = tokio::time::timeout(Duration::from_secs(1), probe.outcome())
            .await
            .expect("cancelled probe should report promptly");
        assert_eq!(outcome, ProbeOutcome::Failure(ProbeFailure::Cancelled));

        probe.join().await;
        assert_eq!(prober.in_flight(), 0);
    }
}
