//! N-way race with supervised probes.
//!
//! # Data Flow
//! ```text
//! for each endpoint:
//!     spawn probe + supervisor
//!     supervisor: scope.done() → stand down
//!                 probe outcome → try_send into shared channel
//!
//! racer: ctx.done() → context error
//!        first Success → winner
//!        N failures → Exhausted
//! then: cancel scope, join every supervisor
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::context::RaceContext;
use crate::endpoint::Endpoint;
use crate::probe::{spawn_probe, Probe, ProbeOutcome, Prober};
use crate::race::RaceError;

type Published = (Endpoint, ProbeOutcome);

/// Race every endpoint and return the first to succeed.
///
/// Every supervisor, and through it every probe task, has terminated by
/// the time this returns.
pub(crate) async fn race_all<P: Prober>(
    prober: &Arc<P>,
    ctx: &RaceContext,
    endpoints: Vec<Endpoint>,
) -> Result<Endpoint, RaceError> {
    if endpoints.is_empty() {
        return Err(RaceError::NoEndpoints);
    }
    if let Some(reason) = ctx.err() {
        return Err(reason.into());
    }

    let attempts = endpoints.len();
    let scope = ctx.child();
    // Room for one publish per supervisor.
    let (results_tx, mut results_rx) = mpsc::channel::<Published>(attempts);
    let mut supervisors = JoinSet::new();

    for endpoint in endpoints {
        let probe = spawn_probe(Arc::clone(prober), endpoint, &scope);
        supervisors.spawn(supervise(probe, scope.clone(), results_tx.clone()).in_current_span());
    }
    drop(results_tx);

    let mut failures = Vec::new();
    let result = loop {
        tokio::select! {
            biased;
            reason = ctx.done() => break Err(reason.into()),
            published = results_rx.recv() => match published {
                Some((_, ProbeOutcome::Success(winner))) => break Ok(winner),
                Some((endpoint, ProbeOutcome::Failure(reason))) => {
                    failures.push((endpoint, reason));
                    if failures.len() == attempts {
                        tracing::warn!(attempts, "All endpoints failed");
                        break Err(RaceError::Exhausted { attempts, failures });
                    }
                }
                // Every supervisor has gone without a winner.
                None => break Err(RaceError::Exhausted { attempts, failures }),
            },
        }
    };

    scope.cancel();
    while let Some(joined) = supervisors.join_next().await {
        if let Err(e) = joined {
            tracing::warn!(error = %e, "Supervisor task did not complete cleanly");
        }
    }

    result
}

/// Forward one probe's outcome, or stand down when the scope completes.
async fn supervise(mut probe: Probe, scope: RaceContext, results: mpsc::Sender<Published>) {
    tokio::select! {
        biased;
        reason = scope.done() => {
            tracing::trace!(endpoint = %probe.endpoint(), reason = %reason, "Supervisor standing down");
        }
        outcome = probe.outcome() => {
            if results.try_send((probe.endpoint().clone(), outcome)).is_err() {
                tracing::trace!(endpoint = %probe.endpoint(), "Race already decided, outcome dropped");
            }
        }
    }

    probe.join().await;
}
