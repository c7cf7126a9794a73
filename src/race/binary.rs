//! Two-way race.

use std::sync::Arc;

use crate::context::RaceContext;
use crate::endpoint::Endpoint;
use crate::probe::{spawn_probe, Probe, ProbeOutcome, Prober};
use crate::race::RaceError;

/// Race `a` against `b` and return the first to succeed.
///
/// Both probe tasks have terminated by the time this returns.
pub(crate) async fn race_pair<P: Prober>(
    prober: &Arc<P>,
    ctx: &RaceContext,
    a: Endpoint,
    b: Endpoint,
) -> Result<Endpoint, RaceError> {
    if let Some(reason) = ctx.err() {
        return Err(reason.into());
    }

    let scope = ctx.child();
    let mut probe_a = spawn_probe(Arc::clone(prober), a, &scope);
    let mut probe_b = spawn_probe(Arc::clone(prober), b, &scope);

    let result = select_winner(ctx, &mut probe_a, &mut probe_b).await;

    scope.cancel();
    probe_a.join().await;
    probe_b.join().await;

    result
}

async fn select_winner(
    ctx: &RaceContext,
    probe_a: &mut Probe,
    probe_b: &mut Probe,
) -> Result<Endpoint, RaceError> {
    let mut a_pending = true;
    let mut b_pending = true;
    let mut failures = Vec::with_capacity(2);

    while a_pending || b_pending {
        let (endpoint, outcome) = tokio::select! {
            biased;
            reason = ctx.done() => return Err(reason.into()),
            outcome = probe_a.outcome(), if a_pending => {
                a_pending = false;
                (probe_a.endpoint(), outcome)
            }
            outcome = probe_b.outcome(), if b_pending => {
                b_pending = false;
                (probe_b.endpoint(), outcome)
            }
        };

        match outcome {
            ProbeOutcome::Success(winner) => return Ok(winner),
            ProbeOutcome::Failure(reason) => failures.push((endpoint.clone(), reason)),
        }
    }

    tracing::warn!(failures = failures.len(), "Both endpoints failed");
    Err(RaceError::Exhausted {
        attempts: 2,
        failures,
    })
}
