//! In-memory prober with scripted latencies, for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{ProbeFailure, ProbeOutcome, Prober};
use crate::endpoint::Endpoint;

#[derive(Debug, Default)]
pub(crate) struct ScriptedProber {
    script: HashMap<String, (Duration, bool)>,
    started: AtomicUsize,
    in_flight: Arc<AtomicUsize>,
}

impl ScriptedProber {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` after `delay`, successfully or with a 503.
    pub(crate) fn respond(mut self, endpoint: &str, delay: Duration, ok: bool) -> Self {
        self.script.insert(endpoint.to_string(), (delay, ok));
        self
    }

    /// Probes started so far.
    pub(crate) fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Probes currently running. Drops to zero once every probe future
    /// has completed or been dropped.
    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard(Arc<AtomicUsize>);

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Prober for ScriptedProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        self.started.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard::enter(&self.in_flight);

        match self.script.get(endpoint.as_str()) {
            Some(&(delay, ok)) => {
                tokio::time::sleep(delay).await;
                if ok {
                    ProbeOutcome::Success(endpoint.clone())
                } else {
                    ProbeOutcome::Failure(ProbeFailure::Status(503))
                }
            }
            None => ProbeOutcome::Failure(ProbeFailure::InvalidRequest(format!(
                "no script for {endpoint}"
            ))),
        }
    }
}
