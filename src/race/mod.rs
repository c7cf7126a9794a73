//! Racing endpoints against each other.
//!
//! # Design Decisions
//! - Each race derives a child scope from the caller's context and cancels
//!   it as soon as the outcome is known
//! - A race never returns while any task it spawned is still running
//! - A context that has completed beats any pending probe result
//! - "Every endpoint failed" is a distinct error rather than a hang

mod all;
mod binary;
pub mod error;

use std::sync::Arc;

use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ProbeConfig;
use crate::context::RaceContext;
use crate::endpoint::Endpoint;
use crate::observability::metrics;
use crate::probe::{HttpProber, ProberBuildError, Prober};

pub use error::RaceError;

/// Races endpoints using a shared prober.
#[derive(Debug)]
pub struct Racer<P> {
    prober: Arc<P>,
}

impl<P> Clone for Racer<P> {
    fn clone(&self) -> Self {
        Self {
            prober: Arc::clone(&self.prober),
        }
    }
}

impl Racer<HttpProber> {
    /// A racer that probes with HTTP `GET`.
    pub fn http(config: &ProbeConfig) -> Result<Self, ProberBuildError> {
        Ok(Self::new(HttpProber::new(config)?))
    }
}

impl<P: Prober> Racer<P> {
    pub fn new(prober: P) -> Self {
        Self::from_shared(Arc::new(prober))
    }

    pub fn from_shared(prober: Arc<P>) -> Self {
        Self { prober }
    }

    pub fn prober(&self) -> &P {
        &self.prober
    }

    /// Race two endpoints and return the first to respond successfully.
    ///
    /// Fails with the context's completion reason if it completes first, or
    /// with [`RaceError::Exhausted`] if both probes fail.
    pub async fn race(
        &self,
        ctx: &RaceContext,
        a: impl Into<Endpoint>,
        b: impl Into<Endpoint>,
    ) -> Result<Endpoint, RaceError> {
        let started = Instant::now();
        let span = tracing::info_span!("race", race_id = %Uuid::new_v4(), endpoints = 2);

        let result = binary::race_pair(&self.prober, ctx, a.into(), b.into())
            .instrument(span.clone())
            .await;

        span.in_scope(|| finish(&result, started));
        result
    }

    /// Race every endpoint and return the first to respond successfully.
    ///
    /// Duplicates are probed independently. An empty list is rejected with
    /// [`RaceError::NoEndpoints`] before anything is spawned.
    pub async fn race_all<I>(&self, ctx: &RaceContext, endpoints: I) -> Result<Endpoint, RaceError>
    where
        I: IntoIterator,
        I::Item: Into<Endpoint>,
    {
        let endpoints: Vec<Endpoint> = endpoints.into_iter().map(Into::into).collect();
        let started = Instant::now();
        let span = tracing::info_span!(
            "race_all",
            race_id = %Uuid::new_v4(),
            endpoints = endpoints.len()
        );

        let result = all::race_all(&self.prober, ctx, endpoints)
            .instrument(span.clone())
            .await;

        span.in_scope(|| finish(&result, started));
        result
    }
}

/// Race two endpoints with `prober`.
pub async fn race<P: Prober>(
    ctx: &RaceContext,
    prober: Arc<P>,
    a: impl Into<Endpoint>,
    b: impl Into<Endpoint>,
) -> Result<Endpoint, RaceError> {
    Racer::from_shared(prober).race(ctx, a, b).await
}

/// Race every endpoint with `prober`.
pub async fn race_all<P, I>(ctx: &RaceContext, prober: Arc<P>, endpoints: I) -> Result<Endpoint, RaceError>
where
    P: Prober,
    I: IntoIterator,
    I::Item: Into<Endpoint>,
{
    Racer::from_shared(prober).race_all(ctx, endpoints).await
}

fn finish(result: &Result<Endpoint, RaceError>, started: Instant) {
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(winner) => tracing::info!(winner = %winner, elapsed_ms, "Race won"),
        Err(e) if e.is_context() => tracing::info!(reason = %e, elapsed_ms, "Race ended by context"),
        Err(e) => tracing::warn!(error = %e, elapsed_ms, "Race produced no winner"),
    }
    metrics::record_race(result, started);
}
