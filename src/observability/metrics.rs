//! Metrics collection.
//!
//! # Metrics
//! - `server_select_probes_total` (counter): probes by outcome
//! - `server_select_probe_duration_seconds` (histogram): time to outcome
//! - `server_select_races_total` (counter): races by result
//! - `server_select_race_duration_seconds` (histogram): time to result

use metrics::{counter, histogram};
use tokio::time::Instant;

use crate::endpoint::Endpoint;
use crate::probe::ProbeOutcome;
use crate::race::RaceError;

pub fn record_probe(outcome: &ProbeOutcome, started: Instant) {
    let label = match outcome {
        ProbeOutcome::Success(_) => "success",
        ProbeOutcome::Failure(reason) => reason.kind(),
    };
    counter!("server_select_probes_total", "outcome" => label).increment(1);
    histogram!("server_select_probe_duration_seconds").record(started.elapsed().as_secs_f64());
}

pub fn record_race(result: &Result<Endpoint, RaceError>, started: Instant) {
    let label = match result {
        Ok(_) => "won",
        Err(e) => e.kind(),
    };
    counter!("server_select_races_total", "result" => label).increment(1);
    histogram!("server_select_race_duration_seconds").record(started.elapsed().as_secs_f64());
}
