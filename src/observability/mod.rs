//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! probes and racers emit:
//!     → tracing events inside a per-race span (race_id, endpoint count)
//!     → metrics.rs (probe and race counters, durations)
//!
//! the embedding application owns the sinks:
//!     → logging.rs installs the process-wide subscriber (binary only)
//!     → a metrics recorder, if any, is installed by the application
//! ```
//!
//! # Design Decisions
//! - The library never installs global state; it only emits
//! - Without a recorder, metric calls are no-ops

pub mod logging;
pub mod metrics;
