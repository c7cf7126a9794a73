//! Mirror selection by racing.
//!
//! Every candidate endpoint is probed concurrently and the first one to
//! answer successfully wins. The losers are cancelled and awaited before
//! the race returns, so no probe outlives the call that started it.
//!
//! # Data Flow
//! ```text
//! caller ── RaceContext + endpoints ──▶ Racer
//!                                         │ derives a child scope
//!                                         ▼
//!                        ┌────────┬────────┬────────┐
//!                        │ probe  │ probe  │ probe  │  (one task each)
//!                        └───┬────┴───┬────┴───┬────┘
//!                            ▼        ▼        ▼
//!                      first Success wins, scope cancelled,
//!                      all tasks joined, winner returned
//! ```

pub mod config;
pub mod context;
pub mod endpoint;
pub mod observability;
pub mod probe;
pub mod race;

pub use config::SelectConfig;
pub use context::{ContextError, RaceContext};
pub use endpoint::Endpoint;
pub use probe::{HttpProber, ProbeFailure, ProbeOutcome, Prober};
pub use race::{RaceError, Racer};
