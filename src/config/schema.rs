//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelectConfig {
    /// Race-wide settings.
    pub race: RaceConfig,

    /// How each endpoint is probed.
    pub probe: ProbeConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Endpoints raced when none are given on the command line.
    pub endpoints: EndpointsConfig,
}

/// Race configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Overall race deadline in milliseconds.
    pub timeout_ms: u64,
}

impl RaceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self { timeout_ms: 30_000 }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Cap on a single probe in milliseconds, on top of the race deadline.
    pub request_timeout_ms: Option<u64>,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Status codes that count as success.
    pub success_statuses: Vec<u16>,

    /// User-Agent header sent with every probe.
    pub user_agent: String,

    /// Ignore system proxy settings.
    pub no_proxy: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: None,
            connect_timeout_ms: 5_000,
            success_statuses: vec![200],
            user_agent: concat!("server-select/", env!("CARGO_PKG_VERSION")).to_string(),
            no_proxy: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (e.g. "info", "server_select=debug").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Configured endpoints.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EndpointsConfig {
    pub urls: Vec<String>,
}
