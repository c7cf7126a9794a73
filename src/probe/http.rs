//! HTTP probing.
//!
//! # Responsibilities
//! - Issue one `GET` per probe through a shared client
//! - Judge success by status code only; the body is never read
//! - Map build, transport and status failures onto `ProbeFailure`

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use super::{ProbeFailure, ProbeOutcome, Prober};
use crate::config::ProbeConfig;
use crate::endpoint::Endpoint;

/// Error building the HTTP client behind a prober.
#[derive(Debug, Error)]
pub enum ProberBuildError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Prober that checks endpoints with a single HTTP `GET`.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    success_statuses: Vec<u16>,
}

impl HttpProber {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProberBuildError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));

        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if config.no_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            success_statuses: config.success_statuses.clone(),
        })
    }

    pub fn is_success(&self, status: StatusCode) -> bool {
        self.success_statuses.contains(&status.as_u16())
    }
}

impl Prober for HttpProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let request = match self.client.get(endpoint.as_str()).build() {
            Ok(request) => request,
            Err(e) => return ProbeOutcome::Failure(ProbeFailure::InvalidRequest(e.to_string())),
        };

        match self.client.execute(request).await {
            Ok(response) if self.is_success(response.status()) => {
                ProbeOutcome::Success(endpoint.clone())
            }
            Ok(response) => ProbeOutcome::Failure(ProbeFailure::Status(response.status().as_u16())),
            Err(e) => ProbeOutcome::Failure(ProbeFailure::Transport(e.to_string())),
        }
    }
}
