//! Shared utilities for integration tests.

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

use server_select::config::ProbeConfig;
use server_select::{HttpProber, Racer};

/// Mock mirrors served from one ephemeral port.
pub struct Mirrors {
    base: String,
}

impl Mirrors {
    /// Start a mock server with mirrors of known latency.
    ///
    /// - `/fast`: 200 after 50ms
    /// - `/mid`: 200 after 150ms
    /// - `/slow`: 200 after 500ms
    /// - `/stalled`: 200 after 30s
    /// - `/fail`: 503 immediately
    /// - `/missing`: 404 immediately
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/fast", get(|| respond_after(50, StatusCode::OK)))
            .route("/mid", get(|| respond_after(150, StatusCode::OK)))
            .route("/slow", get(|| respond_after(500, StatusCode::OK)))
            .route("/stalled", get(|| respond_after(30_000, StatusCode::OK)))
            .route("/fail", get(|| respond_after(0, StatusCode::SERVICE_UNAVAILABLE)));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

async fn respond_after(ms: u64, status: StatusCode) -> StatusCode {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    status
}

/// A racer probing over real HTTP, bypassing any system proxy.
pub fn http_racer() -> Racer<HttpProber> {
    let config = ProbeConfig {
        no_proxy: true,
        ..ProbeConfig::default()
    };
    Racer::http(&config).unwrap()
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    "http://127.0.0.1:1/".to_string()
}
