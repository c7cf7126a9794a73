//! Two-way races over real HTTP.

use std::time::Duration;

use server_select::{RaceContext, RaceError};

mod common;

#[tokio::test]
async fn test_race_returns_faster_mirror() {
    let mirrors = common::Mirrors::start().await;
    let racer = common::http_racer();
    let ctx = RaceContext::with_timeout(Duration::from_secs(30));

    let winner = racer
        .race(&ctx, mirrors.url("fast"), mirrors.url("slow"))
        .await
        .unwrap();

    assert_eq!(winner.as_str(), mirrors.url("fast"));
}

#[tokio::test]
async fn test_race_ignores_error_status() {
    let mirrors = common::Mirrors::start().await;
    let racer = common::http_racer();
    let ctx = RaceContext::with_timeout(Duration::from_secs(30));

    let winner = racer
        .race(&ctx, mirrors.url("fail"), mirrors.url("mid"))
        .await
        .unwrap();

    assert_eq!(winner.as_str(), mirrors.url("mid"));
}

#[tokio::test]
async fn test_race_reports_exhaustion() {
    let mirrors = common::Mirrors::start().await;
    let racer = common::http_racer();
    let ctx = RaceContext::with_timeout(Duration::from_secs(30));

    let err = racer
        .race(&ctx, mirrors.url("fail"), common::unreachable_url())
        .await
        .unwrap_err();

    assert!(matches!(err, RaceError::Exhausted { attempts: 2, .. }));
}

#[tokio::test]
async fn test_race_deadline_aborts_requests() {
    let mirrors = common::Mirrors::start().await;
    let racer = common::http_racer();
    let ctx = RaceContext::with_timeout(Duration::from_millis(100));

    let started = std::time::Instant::now();
    let err = racer
        .race(&ctx, mirrors.url("stalled"), mirrors.url("stalled"))
        .await
        .unwrap_err();

    assert_eq!(err, RaceError::DeadlineExceeded);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_race_with_cancelled_context() {
    let mirrors = common::Mirrors::start().await;
    let racer = common::http_racer();
    let ctx = RaceContext::new();
    ctx.cancel();

    let err = racer
        .race(&ctx, mirrors.url("fast"), mirrors.url("fast"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "context canceled");
}
