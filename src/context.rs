//! Race contexts: cancellation plus an optional deadline.
//!
//! # Design Decisions
//! - Built on `CancellationToken` so child scopes observe parent cancellation
//! - A child inherits its parent's deadline; cancelling a child never
//!   touches the parent
//! - Completion reasons render the same way callers have always seen them
//!   (`context canceled`, `context deadline exceeded`)

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The context, or one of its ancestors, was cancelled.
    #[error("context canceled")]
    Cancelled,

    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Caller-owned cancellation and deadline scope for a race.
///
/// Clones share the same token: cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct RaceContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RaceContext {
    /// A context with no deadline. It completes only when cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that completes `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context that completes at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Derive a scope that completes with this context but can also be
    /// cancelled on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The completion reason, or `None` while the context is live.
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves once the context completes, yielding the reason.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => ContextError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_context_is_live() {
        let ctx = RaceContext::new();
        assert_eq!(ctx.err(), None);
        assert!(!ctx.is_done());
        assert!(ctx.deadline().is_none());
    }

    #[tokio::test]
    async fn test_cancel_reaches_children_but_not_parent() {
        let parent = RaceContext::new();
        let child = parent.child();

        child.cancel();
        assert_eq!(child.err(), Some(ContextError::Cancelled));
        assert_eq!(parent.err(), None);

        let other = parent.child();
        parent.cancel();
        assert_eq!(other.done().await, ContextError::Cancelled);
    }

    #[tokio::test]
    async fn test_deadline_completes_context() {
        let ctx = RaceContext::with_timeout(Duration::from_millis(20));
        let child = ctx.child();
        assert_eq!(child.deadline(), ctx.deadline());

        assert_eq!(ctx.done().await, ContextError::DeadlineExceeded);
        assert_eq!(child.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_expired_deadline_reports_immediately() {
        let ctx = RaceContext::with_deadline(Instant::now());
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
        assert_eq!(ContextError::DeadlineExceeded.to_string(), "context deadline exceeded");
        assert_eq!(ContextError::Cancelled.to_string(), "context canceled");
    }
}
