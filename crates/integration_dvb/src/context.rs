//! Per-call execution context
//!
//! A [`RequestContext`] carries an optional deadline and a cancellation token.
//! The whole request (send and body read) runs inside [`RequestContext::run`],
//! and whichever of completion, cancellation, or deadline comes first wins.
//! A losing request future is dropped, which aborts the connection.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{DvbError, TransportError};

/// Cancellation and deadline for a single API call
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context without deadline that is never cancelled unless asked to
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose deadline is `timeout` from now
    ///
    /// A timeout too large to represent as an instant means no deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::new().deadline_at(deadline),
            None => Self::new(),
        }
    }

    /// A context with an absolute deadline
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::new().deadline_at(deadline)
    }

    /// A context driven by an existing cancellation token
    ///
    /// Cancelling the token (or any of its parents) aborts calls made with
    /// this context.
    #[must_use]
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set or replace the deadline
    #[must_use]
    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The deadline, if any
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The token that cancels calls made with this context
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel all calls made with this context
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the context was cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` to completion unless the context ends first
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Cancelled`] if the token fires and
    /// [`TransportError::DeadlineExceeded`] if the deadline passes before
    /// `fut` finishes; otherwise whatever `fut` returns.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, DvbError>
    where
        F: Future<Output = Result<T, DvbError>>,
    {
        if self.token.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(TransportError::Cancelled.into()),
            () = deadline => Err(TransportError::DeadlineExceeded.into()),
            result = fut => result,
        }
    }
}
