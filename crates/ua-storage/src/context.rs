//! Cancellable operation context.
//!
//! Every storage call receives an [`OperationContext`]. A context can be
//! cancelled explicitly through its [`CancelHandle`], or implicitly when its
//! deadline passes. Clones share the same cancellation state.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Cancellation and deadline carrier for a single operation.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    signal: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels the [`OperationContext`] it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancels the associated context and all of its clones.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl OperationContext {
    /// A context that is never cancelled.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that can be cancelled through the returned handle.
    #[must_use]
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            signal: Some(rx),
            deadline: None,
        };
        (ctx, CancelHandle { tx })
    }

    /// A context that is cancelled once `timeout` elapses.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline(Instant::now() + timeout)
    }

    /// Sets (or tightens) the deadline of this context.
    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline_at(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if the context has been cancelled or its deadline passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        let signalled = self.signal.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        signalled || expired
    }

    /// Completes once the context is cancelled or its deadline passes.
    ///
    /// Never completes for a background context.
    pub async fn cancelled(&self) {
        let signalled = async {
            match &self.signal {
                Some(rx) => {
                    let mut rx = rx.clone();
                    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    // A dropped handle can no longer cancel.
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            () = signalled => {},
            () = expired => {},
        }
    }
}
