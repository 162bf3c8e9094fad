// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Cancellation and deadline propagation for export operations.
//!
//! Every lifecycle operation takes an [`ExportContext`]. Cancelling the
//! context makes in-flight client work return promptly; it never rolls back
//! a state transition the exporter has already committed.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Context threaded through every export operation.
#[derive(Clone, Debug, Default)]
pub struct ExportContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ExportContext {
    /// Context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a context that expires at `deadline`.
    ///
    /// An earlier deadline already present on the context wins.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Derive a context cancelled together with `token`.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once [`cancel`](Self::cancel) was called or the deadline elapsed.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// The absolute deadline, if one was set.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Run `fut` to completion unless this context is cancelled or expires
    /// first.
    ///
    /// Client implementations use this to make blocking transport work obey
    /// the caller's context.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.cancel.cancelled() => Err(Error::Cancelled),
                    _ = tokio::time::sleep_until(deadline) => Err(Error::DeadlineExceeded),
                    res = fut => res,
                }
            }
            None => {
                tokio::select! {
                    _ = self.cancel.cancelled() => Err(Error::Cancelled),
                    res = fut => res,
                }
            }
        }
    }
}
