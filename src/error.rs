// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors for the trace export lifecycle.

use thiserror::Error;

/// Boxed error type used to carry client-origin failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenient result alias for export operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while driving the export lifecycle.
#[derive(Error, Debug)]
pub enum Error {
    /// The exporter was already started. Every start call after the first
    /// observes this sentinel; the client is contacted at most once.
    #[error("exporter already started")]
    AlreadyStarted,

    /// The operation's context was cancelled before completion.
    #[error("operation cancelled")]
    Cancelled,

    /// The operation's context deadline elapsed before completion.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Opaque failure reported by the transport client, carried through
    /// without interpretation.
    #[error("transport error: {source}")]
    Transport {
        /// The client-reported failure.
        source: BoxError,
    },
}

impl Error {
    /// Wrap a client-reported failure.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport { source: err.into() }
    }

    /// True if this error is the start-once sentinel.
    #[inline]
    pub fn is_already_started(&self) -> bool {
        matches!(self, Self::AlreadyStarted)
    }
}
