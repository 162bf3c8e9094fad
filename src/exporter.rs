// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Export lifecycle controller for completed spans.
//!
//! The exporter owns a one-way `Idle -> Running -> Stopped` lifecycle. The
//! client it wraps is contacted at most once to connect and at most once to
//! disconnect, no matter how many callers race start or shutdown, and
//! batches only flow while the exporter is running.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::client::TraceClient;
use crate::context::ExportContext;
use crate::error::{Error, Result};
use crate::record::SpanRecord;
use crate::transform;

/// Lifecycle phase of an [`Exporter`].
///
/// `Idle -> Running` happens on the first start attempt, successful or not;
/// `Running -> Stopped` on the first effective shutdown. No transition
/// leaves `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExporterState {
    Idle,
    Running,
    Stopped,
}

/// Batch consumer contract satisfied by the exporter.
///
/// A batching span processor holds its endpoint as `Arc<dyn SpanExporter>`
/// and needs no knowledge of the transport behind it.
#[async_trait]
pub trait SpanExporter: Send + Sync {
    /// Consume one batch of completed spans.
    async fn export_batch(&self, cx: &ExportContext, batch: &[SpanRecord]) -> Result<()>;

    /// Flush and permanently stop the exporter.
    async fn shutdown(&self, cx: &ExportContext) -> Result<()>;
}

/// Exports completed spans through a [`TraceClient`].
pub struct Exporter<C: TraceClient> {
    client: C,
    state: RwLock<ExporterState>,
    start_gate: Mutex<bool>,
    stop_gate: Mutex<bool>,
}

impl<C: TraceClient> Exporter<C> {
    /// Exporter in the idle state, bound permanently to `client`.
    ///
    /// No connection is attempted until [`start`](Self::start).
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: RwLock::new(ExporterState::Idle),
            start_gate: Mutex::new(false),
            stop_gate: Mutex::new(false),
        }
    }

    /// Construct an exporter and immediately start it.
    pub async fn started(cx: &ExportContext, client: C) -> Result<Self> {
        let exporter = Self::new(client);
        exporter.start(cx).await?;
        Ok(exporter)
    }

    /// Establish the client connection.
    ///
    /// The first caller wins: it flips the exporter to running and performs
    /// the sole connection attempt, returning the client's result verbatim.
    /// Every other caller, concurrent or later, observes
    /// [`Error::AlreadyStarted`] without the client being contacted again.
    pub async fn start(&self, cx: &ExportContext) -> Result<()> {
        let mut attempted = self.start_gate.lock().await;
        if *attempted {
            return Err(Error::AlreadyStarted);
        }
        // The attempt is recorded before the client call: a failed or
        // cancelled connect still consumes the single start.
        *attempted = true;
        self.set_state(ExporterState::Running);

        debug!("starting trace export client");
        self.client.start(cx).await
    }

    /// Export one batch of completed spans.
    ///
    /// Outside the running state the batch is dropped as a no-op success,
    /// which tolerates exports racing shutdown. An empty batch, or one
    /// whose transform yields no wire spans, returns without touching the
    /// client. Otherwise the client's upload result is returned verbatim.
    pub async fn export_batch(&self, cx: &ExportContext, batch: &[SpanRecord]) -> Result<()> {
        if self.state() != ExporterState::Running {
            trace!(spans = batch.len(), "dropping batch, exporter not running");
            return Ok(());
        }

        let spans = transform::spans(batch);
        if spans.is_empty() {
            return Ok(());
        }

        self.client.upload_traces(cx, spans).await
    }

    /// Flush and permanently stop the exporter.
    ///
    /// A never-started exporter shuts down as a no-op success. Otherwise
    /// exactly one caller reaches the client's stop operation and surfaces
    /// its result; every other caller, concurrent or later, observes the
    /// shutdown as already satisfied.
    pub async fn shutdown(&self, cx: &ExportContext) -> Result<()> {
        if self.state() != ExporterState::Running {
            return Ok(());
        }

        let mut attempted = self.stop_gate.lock().await;
        if *attempted {
            return Ok(());
        }
        *attempted = true;

        debug!("stopping trace export client");
        let result = self.client.stop(cx).await;
        self.set_state(ExporterState::Stopped);
        result
    }

    fn state(&self) -> ExporterState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: ExporterState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[async_trait]
impl<C: TraceClient> SpanExporter for Exporter<C> {
    async fn export_batch(&self, cx: &ExportContext, batch: &[SpanRecord]) -> Result<()> {
        Exporter::export_batch(self, cx, batch).await
    }

    async fn shutdown(&self, cx: &ExportContext) -> Result<()> {
        Exporter::shutdown(self, cx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SpanId, TraceId};
    use crate::wire::WireSpan;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingClient {
        starts: AtomicUsize,
        uploads: AtomicUsize,
        stops: AtomicUsize,
    }

    #[async_trait]
    impl TraceClient for CountingClient {
        async fn start(&self, _cx: &ExportContext) -> Result<()> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn upload_traces(&self, _cx: &ExportContext, _spans: Vec<WireSpan>) -> Result<()> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn stop(&self, _cx: &ExportContext) -> Result<()> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_second_start_fails_without_client_call() {
        let client = Arc::new(CountingClient::default());
        let exporter = Exporter::new(Arc::clone(&client));
        let cx = ExportContext::background();

        assert!(exporter.start(&cx).await.is_ok());
        assert!(matches!(
            exporter.start(&cx).await,
            Err(Error::AlreadyStarted)
        ));
        assert_eq!(client.starts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_of_never_started_exporter_is_noop() {
        let client = Arc::new(CountingClient::default());
        let exporter = Exporter::new(Arc::clone(&client));
        let cx = ExportContext::background();

        assert!(exporter.shutdown(&cx).await.is_ok());
        assert_eq!(client.stops.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_export_outside_running_state_is_noop() {
        let client = Arc::new(CountingClient::default());
        let exporter = Exporter::new(Arc::clone(&client));
        let cx = ExportContext::background();
        let batch = [SpanRecord::new(TraceId([1; 16]), SpanId([1; 8]), "early")];

        assert!(exporter.export_batch(&cx, &batch).await.is_ok());

        exporter.start(&cx).await.unwrap();
        exporter.shutdown(&cx).await.unwrap();
        assert!(exporter.export_batch(&cx, &batch).await.is_ok());

        assert_eq!(client.uploads.load(Ordering::SeqCst), 0);
    }
}
