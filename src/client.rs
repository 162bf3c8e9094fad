// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Transport capability consumed by the exporter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::ExportContext;
use crate::error::Result;
use crate::wire::WireSpan;

/// Abstract transport the exporter delegates to.
///
/// Implementations bind a concrete protocol (gRPC, HTTP, stdout, ...). The
/// exporter invokes exactly these three operations and assumes nothing about
/// their behavior beyond "may fail, may block on the given context". Retry
/// policy, if any, lives inside the implementation.
#[async_trait]
pub trait TraceClient: Send + Sync {
    /// Establish the connection to the receiving endpoint.
    async fn start(&self, cx: &ExportContext) -> Result<()>;

    /// Upload one batch of wire spans.
    async fn upload_traces(&self, cx: &ExportContext, spans: Vec<WireSpan>) -> Result<()>;

    /// Flush pending data and terminate the connection.
    async fn stop(&self, cx: &ExportContext) -> Result<()>;
}

#[async_trait]
impl<T: TraceClient + ?Sized> TraceClient for Box<T> {
    async fn start(&self, cx: &ExportContext) -> Result<()> {
        (**self).start(cx).await
    }

    async fn upload_traces(&self, cx: &ExportContext, spans: Vec<WireSpan>) -> Result<()> {
        (**self).upload_traces(cx, spans).await
    }

    async fn stop(&self, cx: &ExportContext) -> Result<()> {
        (**self).stop(cx).await
    }
}

#[async_trait]
impl<T: TraceClient + ?Sized> TraceClient for Arc<T> {
    async fn start(&self, cx: &ExportContext) -> Result<()> {
        (**self).start(cx).await
    }

    async fn upload_traces(&self, cx: &ExportContext, spans: Vec<WireSpan>) -> Result<()> {
        (**self).upload_traces(cx, spans).await
    }

    async fn stop(&self, cx: &ExportContext) -> Result<()> {
        (**self).stop(cx).await
    }
}
