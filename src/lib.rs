// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Export lifecycle controller for OTLP trace data.
//!
//! The crate owns the one-way `Idle -> Running -> Stopped` lifecycle of a
//! trace [`Exporter`] and forwards batches of completed spans to a
//! pluggable [`TraceClient`] transport. Starting and stopping are guarded
//! by run-once gates, so the client is asked to connect at most once and to
//! disconnect at most once no matter how many callers race; exports outside
//! the running state are dropped as no-op successes rather than corrupting
//! the lifecycle.
//!
//! Wire encoding of spans lives in [`transform`] and [`wire`]; transports
//! implement [`TraceClient`]; [`ExportPipeline`] assembles a started
//! exporter into a shared batch consumer endpoint.
//!
//! # Example
//!
//! ```
//! use otlp_trace_export::record::{SpanId, TraceId};
//! use otlp_trace_export::{ExportContext, Exporter, SpanRecord, StdoutClient, StdoutConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> otlp_trace_export::Result<()> {
//! let cx = ExportContext::background();
//! let exporter = Exporter::started(&cx, StdoutClient::new(StdoutConfig::default())).await?;
//!
//! let span = SpanRecord::new(TraceId([1; 16]), SpanId([2; 8]), "startup");
//! exporter.export_batch(&cx, &[span]).await?;
//! exporter.shutdown(&cx).await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod client;
mod context;
mod error;
mod exporter;
mod pipeline;
pub mod record;
mod stdout;
pub mod transform;
pub mod wire;

pub use client::TraceClient;
pub use context::ExportContext;
pub use error::{BoxError, Error, Result};
pub use exporter::{Exporter, SpanExporter};
pub use pipeline::{ExportPipeline, PipelineConfig};
pub use record::SpanRecord;
pub use stdout::{StdoutClient, StdoutConfig};
pub use wire::WireSpan;
