// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Assembly of a started export pipeline.
//!
//! Composition stays explicit: the caller receives the started exporter as
//! a shared batch consumer and owns its registration with whatever span
//! processor it uses. Nothing here installs process-wide state.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::TraceClient;
use crate::context::ExportContext;
use crate::error::Result;
use crate::exporter::{Exporter, SpanExporter};

/// Default deadline for the initial client connection.
const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for the final flush and disconnect.
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeouts applied while assembling and tearing down a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Deadline for the initial client connection.
    #[serde(default = "default_start_timeout", with = "humantime_serde")]
    pub start_timeout: Duration,

    /// Deadline for the final flush and disconnect.
    #[serde(default = "default_shutdown_timeout", with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_timeout: DEFAULT_START_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Set the deadline for the initial client connection.
    #[must_use]
    pub fn with_start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout = timeout;
        self
    }

    /// Set the deadline for the final flush and disconnect.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

fn default_start_timeout() -> Duration {
    DEFAULT_START_TIMEOUT
}

fn default_shutdown_timeout() -> Duration {
    DEFAULT_SHUTDOWN_TIMEOUT
}

/// A constructed and started export pipeline endpoint.
pub struct ExportPipeline {
    exporter: Arc<dyn SpanExporter>,
    config: PipelineConfig,
}

impl ExportPipeline {
    /// Construct an exporter for `client`, start it under the configured
    /// deadline, and wrap it for registration with a span processor.
    pub async fn start<C>(client: C, config: PipelineConfig) -> Result<Self>
    where
        C: TraceClient + 'static,
    {
        let cx = ExportContext::background().with_timeout(config.start_timeout);
        let exporter = Exporter::started(&cx, client).await?;
        Ok(Self {
            exporter: Arc::new(exporter),
            config,
        })
    }

    /// The batch consumer endpoint to hand to a span processor.
    pub fn exporter(&self) -> Arc<dyn SpanExporter> {
        Arc::clone(&self.exporter)
    }

    /// Shut the pipeline's exporter down under the configured deadline.
    ///
    /// Safe to call more than once; repeat calls are no-op successes.
    pub async fn shutdown(&self) -> Result<()> {
        let cx = ExportContext::background().with_timeout(self.config.shutdown_timeout);
        self.exporter.shutdown(&cx).await
    }
}
