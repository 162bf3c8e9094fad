// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Debug transport that writes wire spans to a local sink.
//!
//! The connection-less counterpart of a network client, useful in demos and
//! tests: each uploaded span becomes one JSON document on the configured
//! writer, standard output by default.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::TraceClient;
use crate::context::ExportContext;
use crate::error::{Error, Result};
use crate::wire::WireSpan;

/// Configuration for [`StdoutClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StdoutConfig {
    /// Pretty-print each span instead of emitting one compact line.
    #[serde(default)]
    pub pretty: bool,

    /// Include span timestamps in the output.
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

impl Default for StdoutConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            timestamps: true,
        }
    }
}

impl StdoutConfig {
    /// Enable pretty-printed output.
    #[must_use]
    pub fn with_pretty_print(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Omit span timestamps from the output.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }
}

fn default_timestamps() -> bool {
    true
}

/// [`TraceClient`] that writes spans to an injected writer.
pub struct StdoutClient<W: Write + Send = std::io::Stdout> {
    writer: Mutex<W>,
    config: StdoutConfig,
}

impl StdoutClient<std::io::Stdout> {
    /// Client writing to standard output.
    pub fn new(config: StdoutConfig) -> Self {
        Self::with_writer(std::io::stdout(), config)
    }
}

impl<W: Write + Send> StdoutClient<W> {
    /// Client writing to `writer`.
    pub fn with_writer(writer: W, config: StdoutConfig) -> Self {
        Self {
            writer: Mutex::new(writer),
            config,
        }
    }

    fn render(&self, span: &WireSpan) -> Result<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(span).map_err(Error::transport)
        } else {
            serde_json::to_string(span).map_err(Error::transport)
        }
    }
}

#[async_trait]
impl<W: Write + Send> TraceClient for StdoutClient<W> {
    async fn start(&self, cx: &ExportContext) -> Result<()> {
        // Connection-less transport; only the context can fail this.
        if cx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    async fn upload_traces(&self, cx: &ExportContext, spans: Vec<WireSpan>) -> Result<()> {
        if cx.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        for mut span in spans {
            if !self.config.timestamps {
                span.start_time_unix_nano = 0;
                span.end_time_unix_nano = 0;
            }
            let rendered = self.render(&span)?;
            writeln!(writer, "{rendered}").map_err(Error::transport)?;
        }
        writer.flush().map_err(Error::transport)
    }

    async fn stop(&self, cx: &ExportContext) -> Result<()> {
        if cx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush().map_err(Error::transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SpanId, SpanRecord, TraceId};
    use crate::transform;
    use std::sync::Arc;

    /// Writer handle that keeps the written bytes inspectable by the test.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn wire_batch(names: &[&str]) -> Vec<WireSpan> {
        let records: Vec<SpanRecord> = names
            .iter()
            .map(|name| {
                let mut record = SpanRecord::new(TraceId([1; 16]), SpanId([2; 8]), *name);
                record.start_time_unix_nano = 11;
                record.end_time_unix_nano = 22;
                record
            })
            .collect();
        transform::spans(&records)
    }

    #[tokio::test]
    async fn test_each_span_becomes_one_json_line() {
        let buf = SharedBuf::default();
        let client = StdoutClient::with_writer(buf.clone(), StdoutConfig::default());
        let cx = ExportContext::background();

        client
            .upload_traces(&cx, wire_batch(&["alpha", "beta"]))
            .await
            .unwrap();

        let contents = buf.contents();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "alpha");
        assert_eq!(first["start_time_unix_nano"], 11);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["name"], "beta");
    }

    #[tokio::test]
    async fn test_without_timestamps_zeroes_span_times() {
        let buf = SharedBuf::default();
        let config = StdoutConfig::default().without_timestamps();
        let client = StdoutClient::with_writer(buf.clone(), config);
        let cx = ExportContext::background();

        client.upload_traces(&cx, wire_batch(&["quiet"])).await.unwrap();

        let contents = buf.contents();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["start_time_unix_nano"], 0);
        assert_eq!(line["end_time_unix_nano"], 0);
    }

    #[tokio::test]
    async fn test_cancelled_context_rejects_upload() {
        let buf = SharedBuf::default();
        let client = StdoutClient::with_writer(buf.clone(), StdoutConfig::default());
        let cx = ExportContext::background();
        cx.cancel();

        let result = client.upload_traces(&cx, wire_batch(&["late"])).await;
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn test_config_parses_with_defaults() {
        let config: StdoutConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.pretty);
        assert!(config.timestamps);

        let config: StdoutConfig =
            serde_json::from_str(r#"{"pretty": true, "timestamps": false}"#).unwrap();
        assert!(config.pretty);
        assert!(!config.timestamps);
    }
}
