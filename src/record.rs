// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Read-only data model for completed spans.
//!
//! Records are produced elsewhere, handed to the exporter as immutable
//! batches, and only ever read here to build their wire representation.

use serde::{Deserialize, Serialize};

/// 16-byte trace identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(pub [u8; 16]);

impl TraceId {
    /// The invalid all-zero identifier.
    pub const INVALID: Self = Self([0; 16]);

    /// True when any byte is non-zero.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 != [0; 16]
    }

    /// Raw bytes of the identifier.
    #[inline]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// 8-byte span identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanId(pub [u8; 8]);

impl SpanId {
    /// The invalid all-zero identifier.
    pub const INVALID: Self = Self([0; 8]);

    /// True when any byte is non-zero.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 != [0; 8]
    }

    /// Raw bytes of the identifier.
    #[inline]
    pub fn to_bytes(self) -> [u8; 8] {
        self.0
    }
}

impl std::fmt::Display for SpanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Role a span plays in a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanKind {
    /// An operation internal to an application.
    #[default]
    Internal,
    /// Handling of a synchronous request from a remote caller.
    Server,
    /// A synchronous outgoing request to a remote service.
    Client,
    /// Creation of a message for asynchronous processing.
    Producer,
    /// Processing of an asynchronously produced message.
    Consumer,
}

/// Machine-readable outcome of a completed span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// No status was recorded.
    #[default]
    Unset,
    /// The operation completed successfully.
    Ok,
    /// The operation failed.
    Error,
}

/// Terminal status of a completed span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanStatus {
    /// Machine-readable status code.
    pub code: StatusCode,
    /// Human-readable description, meaningful when `code` is `Error`.
    pub message: String,
}

impl SpanStatus {
    /// Status with code `Ok` and no message.
    pub fn ok() -> Self {
        Self {
            code: StatusCode::Ok,
            message: String::new(),
        }
    }

    /// Status with code `Error` and the given description.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::Error,
            message: message.into(),
        }
    }
}

/// Value of a span, event, or link attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    I64(i64),
    /// Floating point value.
    F64(f64),
    /// UTF-8 string value.
    String(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// A named attribute attached to a span, event, or link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: AttributeValue,
}

impl KeyValue {
    /// Attribute with the given name and value.
    pub fn new(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A timestamped event recorded during a span's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanEvent {
    /// Event name.
    pub name: String,
    /// Time of the event, in nanoseconds since the Unix epoch.
    pub time_unix_nano: u64,
    /// Attributes attached to the event.
    pub attributes: Vec<KeyValue>,
}

/// A causal reference from one span to another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanLink {
    /// Trace identifier of the linked span.
    pub trace_id: TraceId,
    /// Span identifier of the linked span.
    pub span_id: SpanId,
    /// Attributes attached to the link.
    pub attributes: Vec<KeyValue>,
}

/// An immutable, completed span ready for export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Trace this span belongs to.
    pub trace_id: TraceId,
    /// Identifier of this span within its trace.
    pub span_id: SpanId,
    /// Identifier of the parent span; `None` for a root span.
    pub parent_span_id: Option<SpanId>,
    /// Operation name.
    pub name: String,
    /// Role the span plays in the trace.
    pub kind: SpanKind,
    /// Start time, in nanoseconds since the Unix epoch.
    pub start_time_unix_nano: u64,
    /// End time, in nanoseconds since the Unix epoch.
    pub end_time_unix_nano: u64,
    /// Attributes recorded on the span.
    pub attributes: Vec<KeyValue>,
    /// Events recorded during the span's lifetime.
    pub events: Vec<SpanEvent>,
    /// Links to causally related spans.
    pub links: Vec<SpanLink>,
    /// Terminal status.
    pub status: SpanStatus,
}

impl SpanRecord {
    /// Record with the given identity and name; every other field empty.
    pub fn new(trace_id: TraceId, span_id: SpanId, name: impl Into<String>) -> Self {
        Self {
            trace_id,
            span_id,
            name: name.into(),
            ..Self::default()
        }
    }
}
