// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Transport representation of completed spans.
//!
//! The shapes mirror the OTLP span protobuf so any protobuf-speaking
//! transport can frame these messages directly. Serde derives exist for
//! transports that render spans as text instead, such as the stdout client.

use serde::{Deserialize, Serialize};

/// Wire form of a single completed span.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WireSpan {
    /// 16-byte trace identifier.
    #[prost(bytes = "vec", tag = "1")]
    pub trace_id: Vec<u8>,
    /// 8-byte span identifier.
    #[prost(bytes = "vec", tag = "2")]
    pub span_id: Vec<u8>,
    /// Parent span identifier; empty for a root span.
    #[prost(bytes = "vec", tag = "3")]
    pub parent_span_id: Vec<u8>,
    /// Operation name.
    #[prost(string, tag = "4")]
    pub name: String,
    /// Span kind, as a [`WireSpanKind`] discriminant.
    #[prost(enumeration = "WireSpanKind", tag = "5")]
    pub kind: i32,
    /// Start time, in nanoseconds since the Unix epoch.
    #[prost(fixed64, tag = "6")]
    pub start_time_unix_nano: u64,
    /// End time, in nanoseconds since the Unix epoch.
    #[prost(fixed64, tag = "7")]
    pub end_time_unix_nano: u64,
    /// Attributes recorded on the span.
    #[prost(message, repeated, tag = "8")]
    pub attributes: Vec<WireKeyValue>,
    /// Events recorded during the span's lifetime.
    #[prost(message, repeated, tag = "9")]
    pub events: Vec<WireEvent>,
    /// Links to causally related spans.
    #[prost(message, repeated, tag = "10")]
    pub links: Vec<WireLink>,
    /// Terminal status.
    #[prost(message, optional, tag = "11")]
    pub status: Option<WireStatus>,
}

/// Wire form of the span kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration, Serialize,
    Deserialize,
)]
#[repr(i32)]
pub enum WireSpanKind {
    /// Kind was not specified.
    Unspecified = 0,
    /// An operation internal to an application.
    Internal = 1,
    /// Handling of a synchronous request from a remote caller.
    Server = 2,
    /// A synchronous outgoing request to a remote service.
    Client = 3,
    /// Creation of a message for asynchronous processing.
    Producer = 4,
    /// Processing of an asynchronously produced message.
    Consumer = 5,
}

/// Wire form of a named attribute.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WireKeyValue {
    /// Attribute name.
    #[prost(string, tag = "1")]
    pub key: String,
    /// Attribute value.
    #[prost(message, optional, tag = "2")]
    pub value: Option<WireAnyValue>,
}

/// Wire form of an attribute value.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WireAnyValue {
    /// The populated value variant.
    #[prost(oneof = "wire_any_value::Value", tags = "1, 2, 3, 4")]
    pub value: Option<wire_any_value::Value>,
}

/// Value variants for [`WireAnyValue`].
pub mod wire_any_value {
    use serde::{Deserialize, Serialize};

    /// One-of payload of an attribute value.
    #[derive(Clone, PartialEq, prost::Oneof, Serialize, Deserialize)]
    pub enum Value {
        /// UTF-8 string value.
        #[prost(string, tag = "1")]
        StringValue(String),
        /// Boolean value.
        #[prost(bool, tag = "2")]
        BoolValue(bool),
        /// Signed integer value.
        #[prost(int64, tag = "3")]
        IntValue(i64),
        /// Floating point value.
        #[prost(double, tag = "4")]
        DoubleValue(f64),
    }
}

/// Wire form of a timestamped span event.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WireEvent {
    /// Time of the event, in nanoseconds since the Unix epoch.
    #[prost(fixed64, tag = "1")]
    pub time_unix_nano: u64,
    /// Event name.
    #[prost(string, tag = "2")]
    pub name: String,
    /// Attributes attached to the event.
    #[prost(message, repeated, tag = "3")]
    pub attributes: Vec<WireKeyValue>,
}

/// Wire form of a causal link to another span.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WireLink {
    /// Trace identifier of the linked span.
    #[prost(bytes = "vec", tag = "1")]
    pub trace_id: Vec<u8>,
    /// Span identifier of the linked span.
    #[prost(bytes = "vec", tag = "2")]
    pub span_id: Vec<u8>,
    /// Attributes attached to the link.
    #[prost(message, repeated, tag = "3")]
    pub attributes: Vec<WireKeyValue>,
}

/// Wire form of a span's terminal status.
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
pub struct WireStatus {
    /// Human-readable description.
    #[prost(string, tag = "2")]
    pub message: String,
    /// Status code, as a [`WireStatusCode`] discriminant.
    #[prost(enumeration = "WireStatusCode", tag = "3")]
    pub code: i32,
}

/// Wire form of the span status code.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration, Serialize,
    Deserialize,
)]
#[repr(i32)]
pub enum WireStatusCode {
    /// No status was recorded.
    Unset = 0,
    /// The operation completed successfully.
    Ok = 1,
    /// The operation failed.
    Error = 2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_wire_span_round_trips_through_protobuf() {
        let span = WireSpan {
            trace_id: vec![1; 16],
            span_id: vec![2; 8],
            parent_span_id: Vec::new(),
            name: "lookup".to_owned(),
            kind: WireSpanKind::Client as i32,
            start_time_unix_nano: 10,
            end_time_unix_nano: 20,
            attributes: vec![WireKeyValue {
                key: "peer".to_owned(),
                value: Some(WireAnyValue {
                    value: Some(wire_any_value::Value::StringValue("db".to_owned())),
                }),
            }],
            events: Vec::new(),
            links: Vec::new(),
            status: Some(WireStatus {
                message: String::new(),
                code: WireStatusCode::Ok as i32,
            }),
        };

        let bytes = span.encode_to_vec();
        let decoded = WireSpan::decode(bytes.as_slice()).expect("decode");
        assert_eq!(decoded, span);
        assert_eq!(decoded.kind(), WireSpanKind::Client);
        assert_eq!(decoded.status.as_ref().map(WireStatus::code), Some(WireStatusCode::Ok));
    }

    #[test]
    fn test_unknown_kind_discriminant_reads_as_unspecified() {
        let span = WireSpan {
            kind: 42,
            ..WireSpan::default()
        };
        assert_eq!(span.kind(), WireSpanKind::Unspecified);
    }
}
