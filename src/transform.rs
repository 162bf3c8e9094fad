// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Pure mapping from completed spans to their wire representation.
//!
//! Stateless and order-preserving: the n-th input record always becomes the
//! n-th output span. An empty input yields an empty output; there are no
//! failure modes. Malformed records are the producer's responsibility.

use crate::record::{
    AttributeValue, KeyValue, SpanEvent, SpanKind, SpanLink, SpanRecord, SpanStatus, StatusCode,
};
use crate::wire::{
    wire_any_value, WireAnyValue, WireEvent, WireKeyValue, WireLink, WireSpan, WireSpanKind,
    WireStatus, WireStatusCode,
};

/// Map a batch of completed spans to wire spans, order preserved.
pub fn spans(records: &[SpanRecord]) -> Vec<WireSpan> {
    records.iter().map(span).collect()
}

/// Map a single completed span.
pub fn span(record: &SpanRecord) -> WireSpan {
    WireSpan {
        trace_id: record.trace_id.to_bytes().to_vec(),
        span_id: record.span_id.to_bytes().to_vec(),
        parent_span_id: record
            .parent_span_id
            .map(|id| id.to_bytes().to_vec())
            .unwrap_or_default(),
        name: record.name.clone(),
        kind: kind(record.kind) as i32,
        start_time_unix_nano: record.start_time_unix_nano,
        end_time_unix_nano: record.end_time_unix_nano,
        attributes: attributes(&record.attributes),
        events: record.events.iter().map(event).collect(),
        links: record.links.iter().map(link).collect(),
        status: Some(status(&record.status)),
    }
}

fn kind(kind: SpanKind) -> WireSpanKind {
    match kind {
        SpanKind::Internal => WireSpanKind::Internal,
        SpanKind::Server => WireSpanKind::Server,
        SpanKind::Client => WireSpanKind::Client,
        SpanKind::Producer => WireSpanKind::Producer,
        SpanKind::Consumer => WireSpanKind::Consumer,
    }
}

fn attributes(attrs: &[KeyValue]) -> Vec<WireKeyValue> {
    attrs
        .iter()
        .map(|kv| WireKeyValue {
            key: kv.key.clone(),
            value: Some(value(&kv.value)),
        })
        .collect()
}

fn value(value: &AttributeValue) -> WireAnyValue {
    let value = match value {
        AttributeValue::Bool(v) => wire_any_value::Value::BoolValue(*v),
        AttributeValue::I64(v) => wire_any_value::Value::IntValue(*v),
        AttributeValue::F64(v) => wire_any_value::Value::DoubleValue(*v),
        AttributeValue::String(v) => wire_any_value::Value::StringValue(v.clone()),
    };
    WireAnyValue { value: Some(value) }
}

fn event(event: &SpanEvent) -> WireEvent {
    WireEvent {
        time_unix_nano: event.time_unix_nano,
        name: event.name.clone(),
        attributes: attributes(&event.attributes),
    }
}

fn link(link: &SpanLink) -> WireLink {
    WireLink {
        trace_id: link.trace_id.to_bytes().to_vec(),
        span_id: link.span_id.to_bytes().to_vec(),
        attributes: attributes(&link.attributes),
    }
}

fn status(status: &SpanStatus) -> WireStatus {
    let code = match status.code {
        StatusCode::Unset => WireStatusCode::Unset,
        StatusCode::Ok => WireStatusCode::Ok,
        StatusCode::Error => WireStatusCode::Error,
    };
    WireStatus {
        message: status.message.clone(),
        code: code as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SpanId, TraceId};

    fn record(name: &str) -> SpanRecord {
        SpanRecord::new(TraceId([7; 16]), SpanId([3; 8]), name)
    }

    #[test]
    fn test_empty_input_produces_empty_output() {
        assert!(spans(&[]).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let batch = [record("first"), record("second"), record("third")];
        let wire = spans(&batch);

        let names: Vec<_> = wire.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_root_span_has_empty_parent() {
        let wire = span(&record("root"));
        assert!(wire.parent_span_id.is_empty());
    }

    #[test]
    fn test_span_fields_map_onto_wire_span() {
        let mut input = record("handler");
        input.parent_span_id = Some(SpanId([9; 8]));
        input.kind = SpanKind::Server;
        input.start_time_unix_nano = 100;
        input.end_time_unix_nano = 250;
        input.attributes = vec![
            KeyValue::new("http.status_code", 500_i64),
            KeyValue::new("retryable", false),
        ];
        input.events = vec![SpanEvent {
            name: "exception".to_owned(),
            time_unix_nano: 180,
            attributes: vec![KeyValue::new("exception.type", "io")],
        }];
        input.links = vec![SpanLink {
            trace_id: TraceId([5; 16]),
            span_id: SpanId([6; 8]),
            attributes: Vec::new(),
        }];
        input.status = SpanStatus::error("boom");

        let wire = span(&input);

        assert_eq!(wire.trace_id, vec![7; 16]);
        assert_eq!(wire.span_id, vec![3; 8]);
        assert_eq!(wire.parent_span_id, vec![9; 8]);
        assert_eq!(wire.kind(), WireSpanKind::Server);
        assert_eq!(wire.start_time_unix_nano, 100);
        assert_eq!(wire.end_time_unix_nano, 250);

        assert_eq!(wire.attributes.len(), 2);
        assert_eq!(wire.attributes[0].key, "http.status_code");
        assert_eq!(
            wire.attributes[0].value.as_ref().and_then(|v| v.value.clone()),
            Some(wire_any_value::Value::IntValue(500))
        );
        assert_eq!(
            wire.attributes[1].value.as_ref().and_then(|v| v.value.clone()),
            Some(wire_any_value::Value::BoolValue(false))
        );

        assert_eq!(wire.events.len(), 1);
        assert_eq!(wire.events[0].name, "exception");
        assert_eq!(wire.events[0].time_unix_nano, 180);
        assert_eq!(wire.events[0].attributes.len(), 1);

        assert_eq!(wire.links.len(), 1);
        assert_eq!(wire.links[0].trace_id, vec![5; 16]);
        assert_eq!(wire.links[0].span_id, vec![6; 8]);

        let status = wire.status.expect("status");
        assert_eq!(status.code(), WireStatusCode::Error);
        assert_eq!(status.message, "boom");
    }
}
