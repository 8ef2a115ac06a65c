use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write;

use crate::constants::{TRACE_EVENT, TRACE_EVENT_TYPE, TRACE_HASH_LEN, TRACE_PERFORMED_BY};

/// Lifecycle event appended to a cooperative's traceability log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceabilityEntry {
    pub date: DateTime<Utc>,
    pub event: String,
    pub event_type: String,
    pub performed_by: String,
    /// Truncated SHA-256 of the record as it was before enhancement
    pub data_hash: String,
}

/// One element of the traceability log. Entries that predate this migration
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceabilityRecord {
    Entry(TraceabilityEntry),
    Prior(Value),
}

/// Prior log followed by the enhancement entry for `source`
pub fn extend_traceability(
    prior: &[Value],
    source: &Value,
    now: DateTime<Utc>,
) -> Vec<TraceabilityRecord> {
    let mut log: Vec<TraceabilityRecord> = prior
        .iter()
        .cloned()
        .map(TraceabilityRecord::Prior)
        .collect();

    log.push(TraceabilityRecord::Entry(TraceabilityEntry {
        date: now,
        event: TRACE_EVENT.to_string(),
        event_type: TRACE_EVENT_TYPE.to_string(),
        performed_by: TRACE_PERFORMED_BY.to_string(),
        data_hash: content_hash(source),
    }));

    log
}

/// First 16 hex characters of the SHA-256 of the canonical serialization
pub fn content_hash(value: &Value) -> String {
    let digest = Sha256::digest(canonical_json(value).as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(TRACE_HASH_LEN);
    hash
}

/// Serialize with sorted keys, `", "` and `": "` separators and every
/// non-ASCII character escaped as `\uXXXX`. Hashes computed by the legacy
/// migration tooling used this exact form.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_ascii_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_ascii_string(key, out);
                out.push_str(": ");
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

fn write_ascii_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}
