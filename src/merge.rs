//! Deep merge with array union
//!
//! Rules, applied recursively:
//! - objects merge key by key, keys only present in the incoming value are added;
//! - two arrays merge into the existing array followed by every incoming
//!   element not already present, in first-seen order;
//! - an array meeting a non-array is a type mismatch: the existing value is
//!   kept and a [`MergeAnomaly`] is recorded;
//! - any other conflict keeps the existing value.
//!
//! Merging a value with itself is a no-op, so overlapping batches merge
//! idempotently.

use crate::tree::{Entry, Group};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// A recoverable merge conflict: the existing value was kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeAnomaly {
    /// Where the conflict happened (entry id, then dotted keys)
    pub path: String,
    pub kept: String,
    pub discarded: String,
}

impl fmt::Display for MergeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type mismatch at {}: kept {}, discarded {}",
            self.path, self.kept, self.discarded
        )
    }
}

/// Collects anomalies raised during one or more merges
#[derive(Debug, Default)]
pub struct MergeLog {
    anomalies: Vec<MergeAnomaly>,
}

impl MergeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: &str, kept: impl Into<String>, discarded: impl Into<String>) {
        let anomaly = MergeAnomaly {
            path: path.to_string(),
            kept: kept.into(),
            discarded: discarded.into(),
        };
        warn!(path = %anomaly.path, kept = %anomaly.kept, discarded = %anomaly.discarded, "Merge type mismatch, keeping existing value");
        self.anomalies.push(anomaly);
    }

    pub fn anomalies(&self) -> &[MergeAnomaly] {
        &self.anomalies
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn into_anomalies(self) -> Vec<MergeAnomaly> {
        self.anomalies
    }
}

/// Structural merge of an incoming value into an existing one
pub trait Merge {
    /// Merge `incoming` into `self`. `path` locates `self` for diagnostics.
    fn merge_from(&mut self, incoming: Self, path: &str, log: &mut MergeLog);
}

/// Merge two values, returning the result and any anomalies
pub fn merge<T: Merge>(mut existing: T, incoming: T) -> (T, Vec<MergeAnomaly>) {
    let mut log = MergeLog::new();
    existing.merge_from(incoming, "", &mut log);
    (existing, log.into_anomalies())
}

/// Append each incoming element not already present
pub fn union_into<T: PartialEq>(existing: &mut Vec<T>, incoming: impl IntoIterator<Item = T>) {
    for item in incoming {
        if !existing.contains(&item) {
            existing.push(item);
        }
    }
}

impl<T: PartialEq> Merge for Vec<T> {
    fn merge_from(&mut self, incoming: Self, _path: &str, _log: &mut MergeLog) {
        union_into(self, incoming);
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

impl Merge for Value {
    fn merge_from(&mut self, incoming: Self, path: &str, log: &mut MergeLog) {
        match (self, incoming) {
            (Value::Object(existing), Value::Object(incoming)) => {
                for (key, value) in incoming {
                    match existing.get_mut(&key) {
                        Some(current) => current.merge_from(value, &child_path(path, &key), log),
                        None => {
                            existing.insert(key, value);
                        }
                    }
                }
            }
            (Value::Array(existing), Value::Array(incoming)) => union_into(existing, incoming),
            (existing, incoming) if existing.is_array() || incoming.is_array() => {
                log.record(path, value_type(existing), value_type(&incoming));
            }
            // Scalars and object/scalar conflicts: existing wins
            _ => {}
        }
    }
}

impl Merge for Group {
    /// Children are unioned. A group holding leaves in any registration stays a
    /// component (and likewise for root). Other fields are derived from the id
    /// and keep their existing values; a differing parent means two paths
    /// sanitized to the same id and is recorded.
    fn merge_from(&mut self, incoming: Self, path: &str, log: &mut MergeLog) {
        if self.parent != incoming.parent {
            log.record(
                &child_path(path, "parent"),
                format!("{:?}", self.parent),
                format!("{:?}", incoming.parent),
            );
        }
        union_into(&mut self.children, incoming.children);
        self.is_component |= incoming.is_component;
        self.is_root |= incoming.is_root;
    }
}

impl Merge for Entry {
    fn merge_from(&mut self, incoming: Self, path: &str, log: &mut MergeLog) {
        match (self, incoming) {
            (Entry::Group(existing), Entry::Group(incoming)) => {
                existing.merge_from(incoming, path, log)
            }
            (existing, incoming) => {
                let kept = existing.kind_label();
                log.record(path, kept, incoming.kind_label());
            }
        }
    }
}
