//! Mergeable key/value documents.
//!
//! Every partial result in the pipeline is a JSON object. Combining two of
//! them is a recursive key-wise union: nested objects merge, anything else is
//! replaced by the incoming value. This is the only way concurrently produced
//! partial states are combined.

use serde_json::{Map, Value};

/// A JSON object used as a mergeable document
pub type Document = Map<String, Value>;

/// Merge `update` into `base` in place.
///
/// For each key in `update`: if both sides hold an object, merge recursively;
/// otherwise the value from `update` replaces the one in `base`. Keys absent
/// from `update` are untouched, so merging an empty document is a no-op.
pub fn merge(base: &mut Document, update: Document) {
    for (key, value) in update {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = base.get_mut(&key) {
                merge(existing, incoming);
                continue;
            }
            base.insert(key, Value::Object(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

/// Non-destructive variant of [`merge`]
pub fn merged(base: &Document, update: &Document) -> Document {
    let mut out = base.clone();
    merge(&mut out, update.clone());
    out
}

/// Build a single-key document: `{ key: value }`
pub fn single(key: impl Into<String>, value: Value) -> Document {
    let mut doc = Document::new();
    doc.insert(key.into(), value);
    doc
}

/// Build the nested document `{ outer: { inner: value } }`
pub fn nested(outer: impl Into<String>, inner: impl Into<String>, value: Value) -> Document {
    single(outer, Value::Object(single(inner, value)))
}

/// Interpret a JSON value as a document, treating non-objects as empty
pub fn as_document(value: Option<&Value>) -> Document {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Document::new(),
    }
}
