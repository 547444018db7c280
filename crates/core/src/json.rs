//! JSON interop for the Folio value model
//!
//! JSON is a strict subset of the value model (no Bytes), so conversion
//! from `serde_json::Value` is total. Numbers map to `Int` when they fit
//! an `i64`, otherwise `Float`. Conversion back drops nothing except
//! `Bytes`, which renders as an array of numbers.
//!
//! Mostly used by tests and embedders to construct documents tersely via
//! `serde_json::json!`.

use crate::document::{DocId, Document, ID_FIELD};
use crate::value::Value;
use std::collections::BTreeMap;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(serde_json::Value::Null, Into::into)
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(bytes) => {
                serde_json::Value::Array(bytes.iter().map(|b| (*b).into()).collect())
            }
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Document {
    /// Build a document from a JSON object
    ///
    /// A literal `_id` entry in the JSON is dropped in favor of the
    /// caller-supplied id, per the reserved-name rule.
    pub fn from_json(id: impl Into<DocId>, json: serde_json::Value) -> Self {
        let mut doc = Document::new(id);
        if let serde_json::Value::Object(map) = json {
            for (field, value) in map {
                if field != ID_FIELD {
                    doc.insert(field, Value::from(value));
                }
            }
        }
        doc
    }
}
