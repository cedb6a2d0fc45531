use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ENTRY_POINTS_FIELD;

/// Metadata fields of one installed distribution.
///
/// An ordered mapping from field name to a scalar string or an ordered list
/// of strings. Field order is preserved through serialization (serde_json's
/// `preserve_order`), and replacing a value keeps the field's position.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct MetadataRecord {
    fields: Map<String, Value>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scalar value of a field, if it holds one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All string values of a field: one for a scalar, each element for a
    /// list, none when absent.
    pub fn values(&self, name: &str) -> Vec<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let _ = self
            .fields
            .insert(name.to_string(), Value::String(value.into()));
    }

    pub fn set_list(&mut self, name: &str, values: Vec<String>) {
        let list = values.into_iter().map(Value::String).collect();
        let _ = self.fields.insert(name.to_string(), Value::Array(list));
    }

    /// Append a console-script name to the record's entry-point list.
    pub fn push_entry_point(&mut self, script: &str) {
        match self.fields.get_mut(ENTRY_POINTS_FIELD) {
            Some(Value::Array(items)) => items.push(Value::String(script.to_string())),
            _ => self.set_list(ENTRY_POINTS_FIELD, vec![script.to_string()]),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
