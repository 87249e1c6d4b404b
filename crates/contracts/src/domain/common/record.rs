use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field used to identify a record inside a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    /// Backend document id: `_id`, falling back to `id`.
    DocumentId,
    /// Natural key, e.g. `metal_type` for metals.
    Natural(&'static str),
}

/// One domain entity as returned by the API.
///
/// The admin never enforces a schema on records: they are kept as the raw
/// JSON object and only inspected for identity, display and status fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value; anything other than an object yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identity of the record as a string, numbers included.
    pub fn identity(&self, field: IdentityField) -> Option<String> {
        let value = match field {
            IdentityField::DocumentId => self.get("_id").or_else(|| self.get("id")),
            IdentityField::Natural(name) => self.get(name),
        }?;
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Text shown in a table cell for `field`; missing and null fields are empty.
    pub fn display(&self, field: &str) -> String {
        self.get(field).map(display_value).unwrap_or_default()
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn bool_field(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn f64_field(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Case-insensitive substring match over every field of the record.
    ///
    /// Columns play no role here: a value that is never rendered still matches.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.0
            .values()
            .any(|v| display_value(v).to_lowercase().contains(&needle))
    }

    /// Shallow merge: every field of `patch` overwrites the same field here.
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in patch.0.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// String form of a JSON value as shown to the user.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn identity_prefers_document_id() {
        let r = record(json!({"_id": "abc", "id": 7}));
        assert_eq!(r.identity(IdentityField::DocumentId).as_deref(), Some("abc"));

        let r = record(json!({"id": 7}));
        assert_eq!(r.identity(IdentityField::DocumentId).as_deref(), Some("7"));

        let r = record(json!({"metal_type": "18K Gold", "_id": "x"}));
        assert_eq!(
            r.identity(IdentityField::Natural("metal_type")).as_deref(),
            Some("18K Gold")
        );
    }

    #[test]
    fn identity_missing_or_empty() {
        assert_eq!(record(json!({})).identity(IdentityField::DocumentId), None);
        assert_eq!(
            record(json!({"_id": ""})).identity(IdentityField::DocumentId),
            None
        );
    }

    #[test]
    fn display_values() {
        let r = record(json!({"s": "x", "n": 1.5, "b": false, "z": null, "a": [1, 2]}));
        assert_eq!(r.display("s"), "x");
        assert_eq!(r.display("n"), "1.5");
        assert_eq!(r.display("b"), "false");
        assert_eq!(r.display("z"), "");
        assert_eq!(r.display("a"), "[1,2]");
        assert_eq!(r.display("missing"), "");
    }

    #[test]
    fn search_scans_every_field() {
        let r = record(json!({"sku": "DIA-001", "certNumber": "GIA-778812"}));
        assert!(r.matches_search("778812"));
        assert!(r.matches_search("dia-0"));
        assert!(!r.matches_search("nothing"));
        assert!(r.matches_search(""));
    }

    #[test]
    fn merge_overwrites_only_patched_fields() {
        let mut r = record(json!({"_id": "1", "sku": "A", "active": true}));
        r.merge(&record(json!({"active": false})));
        assert_eq!(r, record(json!({"_id": "1", "sku": "A", "active": false})));
    }

    #[test]
    fn numeric_field_accepts_strings() {
        let r = record(json!({"price": "12.5", "stock": 3}));
        assert_eq!(r.f64_field("price"), Some(12.5));
        assert_eq!(r.f64_field("stock"), Some(3.0));
    }
}
