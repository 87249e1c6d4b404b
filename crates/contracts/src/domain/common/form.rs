//! Field specs of the record editor and the conversion between a record and
//! the flat string values the inputs edit.

use super::field_option::FieldOption;
use super::record::{display_value, Record};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat editor state: field name -> text as typed.
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    /// `YYYY-MM-DD`; timestamps coming from the backend are cut to the date.
    Date,
    Checkbox,
    Select(Vec<FieldOption>),
    /// Comma separated input stored as a JSON array of strings.
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: &'static str,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            default: "",
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    pub fn select(name: &'static str, label: &'static str, options: Vec<FieldOption>) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: &'static str) -> Self {
        self.default = value;
        self
    }
}

/// Replaces the options of the select named `name`. Used for option lists
/// loaded at runtime (diamond shapes, colors).
pub fn set_options(specs: &mut [FieldSpec], name: &str, options: Vec<FieldOption>) {
    if let Some(spec) = specs.iter_mut().find(|s| s.name == name) {
        spec.kind = FieldKind::Select(options);
    }
}

/// Initial editor values: defaults for a new record, the record's fields
/// otherwise.
pub fn form_values(specs: &[FieldSpec], record: Option<&Record>) -> FormValues {
    specs
        .iter()
        .map(|spec| {
            let value = record
                .and_then(|r| r.get(spec.name))
                .filter(|v| !v.is_null())
                .map(|v| field_text(&spec.kind, v))
                .unwrap_or_else(|| spec.default.to_string());
            (spec.name.to_string(), value)
        })
        .collect()
}

fn field_text(kind: &FieldKind, value: &Value) -> String {
    match (kind, value) {
        (FieldKind::List, Value::Array(items)) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        (FieldKind::Date, Value::String(s)) => s.split('T').next().unwrap_or_default().to_string(),
        // Populated references (`shape: {_id, code, label}`) select by id.
        (FieldKind::Select(_), Value::Object(_)) => {
            FieldOption::from(value.clone()).value().to_string()
        }
        _ => display_value(value),
    }
}

/// Labels of required fields left blank.
pub fn missing_required(specs: &[FieldSpec], values: &FormValues) -> Vec<&'static str> {
    specs
        .iter()
        .filter(|spec| spec.required && !matches!(spec.kind, FieldKind::Checkbox))
        .filter(|spec| {
            values
                .get(spec.name)
                .map_or(true, |v| v.trim().is_empty())
        })
        .map(|spec| spec.label)
        .collect()
}

/// Typed request payload. Blank optional numbers are left out so an update
/// does not overwrite them with zero.
pub fn build_payload(specs: &[FieldSpec], values: &FormValues) -> Record {
    let mut payload = Record::new();
    for spec in specs {
        let raw = values.get(spec.name).map(String::as_str).unwrap_or_default();
        let value = match &spec.kind {
            FieldKind::Checkbox => Value::Bool(raw == "true"),
            FieldKind::Number => match parse_number(raw) {
                Some(n) => n,
                None => continue,
            },
            FieldKind::List => Value::Array(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| Value::String(s.to_string()))
                    .collect(),
            ),
            FieldKind::Date if raw.trim().is_empty() => continue,
            _ => Value::String(raw.to_string()),
        };
        payload.set(spec.name, value);
    }
    payload
}

fn parse_number(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("productSku", "Product SKU").required(),
            FieldSpec::number("defaultPrice", "Base Price").required(),
            FieldSpec::number("discountPercent", "Discount (%)").default_value("0"),
            FieldSpec::new("availableShapes", "Available Shapes", FieldKind::List),
            FieldSpec::new("delivery_date", "Delivery", FieldKind::Date),
            FieldSpec::checkbox("active", "Active").default_value("true"),
        ]
    }

    #[test]
    fn defaults_for_new_record() {
        let values = form_values(&specs(), None);
        assert_eq!(values["discountPercent"], "0");
        assert_eq!(values["active"], "true");
        assert_eq!(values["productSku"], "");
    }

    #[test]
    fn existing_record_is_flattened() {
        let record = Record::from_value(json!({
            "productSku": "RING-001",
            "defaultPrice": 1500,
            "availableShapes": ["Round", "Oval"],
            "delivery_date": "2024-05-01T00:00:00.000Z",
            "active": false,
            "shape": {"_id": "s1", "code": "RD", "label": "Round"}
        }))
        .unwrap();
        let values = form_values(&specs(), Some(&record));
        assert_eq!(values["defaultPrice"], "1500");
        assert_eq!(values["availableShapes"], "Round, Oval");
        assert_eq!(values["delivery_date"], "2024-05-01");
        assert_eq!(values["active"], "false");

        let shape = [FieldSpec::select("shape", "Shape", Vec::new())];
        assert_eq!(form_values(&shape, Some(&record))["shape"], "s1");
    }

    #[test]
    fn required_fields_are_reported() {
        let mut values = form_values(&specs(), None);
        values.insert("defaultPrice".into(), "  ".into());
        assert_eq!(
            missing_required(&specs(), &values),
            vec!["Product SKU", "Base Price"]
        );
    }

    #[test]
    fn payload_types() {
        let mut values = form_values(&specs(), None);
        values.insert("productSku".into(), "RING-002".into());
        values.insert("defaultPrice".into(), "99.5".into());
        values.insert("availableShapes".into(), "Round, , Pear ".into());
        let payload = build_payload(&specs(), &values);
        assert_eq!(
            payload.into_value(),
            json!({
                "productSku": "RING-002",
                "defaultPrice": 99.5,
                "discountPercent": 0,
                "availableShapes": ["Round", "Pear"],
                "active": true
            })
        );
    }

    #[test]
    fn runtime_options_replace_select() {
        let mut specs = vec![FieldSpec::select("shape", "Shape", Vec::new())];
        set_options(&mut specs, "shape", FieldOption::plain_list(&["Round"]));
        assert_eq!(
            specs[0].kind,
            FieldKind::Select(vec![FieldOption::Plain("Round".into())])
        );
    }
}
