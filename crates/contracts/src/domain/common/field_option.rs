use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Choice offered by a select input.
///
/// Option lists arrive either as plain strings (`["D", "E"]`) or as objects
/// (`{_id, code, label}`); both are resolved once when deserialized. For
/// objects the value is `value`, then `_id`, then `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldOption {
    Plain(String),
    Labeled { value: String, label: String },
}

impl FieldOption {
    pub fn labeled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Labeled {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Plain(v) => v,
            Self::Labeled { value, .. } => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Plain(v) => v,
            Self::Labeled { label, .. } => label,
        }
    }

    pub fn plain_list(values: &[&str]) -> Vec<Self> {
        values.iter().map(|v| Self::Plain((*v).to_string())).collect()
    }
}

impl From<Value> for FieldOption {
    fn from(value: Value) -> Self {
        fn text(v: Option<&Value>) -> Option<String> {
            match v? {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        }

        match value {
            Value::Object(map) => {
                let value = text(map.get("value"))
                    .or_else(|| text(map.get("_id")))
                    .or_else(|| text(map.get("code")))
                    .unwrap_or_default();
                let label = text(map.get("label"))
                    .or_else(|| text(map.get("code")))
                    .or_else(|| text(map.get("name")))
                    .unwrap_or_else(|| value.clone());
                Self::Labeled { value, label }
            }
            Value::String(s) => Self::Plain(s),
            Value::Null => Self::Plain(String::new()),
            other => Self::Plain(other.to_string()),
        }
    }
}

impl From<FieldOption> for Value {
    fn from(option: FieldOption) -> Self {
        match option {
            FieldOption::Plain(v) => Value::String(v),
            FieldOption::Labeled { value, label } => {
                serde_json::json!({ "value": value, "label": label })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_option_lists() {
        let options: Vec<FieldOption> = serde_json::from_str(
            r#"["D", {"_id": "1", "code": "RD", "label": "Round"}, {"_id": "2", "name": "Oval"}]"#,
        )
        .unwrap();
        assert_eq!(options[0], FieldOption::Plain("D".into()));
        assert_eq!(options[1], FieldOption::labeled("1", "Round"));
        assert_eq!(options[2].value(), "2");
        assert_eq!(options[2].label(), "Oval");
    }

    #[test]
    fn plain_value_is_its_own_label() {
        let option = FieldOption::Plain("VS1".into());
        assert_eq!(option.value(), option.label());
    }
}
