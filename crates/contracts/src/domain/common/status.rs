use super::record::Record;
use serde_json::Value;

/// Current value of a status column: a boolean flag (`active`) or the
/// two-valued `active`/`inactive` label used by coupons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Flag(bool),
    Label(String),
}

impl StatusValue {
    pub const ACTIVE: &'static str = "active";
    pub const INACTIVE: &'static str = "inactive";

    /// Value the toggle sends. Anything that is not `active` flips to `active`.
    pub fn complement(&self) -> Self {
        match self {
            Self::Flag(b) => Self::Flag(!b),
            Self::Label(label) if label == Self::ACTIVE => Self::Label(Self::INACTIVE.into()),
            Self::Label(_) => Self::Label(Self::ACTIVE.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Label(label) => label == Self::ACTIVE,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Flag(b) => Value::Bool(*b),
            Self::Label(label) => Value::String(label.clone()),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Flag(*b)),
            Value::String(s) => Some(Self::Label(s.clone())),
            _ => None,
        }
    }
}

/// How the backend expects a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRoute {
    /// `PATCH {base}/{id}/activate` or `.../deactivate`, no body.
    ActivateDeactivate,
    /// `PATCH {base}/{id}/status` with `{ <field>: <value> }`.
    StatusBody,
}

/// Status toggle capability of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusToggle {
    pub field: &'static str,
    pub route: StatusRoute,
    /// Wrapper key of the record in the toggle response, if the backend
    /// returns one.
    pub response_key: Option<&'static str>,
    pub labelled: bool,
}

impl StatusToggle {
    /// Reads the status of `record`; a missing field counts as inactive.
    pub fn current(&self, record: &Record) -> StatusValue {
        record
            .get(self.field)
            .and_then(StatusValue::from_json)
            .unwrap_or_else(|| {
                if self.labelled {
                    StatusValue::Label(StatusValue::INACTIVE.into())
                } else {
                    StatusValue::Flag(false)
                }
            })
    }

    /// Request body for the toggle call.
    pub fn request_body(&self, target: &StatusValue) -> Option<Value> {
        match self.route {
            StatusRoute::ActivateDeactivate => None,
            StatusRoute::StatusBody => {
                let mut body = serde_json::Map::new();
                body.insert(self.field.to_string(), target.to_json());
                Some(Value::Object(body))
            }
        }
    }

    /// Patch applied to the held record after a successful toggle.
    ///
    /// Only the status field is patched. The value confirmed by the backend
    /// wins over the requested one when the response carries it.
    pub fn patch_from_response(&self, body: &Value, target: &StatusValue) -> Record {
        let confirmed = self
            .response_key
            .and_then(|key| body.get(key))
            .unwrap_or(body)
            .get(self.field)
            .filter(|v| StatusValue::from_json(v).is_some())
            .cloned()
            .unwrap_or_else(|| target.to_json());
        Record::new().with(self.field, confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FLAG: StatusToggle = StatusToggle {
        field: "active",
        route: StatusRoute::ActivateDeactivate,
        response_key: Some("diamond"),
        labelled: false,
    };

    const LABEL: StatusToggle = StatusToggle {
        field: "status",
        route: StatusRoute::StatusBody,
        response_key: Some("coupon"),
        labelled: true,
    };

    #[test]
    fn complement_flips_both_kinds() {
        assert_eq!(StatusValue::Flag(true).complement(), StatusValue::Flag(false));
        assert_eq!(
            StatusValue::Label("active".into()).complement(),
            StatusValue::Label("inactive".into())
        );
        assert_eq!(
            StatusValue::Label("expired".into()).complement(),
            StatusValue::Label("active".into())
        );
    }

    #[test]
    fn current_defaults_to_inactive() {
        let empty = Record::new();
        assert_eq!(FLAG.current(&empty), StatusValue::Flag(false));
        assert_eq!(LABEL.current(&empty), StatusValue::Label("inactive".into()));
    }

    #[test]
    fn request_body_only_for_status_route() {
        assert_eq!(FLAG.request_body(&StatusValue::Flag(true)), None);
        assert_eq!(
            LABEL.request_body(&StatusValue::Label("inactive".into())),
            Some(json!({"status": "inactive"}))
        );
    }

    #[test]
    fn patch_contains_only_status_field() {
        let body = json!({"diamond": {"_id": "d1", "active": true, "price": 999}});
        let patch = FLAG.patch_from_response(&body, &StatusValue::Flag(true));
        assert_eq!(patch, Record::new().with("active", true));
    }

    #[test]
    fn patch_falls_back_to_target() {
        let patch = FLAG.patch_from_response(&json!({"message": "ok"}), &StatusValue::Flag(false));
        assert_eq!(patch, Record::new().with("active", false));
    }
}
