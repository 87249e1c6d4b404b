use serde_json::Value;
use thiserror::Error;

/// Where a failed operation broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Request never produced an HTTP response.
    Transport,
    /// 4xx other than 404, usually with a backend validation message.
    Validation(u16),
    /// 404: the record was removed by someone else.
    NotFound,
    /// 5xx.
    Server(u16),
    /// Response arrived but its body could not be understood.
    Decode,
    /// A local file could not be read before submission.
    Encode,
    /// The same record already has an operation in flight.
    Busy,
    /// The resource does not offer the operation (read-only, no toggle).
    Unsupported,
}

/// Error returned by every API call and store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Encode, message)
    }

    pub fn busy(id: &str) -> Self {
        Self::new(
            ApiErrorKind::Busy,
            format!("Another update for {id} is still in progress"),
        )
    }

    pub fn unsupported(resource: &str, operation: &str) -> Self {
        Self::new(
            ApiErrorKind::Unsupported,
            format!("{resource} does not support {operation}"),
        )
    }

    /// Builds the error for a non-2xx response. The backend reports
    /// failures as `{ "message": "..." }`; the raw body is used otherwise.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = match status {
            404 => ApiErrorKind::NotFound,
            400..=499 => ApiErrorKind::Validation(status),
            _ => ApiErrorKind::Server(status),
        };
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let body = body.trim();
                if body.is_empty() || body.starts_with('<') {
                    format!("HTTP {status}")
                } else {
                    body.chars().take(200).collect()
                }
            });
        Self { kind, message }
    }

    /// True when the failure happened before anything reached the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::Encode | ApiErrorKind::Busy | ApiErrorKind::Unsupported
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_kind() {
        assert_eq!(ApiError::from_response(404, "").kind, ApiErrorKind::NotFound);
        assert_eq!(
            ApiError::from_response(422, "").kind,
            ApiErrorKind::Validation(422)
        );
        assert_eq!(ApiError::from_response(502, "").kind, ApiErrorKind::Server(502));
    }

    #[test]
    fn message_comes_from_body() {
        let err = ApiError::from_response(400, r#"{"message":"Coupon code already exists"}"#);
        assert_eq!(err.to_string(), "Coupon code already exists");

        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.message, "HTTP 500");

        let err = ApiError::from_response(503, "upstream unavailable");
        assert_eq!(err.message, "upstream unavailable");
    }

    #[test]
    fn encode_failures_are_local() {
        assert!(ApiError::encode("unreadable").is_local());
        assert!(ApiError::unsupported("contacts", "create").is_local());
        assert!(!ApiError::transport("offline").is_local());
    }
}
