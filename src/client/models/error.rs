//! Backend error payloads

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error body sent with non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Detail,
}

/// The `detail` field of an error body: either a plain message or a list of
/// field-level validation errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    Fields(Vec<FieldError>),
}

/// One field-level validation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Everything else the backend sent (`loc`, `type`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FieldError {
    /// Field error carrying only a message
    #[cfg(test)]
    pub fn with_msg(msg: impl Into<String>) -> Self {
        Self {
            msg: Some(msg.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// The message, or the raw JSON of the entry when it has none
    pub fn message(&self) -> String {
        match &self.msg {
            Some(msg) => msg.clone(),
            None => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

impl Detail {
    /// Single human-readable message; field errors are joined with ", "
    pub fn message(&self) -> String {
        match self {
            Detail::Text(text) => text.clone(),
            Detail::Fields(fields) => fields
                .iter()
                .map(FieldError::message)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_text() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Email already registered"}"#).unwrap();
        assert_eq!(body.detail.message(), "Email already registered");
    }

    #[test]
    fn test_detail_field_list_joined() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [
                {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
                {"loc": ["body", "password"], "msg": "Password must be at least 8 characters long", "type": "value_error"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            body.detail.message(),
            "value is not a valid email address, Password must be at least 8 characters long"
        );
    }

    #[test]
    fn test_field_without_msg_falls_back_to_json() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": [{"loc": ["path", "symbol"]}]}"#).unwrap();
        let message = body.detail.message();
        assert!(message.contains("\"loc\""));
        assert!(message.contains("symbol"));
    }

    #[test]
    fn test_body_without_detail_is_rejected() {
        assert!(serde_json::from_str::<ErrorBody>(r#"{"error": "boom"}"#).is_err());
    }
}
