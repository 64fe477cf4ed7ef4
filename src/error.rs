//! Error types for the StockDesk CLI

use thiserror::Error;

use crate::client::models::Detail;
use crate::validation::PASSWORD_MIN_LENGTH;

/// Result type alias for StockDesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A backend rejection already converted into the message shown to the user
    #[error("{0}")]
    Form(String),

    #[error("Login required")]
    LoginRequired,
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 401 from the backend. Carries the detail payload when one was sent.
    #[error("Not authenticated: {}", .0.as_ref().map(Detail::message).unwrap_or_else(|| "credential rejected".to_string()))]
    Unauthorized(Option<Detail>),

    /// Non-2xx response with a structured `detail` body
    #[error("{detail}")]
    Rejected { status: u16, detail: Detail },

    /// Non-2xx response without a structured body
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Structured detail carried by the rejection, if any
    pub fn detail(&self) -> Option<&Detail> {
        match self {
            ApiError::Unauthorized(detail) => detail.as_ref(),
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// HTTP status code of the rejection, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Rejected { status, .. } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Errors from the persisted client store (credential and local state)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read client store {path}: {message}")]
    Read { path: String, message: String },

    #[error("Client store {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("Failed to write client store {path}: {message}")]
    Write { path: String, message: String },
}

/// Local input validation failures, raised before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least {} characters", PASSWORD_MIN_LENGTH)]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Stock symbol is required")]
    SymbolRequired,

    #[error("Stock symbol must be 1-5 uppercase letters")]
    InvalidSymbol,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::FieldError;

    #[test]
    fn test_api_error_unauthorized_with_detail() {
        let err = ApiError::Unauthorized(Some(Detail::Text(
            "Incorrect email or password".to_string(),
        )));
        assert!(err.to_string().contains("Incorrect email or password"));
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_api_error_unauthorized_without_detail() {
        let err = ApiError::Unauthorized(None);
        assert!(err.to_string().contains("credential rejected"));
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_api_error_rejected_displays_detail() {
        let err = ApiError::Rejected {
            status: 400,
            detail: Detail::Text("Email already registered".to_string()),
        };
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_api_error_rejected_field_list() {
        let err = ApiError::Rejected {
            status: 422,
            detail: Detail::Fields(vec![
                FieldError::with_msg("field required"),
                FieldError::with_msg("value is not a valid email address"),
            ]),
        };
        assert_eq!(
            err.to_string(),
            "field required, value is not a valid email address"
        );
    }

    #[test]
    fn test_api_error_status_without_detail() {
        let err = ApiError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("Bad Gateway"));
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_api_error_network_has_no_status() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmailRequired.to_string(), "Email is required");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email address");
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            ValidationError::SymbolRequired.to_string(),
            "Stock symbol is required"
        );
        assert_eq!(
            ValidationError::InvalidSymbol.to_string(),
            "Stock symbol must be 1-5 uppercase letters"
        );
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Unauthorized(None).into();

        match err {
            Error::Api(ApiError::Unauthorized(None)) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_error_from_validation_error() {
        let err: Error = ValidationError::SymbolRequired.into();
        assert_eq!(err.to_string(), "Stock symbol is required");
    }

    #[test]
    fn test_login_required_message() {
        assert_eq!(Error::LoginRequired.to_string(), "Login required");
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
