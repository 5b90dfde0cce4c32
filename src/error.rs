//! Error types for Cloud Foundry API operations.

use serde_json::{Map, Value};
use thiserror::Error;

/// Platform error code returned when an app is already bound to an instance.
const BINDING_TAKEN_CODE: &str = "CF-ServiceBindingAppServiceTaken";

/// Message fragment the platform uses for the same condition.
const BINDING_TAKEN_MESSAGE: &str = "The app space binding to service is taken";

/// Errors that can occur during Cloud Foundry API operations.
#[derive(Debug, Error)]
pub enum CfError {
    /// Configuration is missing or incomplete.
    #[error("Cloud Foundry configuration required: {0}")]
    ConfigMissing(String),

    /// A resource entry does not carry the `<child>_url` link requested.
    #[error("resource has no '{child}_url' link")]
    MissingLink { child: String },

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The API answered with a non-2xx status.
    ///
    /// `details` holds every field of the JSON error body so callers can
    /// inspect platform-specific metadata such as `error_code`.
    #[error("{message}")]
    ApiError {
        message: String,
        status_code: u16,
        details: Map<String, Value>,
    },

    /// HTTP transport error (DNS, connection, TLS).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Local file error (registry or session files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CfError {
    /// HTTP status code, if this error came from an API response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CfError::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// True for a 401 response. The client never intercepts these itself.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// A field copied from the API error body.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        match self {
            CfError::ApiError { details, .. } => details.get(key),
            _ => None,
        }
    }

    /// True when a bind request failed because the binding already exists.
    pub fn is_already_bound(&self) -> bool {
        match self {
            CfError::ApiError { message, details, .. } => {
                details.get("error_code").and_then(Value::as_str) == Some(BINDING_TAKEN_CODE)
                    || message.contains(BINDING_TAKEN_MESSAGE)
            }
            _ => false,
        }
    }
}

/// Result type alias for Cloud Foundry operations.
pub type Result<T> = core::result::Result<T, CfError>;
