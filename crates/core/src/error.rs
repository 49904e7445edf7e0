// Error types for the portal client

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

/// Reasons a bearer token cannot be turned into an identity
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Fewer than two dot-separated segments
    #[error("token has no payload segment")]
    Malformed,

    #[error("token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token payload is not a JSON object")]
    NotAnObject,

    /// Neither `sub` nor `email` carries a value
    #[error("token carries no subject")]
    MissingSubject,

    #[error("token carries unknown role '{0}'")]
    UnknownRole(String),
}

/// Durable storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize stored value: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by the HTTP gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered 401; the session has already been cleared
    #[error("Unauthorized: {}", display_message(message))]
    Unauthorized { message: String },

    #[error("API error ({status}): {}", display_message(message))]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Message supplied by the server, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Unauthorized { message } | GatewayError::Api { message, .. }
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized { .. })
    }
}

fn display_message(message: &str) -> &str {
    if message.is_empty() {
        "no details"
    } else {
        message
    }
}

/// Authentication failures. `Display` is the user-visible message.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials or request refused; carries the server message or a fallback
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid token received")]
    InvalidToken(#[source] DecodeError),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server refused the stored token; the session has been cleared
    #[error("Session expired")]
    SessionExpired(#[source] GatewayError),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, AuthError::SessionExpired(_))
    }
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PortalError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PortalError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        PortalError::Config(msg.into())
    }

    /// True when the failure came from a forced logout
    pub fn is_session_expired(&self) -> bool {
        match self {
            PortalError::Gateway(e) => e.is_unauthorized(),
            PortalError::Auth(e) => e.is_session_expired(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(e: reqwest::Error) -> Self {
        PortalError::Gateway(GatewayError::Http(e))
    }
}
