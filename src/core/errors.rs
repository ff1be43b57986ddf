use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum ProxyError {
    /// Method name is not part of the supported Splitwise surface
    #[error("Unsupported method '{0}'")]
    UnsupportedMethod(String),

    /// No personal API key configured
    #[error("Missing Splitwise credentials: set SPLITWISE_API_KEY")]
    MissingCredentials,

    /// Transport-level failure talking to Splitwise
    #[error("Upstream request failed: {0}")]
    UpstreamRequest(String),

    /// Splitwise answered with a non-success status
    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// Splitwise answered 200 but reported errors in the body
    #[error("Upstream rejected the request: {0}")]
    UpstreamRejected(String),

    /// Response body could not be decoded
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Month must be in 'YYYY-MM' format, got '{0}'")]
    InvalidMonth(String),

    #[error("Group '{0}' not found")]
    GroupNotFound(String),

    #[error("Participant '{0}' not found in group")]
    ParticipantNotFound(String),

    #[error("Could not determine current user ID")]
    CurrentUserUnavailable,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    /// Stored cache document does not have the expected shape
    #[error("Malformed cache entry: {0}")]
    MalformedEntry(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Internal server error (e.g., unexpected failure)
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl ProxyError {
    pub fn invalid_input(field: &str, description: impl Into<String>) -> Self {
        ProxyError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: format!("Invalid {}", field),
                description: description.into(),
            },
        )
    }

    /// True for failures that originate from the Splitwise side of a call.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ProxyError::UpstreamRequest(_)
                | ProxyError::UpstreamStatus { .. }
                | ProxyError::UpstreamRejected(_)
                | ProxyError::InvalidResponse(_)
        )
    }
}
