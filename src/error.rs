//! Error types for the CloudStack client.

use thiserror::Error;

/// Result type using CloudStackError.
pub type Result<T> = std::result::Result<T, CloudStackError>;

/// Errors that can occur when calling the CloudStack API.
#[derive(Debug, Error)]
pub enum CloudStackError {
    /// The transport failed (network, HTTP or an API error envelope).
    #[error(transparent)]
    Transport(#[from] anyhow::Error),

    /// The response body was not valid JSON for the expected record.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A lookup matched nothing.
    #[error("No match found for {query}: {response}")]
    NotFound { query: String, response: String },

    /// A lookup matched more than one entity and none could be picked.
    #[error("Could not find an exact match for {query} ({count} results)")]
    Ambiguous { query: String, count: usize },

    /// A caller supplied a value the API cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),
}

impl CloudStackError {
    /// True for the uniform not-found outcome of a lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudStackError::NotFound { .. })
    }

    /// The API error carried by a transport failure, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CloudStackError::Transport(err) => err.downcast_ref::<ApiError>(),
            _ => None,
        }
    }
}

/// Error envelope returned by the management server.
///
/// The text mirrors the server's own message so callers can match on it.
#[derive(Debug, Clone, Error)]
#[error("CloudStack API error {code} (CSExceptionErrorCode: {cs_code}): {text}")]
pub struct ApiError {
    /// HTTP-style error code (e.g. 431 for a parameter error)
    pub code: u16,
    /// CloudStack exception code
    pub cs_code: u32,
    pub text: String,
}
