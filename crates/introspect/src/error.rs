use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    /// The server asked us to slow down, either with a 429 status or with a
    /// `Throttled` error message inside a 200 response.
    #[error("Request was throttled by the server")]
    Throttled { retry_after: Option<Duration> },

    #[error("Failed to parse introspection response: {0}")]
    Parse(String),

    #[error("Invalid introspection response: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for IntrospectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
