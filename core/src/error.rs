//! Error types for the platform API client.
//!
//! # Design
//! A call fails in one of two ways that callers care about: the transport
//! never produced a response (`Transport`), or the platform answered with a
//! non-2xx status (`Status`). The remaining variants cover local failures
//! around those two: a URL that does not parse, a body that does not encode,
//! and a 2xx payload that does not decode into the declared type.

use thiserror::Error;

/// Errors returned by `TursoClient` and its resource groups.
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS, connect, TLS or timeout failure reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The platform returned a status outside the 2xx range.
    ///
    /// `body` is the raw response payload, kept for debugging only.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// Host and path did not combine into a valid URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    /// Status code of an unsuccessful response, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ApiError::Transport(Box::new(err))
    }
}
