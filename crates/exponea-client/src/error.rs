//! Client error types.

/// Errors that can occur when using the Exponea client.
///
/// A response with `success == false` is not an error; it is returned as a
/// value for the caller to inspect.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request body could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request could not be sent or its body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("response parse error (HTTP {status}): {source}")]
    ResponseParse {
        /// HTTP status code of the response.
        status: u16,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// Non-success HTTP status, reported only under `StatusPolicy::Reject`.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether the error came from a request or connect timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
