//! Error types for the Exponea models.

/// Errors that can occur while building or decoding models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The name does not match any known sub-endpoint.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// A bulk command targeted an endpoint that cannot appear inside a bulk.
    #[error("endpoint {0} cannot be used as a bulk command")]
    NotBulkable(String),
}
