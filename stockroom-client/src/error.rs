//! Gateway error types

use thiserror::Error;

/// Gateway error type
///
/// The interaction layer treats every variant uniformly as "the call
/// did not succeed" and surfaces a generic notice; the variants carry
/// detail for logs only.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server rejected or failed the request
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
