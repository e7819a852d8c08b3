//! Client error types

use thiserror::Error;

/// Errors surfaced by the entry store client and the view model
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input is not a finite positive number; nothing was sent
    #[error("Invalid weight: {0:?}")]
    InvalidWeight(String),

    /// Request timed out
    #[error("Entry store request timed out")]
    Timeout,

    /// Entry store not reachable
    #[error("Entry store unavailable")]
    Unavailable,

    /// Entry store answered with an error status
    #[error("Entry store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Any other HTTP client failure
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
}

impl ClientError {
    /// Classify a reqwest error the way callers care about it
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Request(err)
        }
    }
}
