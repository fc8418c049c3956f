//! Client error types.

use thiserror::Error;
use vin_auth::AuthError;
use vin_core::ValidationError;

/// Errors surfaced by [`crate::VinClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the bearer token (HTTP 401).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-success status, with the server's `error` message.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Rejected locally before any request was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("component {component_id} has no assigned user")]
    NotAssigned { component_id: i64 },
}

impl ClientError {
    /// HTTP status behind the error, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
