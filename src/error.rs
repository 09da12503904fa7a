//! API and session errors.
//!
//! ERROR HANDLING
//! ==============
//! Three kinds of failure reach callers: validation faults raised before any
//! request leaves the process, the 401 fault (already handled centrally by the
//! time the caller sees [`ApiError::Unauthorized`]), and every other remote or
//! transport fault, which is passed through unchanged.

use crate::forms::ValidationError;

/// Errors produced by API calls and session operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input was rejected before any network call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered 401. The credential has already been cleared and
    /// the expiry event emitted.
    #[error("session expired")]
    Unauthorized,

    /// The server answered with a non-success status other than 401.
    #[error("request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The request never produced a response (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(String),

    /// A success response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// A logout or expiry landed while a login sequence was in flight.
    #[error("session changed while the request was in flight")]
    Superseded,
}

impl ApiError {
    /// HTTP status carried by this error, if the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied `detail` text, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
