//! Error types for the Ficsit Remote Monitoring client.
//!
//! # Design
//! One variant per failure class so callers can branch on where a call went
//! wrong: before any I/O (`Config`), on the network (`Transport`,
//! `ConnectionRefused`), at the HTTP layer (`Request`), or while checking the
//! payload shape (`Validation`). `Request` keeps the raw status code and body
//! for debugging.

use thiserror::Error;

use crate::http::TransportError;

/// Fallback used when a failed response carries no `error` string.
pub const NO_ERROR_MESSAGE: &str = "No error message provided in response body";

/// Operator hint appended to connection-refused failures.
pub const SERVER_NOT_RUNNING_HINT: &str = "Is the Ficsit Remote Monitoring server running?";

/// Errors returned by `FrmClient` methods.
#[derive(Debug, Error)]
pub enum FrmError {
    /// The client is not configured for this call: an authenticated
    /// endpoint was used without a token, or the base URL is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The transport failed because the remote port refused the connection.
    #[error("{source}. {}", SERVER_NOT_RUNNING_HINT)]
    ConnectionRefused {
        #[source]
        source: TransportError,
    },

    /// The server answered, but the response did not pass the
    /// acceptability check or its body was not a JSON object/array.
    #[error("Ficsit Remote Monitoring API responded with code {status}: {message}")]
    Request {
        status: u16,
        message: String,
        body: String,
    },

    /// The normalized body did not match the endpoint's declared shape.
    #[error("invalid response at `{path}`: {message}")]
    Validation { path: String, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl FrmError {
    /// HTTP status code, when the error came from a completed response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FrmError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for FrmError {
    fn from(err: TransportError) -> Self {
        if err.is_connection_refused() {
            FrmError::ConnectionRefused { source: err }
        } else {
            FrmError::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn refused_transport_error_gets_hint() {
        let err: FrmError =
            TransportError::new(io::Error::new(io::ErrorKind::ConnectionRefused, "fetch failed")).into();
        assert!(matches!(err, FrmError::ConnectionRefused { .. }));
        let msg = err.to_string();
        assert!(msg.starts_with("fetch failed"));
        assert!(msg.ends_with(SERVER_NOT_RUNNING_HINT));
    }

    #[test]
    fn other_transport_error_has_no_hint() {
        let err: FrmError = TransportError::new(io::Error::from(io::ErrorKind::TimedOut)).into();
        assert!(matches!(err, FrmError::Transport(_)));
        assert!(!err.to_string().contains(SERVER_NOT_RUNNING_HINT));
    }

    #[test]
    fn request_error_display_and_status() {
        let err = FrmError::Request {
            status: 404,
            message: "No matching endpoint found.".to_string(),
            body: r#"{"error":"No matching endpoint found."}"#.to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Ficsit Remote Monitoring API responded with code 404: No matching endpoint found."
        );
    }
}
