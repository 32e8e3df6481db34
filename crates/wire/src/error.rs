//! Transport error type.

use thiserror::Error;

/// Failures raised while talking to the remote side.
///
/// These are surfaced to callers unmodified: the client adds no retry or
/// translation on top of them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request itself failed (connection, TLS, timeout, body read)
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status
    #[error("HTTP status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The remote side raised an exception (XML-RPC `<fault>`)
    #[error("remote fault {code}: {message}")]
    Fault {
        /// `faultCode`, stringified (the server may send an int or a string)
        code: String,
        /// `faultString`
        message: String,
    },

    /// The payload is not a well-formed XML-RPC document
    #[error("malformed XML-RPC payload: {reason}")]
    Decode {
        /// What could not be decoded
        reason: String,
    },
}

impl TransportError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        TransportError::Decode {
            reason: reason.into(),
        }
    }
}
