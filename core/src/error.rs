//! Error types for the Qaiku API client.
//!
//! # Design
//! Every client operation fails with exactly one `ApiError`. Callers that
//! only care about the numeric code the service historically reported use
//! `ApiError::code()`: 404 when the server could not be reached and 0 for
//! everything else. A non-success HTTP status is kept on `ApiError::Http`
//! and read with `ApiError::status()`, so a 404 from a reachable server
//! never looks like an unreachable one.

use thiserror::Error;

/// Failures below the JSON layer: DNS, connection, redirects, framing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Server not found")]
    HostUnreachable,

    #[error("Maximum redirects reached")]
    RedirectLimit,

    #[error("A 3xx redirect response code was provided but no Location: header was provided to point to the new location.")]
    RedirectMissingLocation,

    #[error("A relative, as opposed to an absolute URI was passed into request(): {0}")]
    InvalidUri(String),

    #[error("The headers claimed that the content of the response was compressed but the decompression algorithm applied to the content failed.")]
    Decompression,

    #[error("Something went wrong! {0}")]
    Other(String),
}

impl TransportError {
    pub fn code(&self) -> u16 {
        match self {
            TransportError::HostUnreachable => 404,
            _ => 0,
        }
    }
}

/// Errors returned by `QaikuClient` operations and record decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not valid JSON, or not the JSON shape a record expects.
    #[error("decode failed: {0}")]
    Decode(String),

    /// An argument was rejected before any request was issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// Numeric code: 404 for an unreachable server, 0 otherwise.
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Transport(e) => e.code(),
            ApiError::Http { .. } | ApiError::Decode(_) | ApiError::InvalidArgument(_) => 0,
        }
    }

    /// HTTP status of a non-success response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
