//! Core error types for the Chronicle history service.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors from the public-key re-encoding codec.
///
/// A key that fails to decode indicates corrupt historical data; these errors
/// are never caught locally and abort the request that surfaced them.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The base-58 payload contained an invalid character.
    #[error("invalid base-58 payload: {0}")]
    Base58(String),
    /// The decoded payload had the wrong length for a compressed key.
    #[error("invalid decoded key length: expected {expected}, got {got}")]
    Length {
        /// The required payload length in bytes.
        expected: usize,
        /// The actual decoded length in bytes.
        got: usize,
    },
}

impl ErrorCode for KeyError {
    fn code(&self) -> &'static str {
        match self {
            Self::Base58(_) => "KEY_INVALID_BASE58",
            Self::Length { .. } => "KEY_INVALID_LENGTH",
        }
    }
}

/// Errors from the document-store search client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The HTTP round-trip to the store failed (connect, DNS, timeout).
    #[error("store transport error: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status {
        /// The HTTP status code returned by the store.
        status: u16,
        /// The response body, for diagnostics.
        body: String,
    },
    /// The store's response body could not be deserialized.
    #[error("store response decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "STORE_TRANSPORT_ERROR",
            Self::Status { .. } => "STORE_BAD_STATUS",
            Self::Decode(_) => "STORE_DECODE_ERROR",
        }
    }
}

/// Errors from schedule resolution.
///
/// Zero matching records is *not* an error; it is represented by an empty
/// producer list in the response.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A producer key in a matched record failed to re-encode.
    #[error("key codec error: {0}")]
    Key(#[from] KeyError),
    /// The document-store query failed. Not retried.
    #[error("store query error: {0}")]
    Store(#[from] StoreError),
    /// A matched record did not have the shape its index promises.
    #[error("malformed schedule record: {0}")]
    Malformed(String),
}

impl ErrorCode for HistoryError {
    fn code(&self) -> &'static str {
        match self {
            Self::Key(_) => "HISTORY_KEY_ERROR",
            Self::Store(_) => "HISTORY_STORE_ERROR",
            Self::Malformed(_) => "HISTORY_MALFORMED_RECORD",
        }
    }
}
