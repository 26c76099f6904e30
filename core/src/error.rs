//! Error types for payload encoding and decoding.
//!
//! # Design
//! There are exactly two failure kinds. `Encoding` means a value could not be
//! turned into bytes for the requested media type; `Decoding` means a byte
//! stream did not hold well-formed JSON. Both carry the underlying cause and
//! are never retried here: retry policy belongs to the caller.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Why a value could not be encoded.
#[derive(Debug)]
pub enum EncodeFailure {
    /// `serde_json` rejected the value (non-string map key, failing `Serialize`).
    Json(serde_json::Error),

    /// The value has no `application/x-www-form-urlencoded` representation.
    Form(String),

    /// Writing the encoded output to its sink failed.
    Io(io::Error),
}

/// Errors returned by the encoders, the decoder and the pretty printer.
#[derive(Debug)]
pub enum PayloadError {
    /// The value cannot be represented in the target encoding.
    Encoding(EncodeFailure),

    /// The stream does not contain a well-formed JSON value.
    Decoding(serde_json::Error),
}

impl PayloadError {
    pub(crate) fn json(e: serde_json::Error) -> Self {
        PayloadError::Encoding(EncodeFailure::Json(e))
    }

    pub(crate) fn form(msg: impl Into<String>) -> Self {
        PayloadError::Encoding(EncodeFailure::Form(msg.into()))
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, PayloadError::Encoding(_))
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, PayloadError::Decoding(_))
    }

    /// One-based line of the parse failure, for decoding errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            PayloadError::Decoding(e) => Some(e.line()),
            PayloadError::Encoding(_) => None,
        }
    }

    /// One-based column of the parse failure, for decoding errors.
    pub fn column(&self) -> Option<usize> {
        match self {
            PayloadError::Decoding(e) => Some(e.column()),
            PayloadError::Encoding(_) => None,
        }
    }
}

impl From<io::Error> for PayloadError {
    fn from(e: io::Error) -> Self {
        PayloadError::Encoding(EncodeFailure::Io(e))
    }
}

impl fmt::Display for EncodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeFailure::Json(e) => write!(f, "{e}"),
            EncodeFailure::Form(msg) => write!(f, "form: {msg}"),
            EncodeFailure::Io(e) => write!(f, "write: {e}"),
        }
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Encoding(cause) => write!(f, "encoding failed: {cause}"),
            PayloadError::Decoding(e) => write!(f, "decoding failed: {e}"),
        }
    }
}

impl StdError for PayloadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            PayloadError::Encoding(EncodeFailure::Json(e)) => Some(e),
            PayloadError::Encoding(EncodeFailure::Io(e)) => Some(e),
            PayloadError::Encoding(EncodeFailure::Form(_)) => None,
            PayloadError::Decoding(e) => Some(e),
        }
    }
}
