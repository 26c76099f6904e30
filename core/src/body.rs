//! Encoded request bodies as readable streams.
//!
//! # Design
//! A `Body` is plain data: the encoded bytes plus the media type they were
//! encoded as. Nothing is written to the network here. The caller hands the
//! body to whatever transport it uses, either by reading it through
//! `std::io::Read` or by taking the bytes with `into_bytes`.

use std::io::{self, Read};

use bytes::{Buf, Bytes};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An in-memory encoded payload that can be read sequentially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    content_type: &'static str,
    bytes: Bytes,
}

impl Body {
    pub fn json(bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: JSON_CONTENT_TYPE,
            bytes: bytes.into(),
        }
    }

    pub fn form(bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: FORM_CONTENT_TYPE,
            bytes: bytes.into(),
        }
    }

    /// Media type to send as the `content-type` header.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        self.bytes.remaining()
    }

    pub fn is_empty(&self) -> bool {
        !self.bytes.has_remaining()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.bytes.remaining());
        self.bytes.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }
}
