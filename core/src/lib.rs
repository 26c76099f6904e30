//! Payload codecs for an HTTP client.
//!
//! # Overview
//! Turns request values into encoded bodies and response bytes back into
//! values, without touching the network. The surrounding client owns the
//! transport and hands bodies to it as plain readable streams.
//!
//! # Design
//! - Every operation is a stateless function; nothing is cached or shared.
//! - `encode_json` / `encode_form` produce a `Body` tagged with its media type.
//!   NaN and infinite floats are refused rather than written as `null`.
//! - `parse_json` keeps JSON numbers as their literal text
//!   (`serde_json` built with `arbitrary_precision`), so 64-bit ids and long
//!   decimals are never rounded through `f64`.
//! - `PrettyPrinter` takes its label at construction and returns errors
//!   instead of exiting.

pub mod body;
pub mod error;
mod finite;
pub mod form;
pub mod json;
pub mod pretty;

pub use body::{Body, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
pub use error::{EncodeFailure, PayloadError};
pub use form::encode_form;
pub use json::{encode_json, json_body, parse_json, parse_json_as};
pub use pretty::{pretty_print, PrettyPrinter};
pub use serde_json::{Number, Value};
