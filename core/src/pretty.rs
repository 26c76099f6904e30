//! Tab-indented JSON debug lines tagged with a deployment label.
//!
//! # Design
//! The label is fixed when the printer is built, either passed in directly or
//! read once from `ENV` by `from_env`. Rendering never touches process state
//! afterwards, so tests and concurrent callers see a stable prefix. Failures
//! come back as `PayloadError`; deciding whether a failed debug line matters
//! is left to the caller.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::PayloadError;
use crate::finite::ensure_finite;

/// Environment variable holding the deployment label.
pub const ENV_VAR: &str = "ENV";

/// Writes values as `[<LABEL>] - <tab-indented JSON>` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyPrinter {
    label: String,
}

impl PrettyPrinter {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_uppercase(),
        }
    }

    /// Build a printer labelled with the current value of `ENV`.
    ///
    /// An unset variable gives an empty label; invalid unicode is replaced
    /// with U+FFFD rather than dropped.
    pub fn from_env() -> Self {
        let label = std::env::var_os(ENV_VAR).unwrap_or_default();
        Self::new(&label.to_string_lossy())
    }

    /// The uppercased label placed between the brackets.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn render<T>(&self, value: &T) -> Result<String, PayloadError>
    where
        T: Serialize + ?Sized,
    {
        ensure_finite(value)?;
        let mut out = format!("[{}] - ", self.label).into_bytes();
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
        value.serialize(&mut ser).map_err(PayloadError::json)?;
        String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    /// Write one rendered line, newline-terminated, to `sink`.
    pub fn write_to<W, T>(&self, mut sink: W, value: &T) -> Result<(), PayloadError>
    where
        W: Write,
        T: Serialize + ?Sized,
    {
        let line = self.render(value)?;
        writeln!(sink, "{line}")?;
        Ok(())
    }

    /// Write one rendered line to standard output.
    pub fn print<T>(&self, value: &T) -> Result<(), PayloadError>
    where
        T: Serialize + ?Sized,
    {
        self.write_to(io::stdout().lock(), value)
    }
}

/// Print `value` with a printer labelled from `ENV`.
pub fn pretty_print<T>(value: &T) -> Result<(), PayloadError>
where
    T: Serialize + ?Sized,
{
    PrettyPrinter::from_env().print(value)
}
