//! Domain-level errors (no external dependencies beyond the parsers)

use thiserror::Error;

/// Errors raised while decoding a bookmark container or its JSON document.
///
/// All of them are permanent for the given input: the bytes are local and
/// already read, so there is nothing to retry.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("bad magic: expected \"mozLz40\\0\", found {found:02x?}")]
    BadMagic { found: Vec<u8> },

    #[error("decompression failed: {reason}")]
    DecompressFailed { reason: String },

    #[error("declared length {declared} does not match decompressed length {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("data incompressible")]
    Incompressible,
}

impl FormatError {
    pub(crate) fn decompress(reason: impl Into<String>) -> Self {
        Self::DecompressFailed {
            reason: reason.into(),
        }
    }
}

/// Domain errors represent violations of the bookmark store format.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Format(#[from] FormatError),
}
