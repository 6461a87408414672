//! `mozLz40\0` container codec
//!
//! Layout (all offsets in bytes):
//!
//! | offset | size      | field                                   |
//! |--------|-----------|-----------------------------------------|
//! | 0      | 8         | magic `b"mozLz40\0"`                    |
//! | 8      | 4         | declared decompressed length, `u32` LE  |
//! | 12     | remainder | raw LZ4 block (no frame header)         |

use lz4_flex::block::{self, DecompressError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::error::FormatError;

pub const MAGIC: [u8; 8] = *b"mozLz40\0";
pub const MAGIC_LEN: usize = MAGIC.len();
pub const HEADER_LEN: usize = MAGIC_LEN + 4;

/// Extra bytes allocated on top of the declared length.
const HEADROOM: usize = 4 * 1024;

/// Upper bound on the LZ4 expansion ratio of a single block.
const MAX_RATIO: usize = 255;

/// What to do when the decompressed size differs from the header's length field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthCheck {
    /// Accept silently
    Ignore,
    /// Accept and log a warning
    #[default]
    Warn,
    /// Reject with `FormatError::LengthMismatch`
    Strict,
}

impl std::str::FromStr for LengthCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown length check: {other}")),
        }
    }
}

/// Fixed-size header in front of the compressed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub declared_len: u32,
}

impl ContainerHeader {
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[..MAGIC_LEN].copy_from_slice(&MAGIC);
        buf[MAGIC_LEN..HEADER_LEN].copy_from_slice(&self.declared_len.to_le_bytes());
        buf
    }

    /// Parse the header at the start of `buf`.
    ///
    /// A wrong (or cut-off) magic is `BadMagic`; a correct magic without the
    /// full length field is a truncated container.
    pub fn decode(buf: &[u8]) -> Result<Self, FormatError> {
        if buf.len() < MAGIC_LEN || buf[..MAGIC_LEN] != MAGIC {
            return Err(FormatError::BadMagic {
                found: buf[..buf.len().min(MAGIC_LEN)].to_vec(),
            });
        }
        if buf.len() < HEADER_LEN {
            return Err(FormatError::decompress(format!(
                "truncated header: {} of {} bytes",
                buf.len(),
                HEADER_LEN
            )));
        }
        let mut len = [0u8; 4];
        len.copy_from_slice(&buf[MAGIC_LEN..HEADER_LEN]);
        Ok(Self {
            declared_len: u32::from_le_bytes(len),
        })
    }
}

/// Decode a container into the raw bytes it wraps.
///
/// The header's length is only a buffer size hint; `check` decides whether a
/// differing actual length is ignored, logged or rejected.
pub fn decode(buf: &[u8], check: LengthCheck) -> Result<Vec<u8>, FormatError> {
    let header = ContainerHeader::decode(buf)?;
    let payload = &buf[HEADER_LEN..];
    debug!(
        "decode: declared_len={} payload_len={}",
        header.declared_len,
        payload.len()
    );

    let raw = decompress_block(payload, header.declared_len as usize)?;

    if raw.len() != header.declared_len as usize {
        match check {
            LengthCheck::Ignore => {}
            LengthCheck::Warn => warn!(
                "decompressed length {} differs from declared length {}",
                raw.len(),
                header.declared_len
            ),
            LengthCheck::Strict => {
                return Err(FormatError::LengthMismatch {
                    declared: header.declared_len,
                    actual: raw.len(),
                })
            }
        }
    }
    Ok(raw)
}

fn decompress_block(payload: &[u8], size_hint: usize) -> Result<Vec<u8>, FormatError> {
    if payload.is_empty() {
        return Err(FormatError::decompress("no compressed payload"));
    }

    // The header is untrusted; only the payload bounds the allocation.
    let ceiling = payload.len().saturating_mul(MAX_RATIO);
    let mut capacity = size_hint.saturating_add(HEADROOM).min(ceiling);

    loop {
        let mut out = vec![0u8; capacity];
        match block::decompress_into(payload, &mut out) {
            Ok(0) => return Err(FormatError::decompress("zero bytes produced")),
            Ok(written) => {
                out.truncate(written);
                return Ok(out);
            }
            Err(DecompressError::OutputTooSmall { .. }) if capacity < ceiling => {
                debug!("decompress_block: buffer of {} bytes too small, growing", capacity);
                capacity = capacity.saturating_mul(2).min(ceiling);
            }
            Err(e) => return Err(FormatError::decompress(e.to_string())),
        }
    }
}

/// Wrap `raw` into a container whose header declares `declared_len`.
///
/// Only needed to produce fixtures; Firefox writes the real files.
pub fn encode(raw: &[u8], declared_len: u32) -> Result<Vec<u8>, FormatError> {
    if raw.is_empty() {
        return Err(FormatError::Incompressible);
    }
    let compressed = block::compress(raw);
    if compressed.is_empty() {
        return Err(FormatError::Incompressible);
    }

    let mut out = Vec::with_capacity(HEADER_LEN + compressed.len());
    out.extend_from_slice(&ContainerHeader { declared_len }.encode());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Like [`encode`], declaring the actual length of `raw`.
pub fn encode_exact(raw: &[u8]) -> Result<Vec<u8>, FormatError> {
    let declared_len = u32::try_from(raw.len()).map_err(|_| FormatError::Incompressible)?;
    encode(raw, declared_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = br#"{"title":"","children":[{"title":"menu","children":[]}]}"#;

    #[test]
    fn given_encoded_sample_when_decoding_then_returns_original_bytes() {
        let container = encode_exact(SAMPLE).unwrap();
        assert_eq!(&container[..MAGIC_LEN], &MAGIC);
        assert_eq!(
            u32::from_le_bytes(container[8..12].try_into().unwrap()) as usize,
            SAMPLE.len()
        );

        let raw = decode(&container, LengthCheck::Strict).unwrap();
        assert_eq!(raw, SAMPLE);
    }

    #[test]
    fn given_short_input_when_decoding_header_then_bad_magic() {
        let err = ContainerHeader::decode(b"moz").unwrap_err();
        assert!(matches!(err, FormatError::BadMagic { ref found } if found == b"moz"));
    }

    #[test]
    fn given_magic_without_length_when_decoding_header_then_decompress_failed() {
        let err = ContainerHeader::decode(b"mozLz40\0\x01\x02").unwrap_err();
        assert!(matches!(err, FormatError::DecompressFailed { .. }));
    }

    #[test]
    fn given_header_only_when_decoding_then_decompress_failed() {
        let header = ContainerHeader { declared_len: 10 }.encode();
        let err = decode(&header, LengthCheck::Warn).unwrap_err();
        assert!(matches!(err, FormatError::DecompressFailed { .. }));
    }

    #[test]
    fn given_understated_length_when_decoding_then_buffer_grows() {
        let raw = vec![b'a'; 64 * 1024];
        let container = encode(&raw, 16).unwrap();

        let decoded = decode(&container, LengthCheck::Ignore).unwrap();
        assert_eq!(decoded.len(), raw.len());
    }

    #[test]
    fn given_overstated_length_when_decoding_then_allocation_bounded_by_payload() {
        let container = encode(b"{}", u32::MAX).unwrap();

        let decoded = decode(&container, LengthCheck::Warn).unwrap();
        assert_eq!(decoded, b"{}");
        let err = decode(&container, LengthCheck::Strict).unwrap_err();
        assert!(matches!(err, FormatError::LengthMismatch { declared: u32::MAX, actual: 2 }));
    }

    #[test]
    fn given_block_producing_no_bytes_when_decoding_then_decompress_failed() {
        let mut container = ContainerHeader { declared_len: 0 }.encode().to_vec();
        container.push(0x00);

        let err = decode(&container, LengthCheck::Ignore).unwrap_err();
        assert!(matches!(
            err,
            FormatError::DecompressFailed { ref reason } if reason == "zero bytes produced"
        ));
    }

    #[test]
    fn given_length_mismatch_when_strict_then_rejected() {
        let container = encode(SAMPLE, SAMPLE.len() as u32 + 1).unwrap();

        assert!(decode(&container, LengthCheck::Warn).is_ok());
        assert!(decode(&container, LengthCheck::Ignore).is_ok());
        let err = decode(&container, LengthCheck::Strict).unwrap_err();
        assert!(matches!(
            err,
            FormatError::LengthMismatch { declared, actual } if declared as usize == SAMPLE.len() + 1 && actual == SAMPLE.len()
        ));
    }

    #[test]
    fn given_empty_input_when_encoding_then_incompressible() {
        assert!(matches!(encode(b"", 0), Err(FormatError::Incompressible)));
    }

    #[test]
    fn test_length_check_from_str() {
        assert_eq!("Strict".parse::<LengthCheck>(), Ok(LengthCheck::Strict));
        assert_eq!(" warn ".parse::<LengthCheck>(), Ok(LengthCheck::Warn));
        assert!("loose".parse::<LengthCheck>().is_err());
    }
}
