//! PDU encoding and decoding for the unicast data channel.
//!
//! Wire format, everything ASCII except the payload:
//!
//! ```text
//! +-----------+-----+----------------+-----+----------------+
//! | UPDREQPDU | ' ' | decimal length | ' ' | UTF-8 payload  |
//! +-----------+-----+----------------+-----+----------------+
//! ```
//!
//! The length field holds the exact UTF-8 byte length of the payload, and
//! the whole PDU is capped at [`MAX_PDU_SIZE`] bytes. No I/O happens
//! here; this is pure data transformation.

use std::str;

use thiserror::Error;

/// ASCII tag opening every data PDU.
pub const DATA_PDU_TAG: &str = "UPDREQPDU";

/// Maximum size of one PDU on the wire, in bytes: tag, length field,
/// separators and payload together.
pub const MAX_PDU_SIZE: usize = 1024;

/// Errors that can occur while framing or parsing a PDU.
#[derive(Debug, Error)]
pub enum FramingError {
    /// Encoded PDU would exceed [`MAX_PDU_SIZE`] bytes.
    #[error("pdu exceeds 1024-byte limit: header={header}, payload={payload}, total={total}")]
    Oversized {
        /// Byte length of the rendered header.
        header: usize,
        /// Byte length of the payload.
        payload: usize,
        /// Total PDU size.
        total: usize,
    },

    /// Datagram is not valid UTF-8.
    #[error("datagram is not valid utf-8: {0}")]
    Utf8(#[from] str::Utf8Error),

    /// Datagram does not start with the PDU tag followed by a space.
    #[error("missing pdu header")]
    BadHeader,

    /// No space delimits the length field from the payload.
    #[error("missing length field")]
    MissingLength,

    /// Length field is not a non-negative decimal integer.
    #[error("unparsable length field `{0}`")]
    BadLength(String),

    /// Declared length does not match the payload's UTF-8 byte length.
    #[error("length mismatch: header declares {declared} bytes, payload has {actual}")]
    LengthMismatch {
        /// Length declared in the header.
        declared: usize,
        /// Actual payload byte length.
        actual: usize,
    },
}

/// Frame a payload into a wire-ready PDU.
///
/// Fails with [`FramingError::Oversized`] before any network attempt when
/// the framed PDU would exceed [`MAX_PDU_SIZE`] bytes.
pub fn encode(payload: &str) -> Result<Vec<u8>, FramingError> {
    let header = format!("{DATA_PDU_TAG} {} ", payload.len());
    let total = header.len() + payload.len();
    if total > MAX_PDU_SIZE {
        return Err(FramingError::Oversized {
            header: header.len(),
            payload: payload.len(),
            total,
        });
    }

    let mut pdu = Vec::with_capacity(total);
    pdu.extend_from_slice(header.as_bytes());
    pdu.extend_from_slice(payload.as_bytes());
    Ok(pdu)
}

/// Parse a received datagram back into its payload.
///
/// Everything after the length field's delimiting space belongs to the
/// payload, which may itself contain spaces or newlines.
pub fn decode(datagram: &[u8]) -> Result<String, FramingError> {
    let text = str::from_utf8(datagram)?;

    let rest = text
        .strip_prefix(DATA_PDU_TAG)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(FramingError::BadHeader)?;

    let (length, payload) = rest.split_once(' ').ok_or(FramingError::MissingLength)?;
    let declared: usize = length
        .parse()
        .map_err(|_| FramingError::BadLength(length.to_owned()))?;

    if payload.len() != declared {
        return Err(FramingError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok(payload.to_owned())
}
