//! Varint length prefix encoding and decoding.
//!
//! CoreNLP writes each serialized document as a length-delimited protobuf
//! record:
//! ```text
//! ┌──────────────────────┬──────────────────────┐
//! │ Length L             │ Record               │
//! │ 1-10 bytes           │ L bytes              │
//! │ base-128 varint (LE) │ protobuf Document    │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Each varint byte carries 7 bits, least significant group first; the high
//! bit is set on every byte except the last.

use bytes::BufMut;

use crate::error::FramingError;

/// Maximum encoded width of a u64 varint.
pub const MAX_VARINT_WIDTH: usize = 10;

/// Continuation bit of a varint byte.
const CONTINUATION: u8 = 0x80;

/// Payload bits of a varint byte.
const PAYLOAD_MASK: u8 = 0x7F;

/// A decoded length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPrefix {
    /// Declared record length in bytes.
    pub length: u64,
    /// Number of bytes the prefix itself occupies.
    pub width: usize,
}

/// Decode the varint length prefix at the start of `buf`.
///
/// # Example
///
/// ```
/// use corenlp_client::protocol::decode_length_prefix;
///
/// // 300 = 0b10_0101100 -> [0xAC, 0x02]
/// let prefix = decode_length_prefix(&[0xAC, 0x02, 0xFF]).unwrap();
/// assert_eq!(prefix.length, 300);
/// assert_eq!(prefix.width, 2);
/// ```
pub fn decode_length_prefix(buf: &[u8]) -> Result<LengthPrefix, FramingError> {
    let mut length: u64 = 0;

    for (i, &byte) in buf.iter().take(MAX_VARINT_WIDTH).enumerate() {
        let last_slot = i == MAX_VARINT_WIDTH - 1;

        if last_slot && byte & CONTINUATION != 0 {
            return Err(FramingError::Unterminated {
                max_width: MAX_VARINT_WIDTH,
            });
        }
        // Only one bit of the tenth byte fits in a u64.
        if last_slot && byte > 0x01 {
            return Err(FramingError::Overflow);
        }

        length |= u64::from(byte & PAYLOAD_MASK) << (7 * i);

        if byte & CONTINUATION == 0 {
            return Ok(LengthPrefix {
                length,
                width: i + 1,
            });
        }
    }

    Err(FramingError::Incomplete { read: buf.len() })
}

/// Encode `length` as a varint into `buf`.
pub fn encode_length_prefix<B: BufMut>(mut length: u64, buf: &mut B) {
    while length >= u64::from(CONTINUATION) {
        buf.put_u8((length as u8 & PAYLOAD_MASK) | CONTINUATION);
        length >>= 7;
    }
    buf.put_u8(length as u8);
}

/// Number of bytes `encode_length_prefix` writes for `length`.
#[inline]
pub fn length_prefix_width(length: u64) -> usize {
    let bits = 64 - (length | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}
