//! Splitting and building length-delimited frames.
//!
//! # Example
//!
//! ```
//! use corenlp_client::protocol::{build_frame, split_frame};
//!
//! let frame = build_frame(b"record");
//! assert_eq!(frame[0], 6);
//! assert_eq!(split_frame(&frame).unwrap(), b"record");
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{decode_length_prefix, encode_length_prefix, length_prefix_width};
use crate::error::FramingError;

/// Return the record bytes of the frame at the start of `buf`.
///
/// Consumes exactly the prefix width plus the declared length; anything
/// after that is ignored.
pub fn split_frame(buf: &[u8]) -> Result<&[u8], FramingError> {
    let prefix = decode_length_prefix(buf)?;
    let rest = &buf[prefix.width..];

    match usize::try_from(prefix.length) {
        Ok(length) if length <= rest.len() => Ok(&rest[..length]),
        _ => Err(FramingError::Truncated {
            declared: prefix.length,
            available: rest.len(),
        }),
    }
}

/// Build a frame: varint length prefix followed by the record bytes.
pub fn build_frame(record: &[u8]) -> Bytes {
    let length = record.len() as u64;
    let mut buf = BytesMut::with_capacity(length_prefix_width(length) + record.len());
    encode_length_prefix(length, &mut buf);
    buf.put_slice(record);
    buf.freeze()
}
