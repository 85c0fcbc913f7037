//! Gzip detection and inflation for CoreNLP output artifacts.
//!
//! The command line pipeline names its output `*.ser.gz`; depending on the
//! CoreNLP version the file is gzip-compressed or written as-is. The magic
//! bytes decide.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::GzDecoder;

use crate::error::DecodeError;

/// Gzip member magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Gzip codec for artifacts that may or may not be compressed.
pub struct GzipCodec;

impl GzipCodec {
    /// Check if `data` starts with the gzip magic bytes.
    #[inline]
    pub fn is_compressed(data: &[u8]) -> bool {
        data.starts_with(&GZIP_MAGIC)
    }

    /// Inflate `data` if it is gzip-compressed, otherwise borrow it unchanged.
    ///
    /// A framed document never starts with `1F 8B`: that would be a 31-byte
    /// record opening with a group-typed field tag, which CoreNLP never emits.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Decompress` if the gzip stream is corrupt.
    pub fn maybe_decompress(data: &[u8]) -> Result<Cow<'_, [u8]>, DecodeError> {
        if !Self::is_compressed(data) {
            return Ok(Cow::Borrowed(data));
        }

        let mut inflated = Vec::with_capacity(data.len() * 4);
        GzDecoder::new(data)
            .read_to_end(&mut inflated)
            .map_err(DecodeError::Decompress)?;
        Ok(Cow::Owned(inflated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_plain_data_is_borrowed() {
        let data = b"\x03abc";
        let out = GzipCodec::maybe_decompress(data).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&out[..], data);
    }

    #[test]
    fn test_compressed_data_is_inflated() {
        let data = b"\x03abc";
        let compressed = gzip(data);
        assert!(GzipCodec::is_compressed(&compressed));

        let out = GzipCodec::maybe_decompress(&compressed).unwrap();
        assert_eq!(&out[..], data);
    }

    #[test]
    fn test_corrupt_gzip() {
        // Valid header, then a deflate block with the reserved block type.
        let mut compressed = vec![0x1F, 0x8B, 0x08, 0, 0, 0, 0, 0, 0, 0xFF];
        compressed.extend_from_slice(&[0xFF; 16]);
        assert!(matches!(
            GzipCodec::maybe_decompress(&compressed),
            Err(DecodeError::Decompress(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(!GzipCodec::is_compressed(&[]));
        assert!(GzipCodec::maybe_decompress(&[]).unwrap().is_empty());
    }
}
