//! Protobuf codec using `prost`.
//!
//! Decodes framed CoreNLP responses into any `prost::Message`, normally
//! [`crate::nlp::Document`].

use bytes::Bytes;
use prost::Message;

use super::gzip::GzipCodec;
use crate::error::DecodeError;
use crate::protocol::{build_frame, split_frame};

/// Protobuf codec for length-delimited CoreNLP records.
pub struct ProtobufCodec;

impl ProtobufCodec {
    /// Decode a framed record into `target`, replacing its contents.
    ///
    /// Reads the varint length `L`, then decodes exactly the next `L` bytes.
    /// Bytes after the record are ignored.
    ///
    /// # Errors
    ///
    /// - `DecodeError::Framing` if the prefix is malformed or fewer than `L`
    ///   bytes follow it
    /// - `DecodeError::Payload` if the record is not valid protobuf
    pub fn decode_into<M: Message>(buf: &[u8], target: &mut M) -> Result<(), DecodeError> {
        let record = split_frame(buf)?;
        target.clear();
        target.merge(record)?;

        tracing::trace!(
            framed = buf.len(),
            record = record.len(),
            "decoded framed record"
        );
        Ok(())
    }

    /// Like [`decode_into`](Self::decode_into), inflating gzip input first.
    pub fn decode_artifact_into<M: Message>(
        data: &[u8],
        target: &mut M,
    ) -> Result<(), DecodeError> {
        let framed = GzipCodec::maybe_decompress(data)?;
        Self::decode_into(&framed, target)
    }

    /// Encode a record as a framed buffer.
    pub fn encode_framed<M: Message>(record: &M) -> Bytes {
        build_frame(&record.encode_to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramingError;
    use crate::nlp::{Document, Sentence, Token};

    fn token(word: &str) -> Token {
        Token {
            word: Some(word.to_string()),
            ..Default::default()
        }
    }

    fn sample_document() -> Document {
        Document {
            text: "Hello world.".to_string(),
            sentence: vec![Sentence {
                token: vec![token("Hello"), token("world"), token(".")],
                token_offset_begin: 0,
                token_offset_end: 3,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_framed_document() {
        let framed = ProtobufCodec::encode_framed(&sample_document());

        let mut doc = Document::default();
        ProtobufCodec::decode_into(&framed, &mut doc).unwrap();
        assert_eq!(doc, sample_document());
    }

    #[test]
    fn test_decode_replaces_previous_contents() {
        let framed = ProtobufCodec::encode_framed(&sample_document());

        let mut doc = sample_document();
        doc.doc_id = Some("stale".to_string());
        ProtobufCodec::decode_into(&framed, &mut doc).unwrap();
        assert_eq!(doc.doc_id, None);
        assert_eq!(doc.sentence.len(), 1);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = ProtobufCodec::encode_framed(&sample_document()).to_vec();
        buf.extend_from_slice(&[0xFF, 0xFF, 0xFF]);

        let mut doc = Document::default();
        ProtobufCodec::decode_into(&buf, &mut doc).unwrap();
        assert_eq!(doc.text, "Hello world.");
    }

    #[test]
    fn test_decode_truncated_record() {
        let framed = ProtobufCodec::encode_framed(&sample_document());
        let short = &framed[..framed.len() - 1];

        let mut doc = Document::default();
        let err = ProtobufCodec::decode_into(short, &mut doc).unwrap_err();
        assert!(err.is_framing());
        assert!(matches!(
            err,
            DecodeError::Framing(FramingError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decode_invalid_payload() {
        // Frame of three bytes: field 1 length-delimited claiming 100 bytes.
        let framed = build_frame(&[0x0A, 0x64, 0x00]);

        let mut doc = Document::default();
        let err = ProtobufCodec::decode_into(&framed, &mut doc).unwrap_err();
        assert!(matches!(err, DecodeError::Payload(_)));
    }

    #[test]
    fn test_decode_gzip_artifact() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let framed = ProtobufCodec::encode_framed(&sample_document());
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(&framed).unwrap();
        let artifact = encoder.finish().unwrap();

        let mut doc = Document::default();
        ProtobufCodec::decode_artifact_into(&artifact, &mut doc).unwrap();
        assert_eq!(doc, sample_document());

        // Uncompressed artifacts decode too.
        let mut doc = Document::default();
        ProtobufCodec::decode_artifact_into(&framed, &mut doc).unwrap();
        assert_eq!(doc, sample_document());
    }
}
