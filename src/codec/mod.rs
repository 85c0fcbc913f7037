//! Codec module - decoding CoreNLP responses.
//!
//! - [`ProtobufCodec`] - length-delimited protobuf records via `prost`
//! - [`GzipCodec`] - transparent inflation of gzip-compressed artifacts
//!
//! # Design
//!
//! Codecs are marker structs with static methods, generic over the target
//! message type, so any `prost::Message` can be decoded.
//!
//! # Example
//!
//! ```
//! use corenlp_client::codec::ProtobufCodec;
//! use corenlp_client::nlp::Document;
//!
//! let doc = Document { text: "hello".to_string(), ..Default::default() };
//! let framed = ProtobufCodec::encode_framed(&doc);
//!
//! let mut decoded = Document::default();
//! ProtobufCodec::decode_into(&framed, &mut decoded).unwrap();
//! assert_eq!(decoded.text, "hello");
//! ```

mod gzip;
mod protobuf;

pub use gzip::{GzipCodec, GZIP_MAGIC};
pub use protobuf::ProtobufCodec;
