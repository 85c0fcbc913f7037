//! CoreNLP document schema.
//!
//! A subset of `edu.stanford.nlp.pipeline.CoreNLP.proto` (proto2), with the
//! same field tags. Fields this crate does not model are skipped on decode.
//!
//! ```
//! use corenlp_client::nlp::{Document, Sentence, Token};
//! use prost::Message;
//!
//! let doc = Document {
//!     text: "Hi.".to_string(),
//!     sentence: vec![Sentence {
//!         token: vec![Token { word: Some("Hi".into()), ..Default::default() }],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//! let decoded = Document::decode(doc.encode_to_vec().as_slice()).unwrap();
//! assert_eq!(decoded, doc);
//! ```

/// Root message returned by CoreNLP.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Document {
    /// The original text.
    #[prost(string, required, tag = "1")]
    pub text: String,
    #[prost(message, repeated, tag = "2")]
    pub sentence: Vec<Sentence>,
    #[prost(string, optional, tag = "4")]
    pub doc_id: Option<String>,
    /// Tokens not assigned to any sentence (when `ssplit` is not run).
    #[prost(message, repeated, tag = "5")]
    pub sentenceless_token: Vec<Token>,
    #[prost(string, optional, tag = "7")]
    pub doc_date: Option<String>,
    #[prost(uint64, optional, tag = "8")]
    pub calendar: Option<u64>,
}

/// A sentence and its tokens.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Sentence {
    #[prost(message, repeated, tag = "1")]
    pub token: Vec<Token>,
    #[prost(uint32, required, tag = "2")]
    pub token_offset_begin: u32,
    #[prost(uint32, required, tag = "3")]
    pub token_offset_end: u32,
    #[prost(uint32, optional, tag = "4")]
    pub sentence_index: Option<u32>,
    #[prost(uint32, optional, tag = "5")]
    pub character_offset_begin: Option<u32>,
    #[prost(uint32, optional, tag = "6")]
    pub character_offset_end: Option<u32>,
}

/// A single token with its per-annotator fields.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Token {
    #[prost(string, optional, tag = "1")]
    pub word: Option<String>,
    /// Part-of-speech tag (`pos`).
    #[prost(string, optional, tag = "2")]
    pub pos: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub value: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub category: Option<String>,
    /// Whitespace before the token.
    #[prost(string, optional, tag = "5")]
    pub before: Option<String>,
    /// Whitespace after the token.
    #[prost(string, optional, tag = "6")]
    pub after: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub original_text: Option<String>,
    /// Named entity tag (`ner`).
    #[prost(string, optional, tag = "8")]
    pub ner: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub normalized_ner: Option<String>,
    /// Lemma (`lemma`).
    #[prost(string, optional, tag = "10")]
    pub lemma: Option<String>,
    #[prost(uint32, optional, tag = "11")]
    pub begin_char: Option<u32>,
    #[prost(uint32, optional, tag = "12")]
    pub end_char: Option<u32>,
    #[prost(uint32, optional, tag = "13")]
    pub utterance: Option<u32>,
    #[prost(string, optional, tag = "14")]
    pub speaker: Option<String>,
    #[prost(uint32, optional, tag = "15")]
    pub begin_index: Option<u32>,
    #[prost(uint32, optional, tag = "16")]
    pub end_index: Option<u32>,
    #[prost(uint32, optional, tag = "17")]
    pub token_begin_index: Option<u32>,
    #[prost(uint32, optional, tag = "18")]
    pub token_end_index: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_token_field_tags() {
        let token = Token {
            word: Some("a".to_string()),
            lemma: Some("a".to_string()),
            ..Default::default()
        };
        let bytes = token.encode_to_vec();
        // field 1, wire type 2 (length-delimited), length 1, "a"
        assert_eq!(&bytes[..3], &[0x0A, 0x01, b'a']);
        // field 10, wire type 2
        assert_eq!(&bytes[3..6], &[0x52, 0x01, b'a']);
    }

    #[test]
    fn test_unknown_fields_are_skipped() {
        let mut bytes = Document {
            text: "x".to_string(),
            ..Default::default()
        }
        .encode_to_vec();
        // field 3 (coref chains, not modelled): empty length-delimited value
        bytes.extend_from_slice(&[0x1A, 0x00]);

        let doc = Document::decode(bytes.as_slice()).unwrap();
        assert_eq!(doc.text, "x");
        assert!(doc.sentence.is_empty());
    }
}
