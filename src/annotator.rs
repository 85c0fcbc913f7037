//! Annotator names, predefined bundles, and validation.
//!
//! An [`Annotator`] is an opaque CoreNLP stage name such as `"tokenize"` or
//! `"ner"`. Constants cover the documented vocabulary, but any string is
//! accepted: CoreNLP loads custom annotators by name.
//!
//! Stages depend on each other (`pos` needs `tokenize` and `ssplit`), and
//! [`Annotator::requirements`] exposes that as metadata. It is never enforced:
//! callers list stages in an order CoreNLP accepts.
//!
//! # Example
//!
//! ```
//! use corenlp_client::annotator::{self, Annotator};
//!
//! let mut stages = annotator::BASIC.to_vec();
//! stages.push(Annotator::NER);
//! annotator::validate_annotators(&stages).unwrap();
//!
//! let names = annotator::annotators_to_strings(&stages);
//! assert_eq!(names.join(","), "tokenize,ssplit,pos,lemma,ner");
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A CoreNLP annotator (pipeline stage) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotator(Cow<'static, str>);

impl Annotator {
    // Core annotators

    /// Splits raw text into tokens. Usually the first stage.
    pub const TOKENIZE: Annotator = Annotator::from_static("tokenize");
    /// Removes XML tags. Runs before tokenization.
    pub const CLEAN_XML: Annotator = Annotator::from_static("cleanxml");
    /// Splits tokens into sentences.
    pub const SSPLIT: Annotator = Annotator::from_static("ssplit");
    /// Extracts the document date.
    pub const DOC_DATE: Annotator = Annotator::from_static("docdate");
    /// Part-of-speech tags.
    pub const POS: Annotator = Annotator::from_static("pos");
    /// Lemmas (dictionary forms).
    pub const LEMMA: Annotator = Annotator::from_static("lemma");

    // Named entity recognition

    /// Named entity tags (person, organization, location, date, ...).
    pub const NER: Annotator = Annotator::from_static("ner");
    /// Rule-based NER using regular expressions.
    pub const REGEX_NER: Annotator = Annotator::from_static("regexner");
    /// Full entity mentions.
    pub const ENTITY_MENTIONS: Annotator = Annotator::from_static("entitymentions");
    /// Links entity mentions to Wikipedia entities.
    pub const ENTITY_LINK: Annotator = Annotator::from_static("entitylink");

    // Parsing

    /// Constituency parse trees.
    pub const PARSE: Annotator = Annotator::from_static("parse");
    /// Dependency parses.
    pub const DEPPARSE: Annotator = Annotator::from_static("depparse");

    // Coreference

    /// Coreference resolution.
    pub const COREF: Annotator = Annotator::from_static("coref");
    /// Older deterministic coreference system.
    pub const DCOREF: Annotator = Annotator::from_static("dcoref");
    /// Coreference mention detection.
    pub const MENTION: Annotator = Annotator::from_static("mention");

    // Sentiment and semantics

    /// Sentence sentiment.
    pub const SENTIMENT: Annotator = Annotator::from_static("sentiment");
    /// Natural logic polarity and quantifier scope.
    pub const NATLOG: Annotator = Annotator::from_static("natlog");
    /// Open-domain relation triples.
    pub const OPENIE: Annotator = Annotator::from_static("openie");
    /// True case of tokens.
    pub const TRUECASE: Annotator = Annotator::from_static("truecase");
    /// Universal Dependencies features.
    pub const UD_FEATS: Annotator = Annotator::from_static("udfeats");

    // Information extraction

    /// Relations between entity pairs.
    pub const RELATION: Annotator = Annotator::from_static("relation");
    /// Knowledge base population triples.
    pub const KBP: Annotator = Annotator::from_static("kbp");

    // Quotes and patterns

    /// Quotations delimited by quote marks.
    pub const QUOTE: Annotator = Annotator::from_static("quote");
    /// Attributes quotes to speakers.
    pub const QUOTE_ATTRIBUTION: Annotator = Annotator::from_static("quote.attribution");
    /// TokensRegex patterns.
    pub const TOKENS_REGEX: Annotator = Annotator::from_static("tokensregex");

    /// Create an annotator from a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create an annotator from any name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The annotator name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stages CoreNLP expects to run before this one.
    ///
    /// Documentation only; returns an empty slice for stages without
    /// prerequisites and for names outside the known vocabulary.
    pub fn requirements(&self) -> &'static [Annotator] {
        use self::requires::*;

        match self.as_str() {
            "ssplit" => TOKENIZE_ONLY,
            "pos" | "quote" | "tokensregex" => TOKENIZE_SSPLIT,
            "lemma" | "parse" | "depparse" | "udfeats" => UP_TO_POS,
            "ner" => UP_TO_LEMMA,
            "regexner" | "entitymentions" => UP_TO_NER,
            "entitylink" => ENTITY_LINK,
            "coref" | "dcoref" | "mention" | "relation" => COREF,
            "sentiment" => SENTIMENT,
            "natlog" => NATLOG,
            "openie" => OPENIE,
            "kbp" => KBP,
            "quote.attribution" => QUOTE_ATTRIBUTION,
            _ => &[],
        }
    }
}

mod requires {
    use super::Annotator;

    const T: Annotator = Annotator::TOKENIZE;
    const S: Annotator = Annotator::SSPLIT;
    const P: Annotator = Annotator::POS;
    const L: Annotator = Annotator::LEMMA;
    const N: Annotator = Annotator::NER;

    pub const TOKENIZE_ONLY: &[Annotator] = &[T];
    pub const TOKENIZE_SSPLIT: &[Annotator] = &[T, S];
    pub const UP_TO_POS: &[Annotator] = &[T, S, P];
    pub const UP_TO_LEMMA: &[Annotator] = &[T, S, P, L];
    pub const UP_TO_NER: &[Annotator] = &[T, S, P, L, N];
    pub const ENTITY_LINK: &[Annotator] = &[T, S, P, L, N, Annotator::ENTITY_MENTIONS];
    pub const COREF: &[Annotator] = &[T, S, P, L, N, Annotator::PARSE];
    pub const SENTIMENT: &[Annotator] = &[T, S, Annotator::PARSE];
    pub const NATLOG: &[Annotator] = &[T, S, P, L, Annotator::DEPPARSE];
    pub const OPENIE: &[Annotator] = &[T, S, P, L, Annotator::DEPPARSE, Annotator::NATLOG];
    pub const KBP: &[Annotator] = &[T, S, P, L, N, Annotator::PARSE, Annotator::COREF];
    pub const QUOTE_ATTRIBUTION: &[Annotator] = &[
        T,
        S,
        P,
        L,
        N,
        Annotator::DEPPARSE,
        Annotator::COREF,
        Annotator::QUOTE,
    ];
}

impl fmt::Display for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Annotator {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Annotator {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Annotator {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&Annotator> for Annotator {
    fn from(annotator: &Annotator) -> Self {
        annotator.clone()
    }
}

/// Tokenization, sentence splitting, POS tagging, lemmatization.
pub const BASIC: &[Annotator] = &[
    Annotator::TOKENIZE,
    Annotator::SSPLIT,
    Annotator::POS,
    Annotator::LEMMA,
];

/// [`BASIC`] plus constituency and dependency parsing.
pub const SYNTAX: &[Annotator] = &[
    Annotator::TOKENIZE,
    Annotator::SSPLIT,
    Annotator::POS,
    Annotator::LEMMA,
    Annotator::PARSE,
    Annotator::DEPPARSE,
];

/// [`BASIC`] plus named entities and entity mentions.
pub const NER: &[Annotator] = &[
    Annotator::TOKENIZE,
    Annotator::SSPLIT,
    Annotator::POS,
    Annotator::LEMMA,
    Annotator::NER,
    Annotator::ENTITY_MENTIONS,
];

/// Parsing, NER and coreference.
pub const SEMANTIC: &[Annotator] = &[
    Annotator::TOKENIZE,
    Annotator::SSPLIT,
    Annotator::POS,
    Annotator::LEMMA,
    Annotator::NER,
    Annotator::PARSE,
    Annotator::DEPPARSE,
    Annotator::COREF,
];

/// Everything needed for open information extraction.
pub const RELATION_EXTRACTION: &[Annotator] = &[
    Annotator::TOKENIZE,
    Annotator::SSPLIT,
    Annotator::POS,
    Annotator::LEMMA,
    Annotator::NER,
    Annotator::PARSE,
    Annotator::DEPPARSE,
    Annotator::NATLOG,
    Annotator::OPENIE,
];

/// Check that the list is non-empty and has no blank names.
///
/// Does not check dependencies or ordering.
pub fn validate_annotators(annotators: &[Annotator]) -> Result<(), ConfigurationError> {
    if annotators.is_empty() {
        return Err(ConfigurationError::NoAnnotators);
    }

    match annotators
        .iter()
        .position(|a| a.as_str().trim().is_empty())
    {
        Some(index) => Err(ConfigurationError::BlankAnnotator {
            index,
            value: annotators[index].as_str().to_string(),
        }),
        None => Ok(()),
    }
}

/// Convert annotators to their names, preserving order.
pub fn annotators_to_strings(annotators: &[Annotator]) -> Vec<String> {
    annotators.iter().map(|a| a.as_str().to_string()).collect()
}

/// Convert names to annotators, preserving order.
pub fn strings_to_annotators<S: AsRef<str>>(names: &[S]) -> Vec<Annotator> {
    names.iter().map(|n| Annotator::new(n.as_ref())).collect()
}

/// Comma-joined names, as CoreNLP expects them.
pub(crate) fn join(annotators: &[Annotator]) -> String {
    annotators
        .iter()
        .map(Annotator::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_names() {
        assert_eq!(Annotator::TOKENIZE.as_str(), "tokenize");
        assert_eq!(Annotator::SSPLIT.to_string(), "ssplit");
        assert_eq!(Annotator::QUOTE_ATTRIBUTION.as_str(), "quote.attribution");
        assert_eq!(Annotator::from("pos"), Annotator::POS);
        assert_eq!(Annotator::from("lemma".to_string()), Annotator::LEMMA);
    }

    #[test]
    fn test_bundles_are_ordered() {
        assert_eq!(join(BASIC), "tokenize,ssplit,pos,lemma");
        assert_eq!(join(SYNTAX), "tokenize,ssplit,pos,lemma,parse,depparse");
        assert_eq!(join(NER), "tokenize,ssplit,pos,lemma,ner,entitymentions");
        assert_eq!(
            join(SEMANTIC),
            "tokenize,ssplit,pos,lemma,ner,parse,depparse,coref"
        );
        assert_eq!(
            join(RELATION_EXTRACTION),
            "tokenize,ssplit,pos,lemma,ner,parse,depparse,natlog,openie"
        );
    }

    #[test]
    fn test_bundles_start_with_basic() {
        for bundle in [SYNTAX, NER, SEMANTIC, RELATION_EXTRACTION] {
            assert_eq!(&bundle[..BASIC.len()], BASIC);
        }
    }

    #[test]
    fn test_validate_accepts_bundles() {
        for bundle in [BASIC, SYNTAX, NER, SEMANTIC, RELATION_EXTRACTION] {
            assert!(validate_annotators(bundle).is_ok());
        }
    }

    #[test]
    fn test_validate_empty_list() {
        assert!(matches!(
            validate_annotators(&[]),
            Err(ConfigurationError::NoAnnotators)
        ));
    }

    #[test]
    fn test_validate_blank_entry() {
        let stages = strings_to_annotators(&["tokenize", " \t", "pos"]);
        match validate_annotators(&stages) {
            Err(ConfigurationError::BlankAnnotator { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, " \t");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let stages = strings_to_annotators(&["tokenize", ""]);
        assert!(validate_annotators(&stages).is_err());
    }

    #[test]
    fn test_validate_ignores_ordering() {
        // Dependencies are documentation only.
        let stages = vec![Annotator::COREF, Annotator::TOKENIZE];
        assert!(validate_annotators(&stages).is_ok());
    }

    #[test]
    fn test_custom_annotator_accepted() {
        let stages = vec![Annotator::TOKENIZE, Annotator::new("custom.stage")];
        assert!(validate_annotators(&stages).is_ok());
        assert!(Annotator::new("custom.stage").requirements().is_empty());
    }

    #[test]
    fn test_requirements_metadata() {
        assert!(Annotator::TOKENIZE.requirements().is_empty());
        assert_eq!(Annotator::SSPLIT.requirements(), &[Annotator::TOKENIZE]);
        assert_eq!(join(Annotator::LEMMA.requirements()), "tokenize,ssplit,pos");
        assert_eq!(
            join(Annotator::OPENIE.requirements()),
            "tokenize,ssplit,pos,lemma,depparse,natlog"
        );
        assert_eq!(
            join(Annotator::KBP.requirements()),
            "tokenize,ssplit,pos,lemma,ner,parse,coref"
        );
    }

    #[test]
    fn test_string_conversions() {
        let names = vec!["tokenize", "ssplit", "pos"];
        let annotators = strings_to_annotators(&names);
        assert_eq!(annotators, vec![Annotator::TOKENIZE, Annotator::SSPLIT, Annotator::POS]);
        assert_eq!(annotators_to_strings(&annotators), names);

        let empty: Vec<String> = Vec::new();
        assert!(strings_to_annotators(&empty).is_empty());
        assert!(annotators_to_strings(&[]).is_empty());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&BASIC.to_vec()).unwrap();
        assert_eq!(json, r#"["tokenize","ssplit","pos","lemma"]"#);

        let parsed: Vec<Annotator> = serde_json::from_str(r#"["ner","openie"]"#).unwrap();
        assert_eq!(parsed, vec![Annotator::NER, Annotator::OPENIE]);
    }
}
