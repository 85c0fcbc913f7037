//! Client configuration values and their defaults.
//!
//! Both configs deserialize with `#[serde(default)]`, so an application config
//! file only needs the fields it overrides:
//!
//! ```
//! use corenlp_client::config::HttpConfig;
//!
//! let config: HttpConfig =
//!     serde_json::from_str(r#"{"url": "http://nlp:9000", "timeout": 5}"#).unwrap();
//! assert_eq!(config.timeout.as_secs(), 5);
//! assert!(config.annotators.is_empty());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::annotator::Annotator;
use crate::error::ConfigurationError;

/// Default Java executable.
pub const DEFAULT_JAVA_CMD: &str = "java";

/// Default Java classpath (jars in the working directory).
pub const DEFAULT_CLASSPATH: &str = "*";

/// Default CoreNLP pipeline driver class.
pub const DEFAULT_PIPELINE_CLASS: &str = "edu.stanford.nlp.pipeline.StanfordCoreNLP";

/// Serializer class producing length-delimited protobuf output.
pub const PROTOBUF_SERIALIZER: &str = "edu.stanford.nlp.pipeline.ProtobufAnnotationSerializer";

/// Default CoreNLP server address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:9000";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for running CoreNLP as a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Annotators, in pipeline order. Empty means CoreNLP's defaults.
    pub annotators: Vec<Annotator>,
    /// Java executable.
    pub java_cmd: String,
    /// Classpath passed with `-cp`; omitted when empty.
    pub classpath: String,
    /// Pipeline driver class.
    pub class: String,
    /// Extra arguments placed before `-cp` (e.g. `-Xmx4g`).
    pub args: Vec<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            annotators: Vec::new(),
            java_cmd: DEFAULT_JAVA_CMD.to_string(),
            classpath: DEFAULT_CLASSPATH.to_string(),
            class: DEFAULT_PIPELINE_CLASS.to_string(),
            args: Vec::new(),
        }
    }
}

/// Configuration for talking to a CoreNLP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Annotators, in pipeline order. Empty means the server's defaults.
    pub annotators: Vec<Annotator>,
    /// Server base URL.
    pub url: String,
    /// Whole-request timeout, in seconds when (de)serialized.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Connection establishment timeout, in seconds when (de)serialized.
    /// `None` leaves it to the whole-request timeout.
    #[serde(with = "opt_duration_secs")]
    pub connect_timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            annotators: Vec::new(),
            url: DEFAULT_SERVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: None,
        }
    }
}

/// Reject blank annotator names. An empty list is allowed here: both
/// backends then fall back to CoreNLP's default pipeline.
pub(crate) fn check_annotators(annotators: &[Annotator]) -> Result<(), ConfigurationError> {
    if annotators.is_empty() {
        return Ok(());
    }
    crate::annotator::validate_annotators(annotators)
}

/// Normalize a base URL to end in exactly one `/`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

mod opt_duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
            .transpose()
    }
}
