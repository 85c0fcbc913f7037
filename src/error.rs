//! Error types for corenlp-client.
//!
//! Every failure is one of a closed set of categories:
//!
//! - [`CoreNlpError::EmptyInput`] / [`CoreNlpError::MissingDocument`]: sentinels
//!   checked before any I/O
//! - [`ConfigurationError`]: invalid caller-supplied setup
//! - [`TransportError`]: the CoreNLP server could not be reached or rejected the request
//! - [`ExecutionError`]: the CoreNLP command could not be started or failed
//! - [`DecodeError`]: the response framing or protobuf payload is invalid
//!
//! Use [`CoreNlpError::category`] to branch on the category without matching
//! every variant.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for all client operations.
#[derive(Debug, Error)]
pub enum CoreNlpError {
    /// The input text is empty.
    #[error("input text is empty")]
    EmptyInput,

    /// No output document was supplied to populate.
    #[error("output document cannot be absent")]
    MissingDocument,

    /// Invalid annotator list or other client setup.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// CoreNLP server unreachable or non-2xx response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// CoreNLP command failed to start or exited non-zero.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// Response framing or payload decode failure.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// I/O error on local files (input file, temporary area, output artifact).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse category of a [`CoreNlpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Empty input or missing output document.
    Input,
    /// Invalid client setup.
    Configuration,
    /// HTTP backend failure.
    Transport,
    /// Command backend failure.
    Execution,
    /// Framing or payload decode failure.
    Decode,
    /// Local file I/O.
    Io,
}

impl CoreNlpError {
    /// The category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreNlpError::EmptyInput | CoreNlpError::MissingDocument => ErrorCategory::Input,
            CoreNlpError::Configuration(_) => ErrorCategory::Configuration,
            CoreNlpError::Transport(_) => ErrorCategory::Transport,
            CoreNlpError::Execution(_) => ErrorCategory::Execution,
            CoreNlpError::Decode(_) => ErrorCategory::Decode,
            CoreNlpError::Io(_) => ErrorCategory::Io,
        }
    }

    /// Check if the call was aborted through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        match self {
            CoreNlpError::Transport(e) => e.cancelled,
            CoreNlpError::Execution(e) => matches!(e.failure, CommandFailure::Cancelled),
            _ => false,
        }
    }
}

/// Invalid caller-supplied configuration. Always detected before any I/O.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The annotator list is empty.
    #[error("at least one annotator is required")]
    NoAnnotators,

    /// An annotator name is empty or whitespace only.
    #[error("annotator at index {index} is empty or whitespace: {value:?}")]
    BlankAnnotator { index: usize, value: String },

    /// The server URL cannot be parsed.
    #[error("invalid server URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server URL carries a query or fragment, which the request URL
    /// cannot be appended to.
    #[error("server URL {url:?} must not have a query or fragment")]
    UrlHasQueryOrFragment { url: String },

    /// The pipeline properties could not be encoded as JSON.
    #[error("failed to encode pipeline properties: {0}")]
    Properties(#[source] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Failure talking to the CoreNLP server.
///
/// `status` is `None` when the server was never reached (DNS, connection
/// refused, timeout, cancellation) and `Some` when it answered outside 2xx.
#[derive(Debug, Error)]
#[error("server error [{url}]{}: {message}", status_suffix(.status))]
pub struct TransportError {
    /// Configured base URL of the server.
    pub url: String,
    /// HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// Human-readable description.
    pub message: String,
    /// The request was aborted through its cancellation token.
    pub cancelled: bool,
    #[source]
    source: Option<reqwest::Error>,
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}

impl TransportError {
    /// The request could not be sent or the response could not be read.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            url: url.into(),
            status: None,
            message: source.to_string(),
            cancelled: false,
            source: Some(source),
        }
    }

    /// The server answered with a non-2xx status.
    pub fn status(url: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            url: url.into(),
            status: Some(status.as_u16()),
            message: format!("HTTP status {}", status),
            cancelled: false,
            source: None,
        }
    }

    /// The request was cancelled before a response arrived.
    pub fn cancelled(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            message: "request cancelled".to_string(),
            cancelled: true,
            source: None,
        }
    }

    /// The underlying `reqwest` error, if any.
    pub fn reqwest_error(&self) -> Option<&reqwest::Error> {
        self.source.as_ref()
    }
}

/// Failure running the CoreNLP command.
#[derive(Debug, Error)]
#[error("command error [{command}]: {failure}{}", stderr_suffix(.stderr))]
pub struct ExecutionError {
    /// Executable that was run.
    pub command: String,
    /// Captured standard error of the child, verbatim.
    pub stderr: String,
    /// What went wrong.
    #[source]
    pub failure: CommandFailure,
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\nstderr: {}", stderr.trim_end())
    }
}

/// The way a command invocation failed.
#[derive(Debug, Error)]
pub enum CommandFailure {
    /// The process could not be started.
    #[error("failed to start: {0}")]
    Spawn(#[source] io::Error),

    /// Waiting for the process or collecting its output failed.
    #[error("failed to collect output: {0}")]
    Wait(#[source] io::Error),

    /// The process exited unsuccessfully.
    #[error("{0}")]
    Exit(ExitStatus),

    /// The process was killed because the call was cancelled.
    #[error("cancelled")]
    Cancelled,
}

/// Failure decoding a framed response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The varint length prefix or payload length is invalid.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// The gzip-compressed artifact could not be inflated.
    #[error("failed to inflate gzip artifact: {0}")]
    Decompress(#[source] io::Error),

    /// The payload is not a valid protobuf record.
    #[error("parse error: {0}")]
    Payload(#[from] prost::DecodeError),
}

impl DecodeError {
    /// Check if this is a framing error (as opposed to a payload error).
    pub fn is_framing(&self) -> bool {
        matches!(self, DecodeError::Framing(_))
    }
}

/// Invalid length-prefixed framing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The buffer ended inside the varint prefix (or was empty).
    #[error("buffer ended after {read} bytes inside the length prefix")]
    Incomplete { read: usize },

    /// No terminating byte within the maximum varint width.
    #[error("length prefix is not terminated within {max_width} bytes")]
    Unterminated { max_width: usize },

    /// The varint does not fit in 64 bits.
    #[error("length prefix overflows 64 bits")]
    Overflow,

    /// Fewer payload bytes than the prefix declares.
    #[error("length prefix declares {declared} bytes but only {available} remain")]
    Truncated { declared: u64, available: usize },
}

/// Result type alias using CoreNlpError.
pub type Result<T> = std::result::Result<T, CoreNlpError>;
