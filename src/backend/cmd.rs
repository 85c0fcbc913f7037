//! Running CoreNLP as a local command.
//!
//! Each call:
//! 1. Creates a temporary directory (removed when the call ends, however it ends)
//! 2. Writes the text to `input.text` inside it
//! 3. Runs `java ... StanfordCoreNLP -file input.text --outputDirectory <tmp> ...`
//! 4. Reads `input.text.ser.gz` and decodes it
//!
//! CoreNLP must be installed; see <https://stanfordnlp.github.io/CoreNLP/cmdline.html>.
//!
//! # Example
//!
//! ```ignore
//! use corenlp_client::{annotator, Client, CommandClient};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = CommandClient::builder()
//!     .annotators(annotator::BASIC)
//!     .classpath("/opt/stanford-corenlp/*")
//!     .arg("-Xmx2g")
//!     .build()?;
//!
//! let doc = client.annotate(&CancellationToken::new(), b"Hello world.").await?;
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::annotator::{self, Annotator};
use crate::client::{check_inputs, Client};
use crate::codec::ProtobufCodec;
use crate::config::{check_annotators, CommandConfig, PROTOBUF_SERIALIZER};
use crate::error::{CommandFailure, ExecutionError, Result};
use crate::nlp::Document;

/// Name of the input file inside the temporary directory.
pub const INPUT_FILE_NAME: &str = "input.text";

/// Suffix CoreNLP appends to the input file name for serialized output.
pub const OUTPUT_SUFFIX: &str = ".ser.gz";

/// Prefix of the per-call temporary directory.
const TEMP_DIR_PREFIX: &str = "corenlp";

/// Builder for [`CommandClient`].
///
/// Every option has a default (see [`crate::config`]).
#[derive(Debug, Clone, Default)]
pub struct CommandClientBuilder {
    config: CommandConfig,
}

impl CommandClientBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Replace the annotator list.
    pub fn annotators<I, A>(mut self, annotators: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Annotator>,
    {
        self.config.annotators = annotators.into_iter().map(Into::into).collect();
        self
    }

    /// Append one annotator.
    pub fn annotator(mut self, annotator: impl Into<Annotator>) -> Self {
        self.config.annotators.push(annotator.into());
        self
    }

    /// Set the Java executable.
    ///
    /// Default: `java`
    pub fn java_cmd(mut self, java_cmd: impl Into<String>) -> Self {
        self.config.java_cmd = java_cmd.into();
        self
    }

    /// Set the Java classpath. An empty classpath omits `-cp`.
    ///
    /// Default: `*`
    pub fn classpath(mut self, classpath: impl Into<String>) -> Self {
        self.config.classpath = classpath.into();
        self
    }

    /// Set the pipeline driver class.
    ///
    /// Default: `edu.stanford.nlp.pipeline.StanfordCoreNLP`
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.config.class = class.into();
        self
    }

    /// Append an extra argument, placed before `-cp`.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.config.args.push(arg.into());
        self
    }

    /// Append extra arguments, placed before `-cp`.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::BlankAnnotator` if an annotator name is blank.
    pub fn build(self) -> Result<CommandClient> {
        CommandClient::new(self.config)
    }
}

/// Runs CoreNLP as a child process, once per call.
#[derive(Debug, Clone)]
pub struct CommandClient {
    config: CommandConfig,
}

impl CommandClient {
    /// Create a new client builder.
    pub fn builder() -> CommandClientBuilder {
        CommandClientBuilder::new()
    }

    /// Create a client from a configuration.
    pub fn new(config: CommandConfig) -> Result<Self> {
        check_annotators(&config.annotators)?;
        Ok(Self { config })
    }

    /// The client configuration.
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Arguments passed to the Java command for one call.
    ///
    /// Order: extra args, `-cp`, driver class, `-annotators` (if any), then the
    /// fixed input/output flags.
    pub fn build_args(&self, input: &Path, output_dir: &Path) -> Vec<OsString> {
        let config = &self.config;
        let mut args: Vec<OsString> = config.args.iter().map(OsString::from).collect();

        if !config.classpath.is_empty() {
            args.push("-cp".into());
            args.push(config.classpath.as_str().into());
        }
        args.push(config.class.as_str().into());

        if !config.annotators.is_empty() {
            args.push("-annotators".into());
            args.push(annotator::join(&config.annotators).into());
        }

        args.push("-file".into());
        args.push(input.into());
        args.push("--outputDirectory".into());
        args.push(output_dir.into());
        args.push("-outputFormat".into());
        args.push("serialized".into());
        args.push("-outputSerializer".into());
        args.push(PROTOBUF_SERIALIZER.into());
        args
    }

    /// Run the command, racing it against cancellation.
    async fn execute(
        &self,
        ctx: &CancellationToken,
        args: &[OsString],
    ) -> std::result::Result<(), ExecutionError> {
        let command = &self.config.java_cmd;
        let failed = |stderr: String, failure: CommandFailure| ExecutionError {
            command: command.clone(),
            stderr,
            failure,
        };

        if ctx.is_cancelled() {
            return Err(failed(String::new(), CommandFailure::Cancelled));
        }

        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(String::new(), CommandFailure::Spawn(e)))?;

        // Dropping the wait future drops the child, which kills it.
        let output = tokio::select! {
            output = child.wait_with_output() => {
                output.map_err(|e| failed(String::new(), CommandFailure::Wait(e)))?
            }
            _ = ctx.cancelled() => {
                tracing::debug!(command = %command, "cancelled, killing CoreNLP process");
                return Err(failed(String::new(), CommandFailure::Cancelled));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(failed(stderr, CommandFailure::Exit(output.status)));
        }

        tracing::debug!(
            command = %command,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "CoreNLP process finished"
        );
        Ok(())
    }
}

/// Path of the serialized output CoreNLP writes for `input`.
pub fn output_path(input: &Path) -> PathBuf {
    let mut path = input.as_os_str().to_owned();
    path.push(OUTPUT_SUFFIX);
    PathBuf::from(path)
}

#[async_trait]
impl Client for CommandClient {
    async fn run_text(
        &self,
        ctx: &CancellationToken,
        text: &[u8],
        doc: Option<&mut Document>,
    ) -> Result<()> {
        let doc = check_inputs(text, doc)?;

        // Removed on drop: success, error, or the future being dropped.
        let workdir = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?;
        let input = workdir.path().join(INPUT_FILE_NAME);
        tokio::fs::write(&input, text).await?;

        let args = self.build_args(&input, workdir.path());
        tracing::debug!(command = %self.config.java_cmd, ?args, "running CoreNLP");
        self.execute(ctx, &args).await?;

        let artifact = output_path(&input);
        let data = tokio::fs::read(&artifact).await?;
        tracing::debug!(path = %artifact.display(), bytes = data.len(), "read CoreNLP output");

        ProtobufCodec::decode_artifact_into(&data, doc)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, CoreNlpError, ErrorCategory};

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_builder_defaults() {
        let client = CommandClient::builder().build().unwrap();
        assert_eq!(client.config(), &CommandConfig::default());
    }

    #[test]
    fn test_builder_configuration() {
        let client = CommandClient::builder()
            .annotators(annotator::BASIC)
            .annotator("ner")
            .java_cmd("/usr/bin/java")
            .classpath("/opt/corenlp/*")
            .class("my.Pipeline")
            .arg("-Xmx2g")
            .args(["-Dfile.encoding=UTF-8"])
            .build()
            .unwrap();

        let config = client.config();
        assert_eq!(annotator::join(&config.annotators), "tokenize,ssplit,pos,lemma,ner");
        assert_eq!(config.java_cmd, "/usr/bin/java");
        assert_eq!(config.classpath, "/opt/corenlp/*");
        assert_eq!(config.class, "my.Pipeline");
        assert_eq!(config.args, vec!["-Xmx2g", "-Dfile.encoding=UTF-8"]);
    }

    #[test]
    fn test_builder_rejects_blank_annotator() {
        let err = CommandClient::builder()
            .annotators(["tokenize", "  "])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            CoreNlpError::Configuration(ConfigurationError::BlankAnnotator { index: 1, .. })
        ));
    }

    #[test]
    fn test_build_args_full() {
        let client = CommandClient::builder()
            .annotators(["tokenize", "ssplit", "pos"])
            .classpath("/cp/*")
            .arg("-Xmx1g")
            .build()
            .unwrap();

        let args = client.build_args(Path::new("/tmp/x/input.text"), Path::new("/tmp/x"));
        assert_eq!(
            strings(&args),
            vec![
                "-Xmx1g",
                "-cp",
                "/cp/*",
                "edu.stanford.nlp.pipeline.StanfordCoreNLP",
                "-annotators",
                "tokenize,ssplit,pos",
                "-file",
                "/tmp/x/input.text",
                "--outputDirectory",
                "/tmp/x",
                "-outputFormat",
                "serialized",
                "-outputSerializer",
                "edu.stanford.nlp.pipeline.ProtobufAnnotationSerializer",
            ]
        );
    }

    #[test]
    fn test_build_args_without_annotators_or_classpath() {
        let client = CommandClient::builder().classpath("").build().unwrap();

        let args = strings(&client.build_args(Path::new("in"), Path::new("out")));
        assert!(!args.contains(&"-annotators".to_string()));
        assert!(!args.contains(&"-cp".to_string()));
        assert_eq!(args[0], crate::config::DEFAULT_PIPELINE_CLASS);
        assert_eq!(args[1], "-file");
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/tmp/corenlp1/input.text")),
            PathBuf::from("/tmp/corenlp1/input.text.ser.gz")
        );
    }

    #[tokio::test]
    async fn test_empty_input_does_not_spawn() {
        // A missing executable would surface as an execution error if spawned.
        let client = CommandClient::builder()
            .java_cmd("/nonexistent/corenlp-java")
            .build()
            .unwrap();
        let ctx = CancellationToken::new();
        let mut doc = Document::default();

        let err = client.run_text(&ctx, b"", Some(&mut doc)).await.unwrap_err();
        assert!(matches!(err, CoreNlpError::EmptyInput));

        let err = client.run_text(&ctx, b"text", None).await.unwrap_err();
        assert!(matches!(err, CoreNlpError::MissingDocument));
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let client = CommandClient::builder()
            .java_cmd("/nonexistent/corenlp-java")
            .build()
            .unwrap();
        let mut doc = Document::default();

        let err = client
            .run_text(&CancellationToken::new(), b"Hello.", Some(&mut doc))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Execution);
        match err {
            CoreNlpError::Execution(e) => {
                assert_eq!(e.command, "/nonexistent/corenlp-java");
                assert!(matches!(e.failure, CommandFailure::Spawn(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_already_cancelled() {
        let client = CommandClient::builder()
            .java_cmd("/nonexistent/corenlp-java")
            .build()
            .unwrap();
        let ctx = CancellationToken::new();
        ctx.cancel();
        let mut doc = Document::default();

        let err = client.run_text(&ctx, b"Hello.", Some(&mut doc)).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
