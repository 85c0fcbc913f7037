//! The client contract shared by both backends.
//!
//! [`Client`] is object safe; hold a `Box<dyn Client>` or `Arc<dyn Client>`
//! to switch between [`CommandClient`](crate::CommandClient) and
//! [`HttpClient`](crate::HttpClient) at runtime, or to substitute a test
//! double.
//!
//! # Example
//!
//! ```ignore
//! use corenlp_client::{annotator, Client, CommandClient, HttpClient};
//! use corenlp_client::nlp::Document;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client: Box<dyn Client> = if use_server {
//!         Box::new(HttpClient::builder().annotators(annotator::BASIC).build()?)
//!     } else {
//!         Box::new(CommandClient::builder().classpath("/opt/corenlp/*").build()?)
//!     };
//!
//!     let ctx = CancellationToken::new();
//!     let mut doc = Document::default();
//!     client.run_text(&ctx, b"Hello world.", Some(&mut doc)).await?;
//!     Ok(())
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{CoreNlpError, Result};
use crate::nlp::Document;

/// A CoreNLP client.
///
/// Each call is independent: no retries, no state carried between calls.
/// Cancelling `ctx` aborts the in-flight request or process and the call
/// returns an error for which [`CoreNlpError::is_cancelled`] is true.
#[async_trait]
pub trait Client: Send + Sync {
    /// Annotate `text` and decode the result into `doc`, replacing its
    /// contents.
    ///
    /// # Errors
    ///
    /// - [`CoreNlpError::EmptyInput`] if `text` is empty
    /// - [`CoreNlpError::MissingDocument`] if `doc` is `None`
    ///
    /// Both are returned before any process is started or request sent.
    async fn run_text(
        &self,
        ctx: &CancellationToken,
        text: &[u8],
        doc: Option<&mut Document>,
    ) -> Result<()>;

    /// Read the whole file at `path` and annotate its contents.
    async fn run(
        &self,
        ctx: &CancellationToken,
        path: &Path,
        doc: Option<&mut Document>,
    ) -> Result<()> {
        let text = tokio::fs::read(path).await?;
        self.run_text(ctx, &text, doc).await
    }

    /// Annotate `text` into a fresh document.
    async fn annotate(&self, ctx: &CancellationToken, text: &[u8]) -> Result<Document> {
        let mut doc = Document::default();
        self.run_text(ctx, text, Some(&mut doc)).await?;
        Ok(doc)
    }
}

/// Fast-fail checks shared by both backends. Runs before any I/O.
pub(crate) fn check_inputs<'a>(
    text: &[u8],
    doc: Option<&'a mut Document>,
) -> Result<&'a mut Document> {
    if text.is_empty() {
        return Err(CoreNlpError::EmptyInput);
    }
    doc.ok_or(CoreNlpError::MissingDocument)
}
