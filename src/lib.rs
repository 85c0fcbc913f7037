//! # corenlp-client
//!
//! Rust client for the Stanford CoreNLP annotation pipeline.
//!
//! Text goes in, a typed [`nlp::Document`] comes out. Two backends are
//! available behind the same [`Client`] trait:
//!
//! - **Command** ([`CommandClient`]): runs CoreNLP as a `java` subprocess,
//!   one process per call, exchanging files in a temporary directory
//! - **HTTP** ([`HttpClient`]): POSTs text to a running CoreNLP server
//!
//! Both receive the same response format, a varint length prefix followed
//! by one serialized protobuf `Document` (see [`protocol`] and [`codec`]).
//!
//! ## Example
//!
//! ```ignore
//! use corenlp_client::{annotator, Client, HttpClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> corenlp_client::Result<()> {
//!     let client = HttpClient::builder()
//!         .annotators(annotator::BASIC)
//!         .url("http://localhost:9000")
//!         .build()?;
//!
//!     let doc = client
//!         .annotate(&CancellationToken::new(), b"Hello world.")
//!         .await?;
//!
//!     for token in doc.sentence.iter().flat_map(|s| &s.token) {
//!         println!("{} {}", token.word(), token.pos());
//!     }
//!     Ok(())
//! }
//! ```

pub mod annotator;
pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod nlp;
pub mod protocol;

mod client;

pub use annotator::Annotator;
pub use backend::{CommandClient, CommandClientBuilder, HttpClient, HttpClientBuilder};
pub use client::Client;
pub use error::{CoreNlpError, ErrorCategory, Result};
