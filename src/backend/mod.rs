//! Backends - the two ways to reach CoreNLP.
//!
//! - [`CommandClient`] - runs the CoreNLP pipeline as a `java` subprocess per call
//! - [`HttpClient`] - POSTs text to a running CoreNLP server
//!
//! Both implement [`Client`](crate::Client) and produce identical documents
//! for identical input.

pub mod cmd;
pub mod http;

pub use cmd::{CommandClient, CommandClientBuilder};
pub use http::{HttpClient, HttpClientBuilder};
