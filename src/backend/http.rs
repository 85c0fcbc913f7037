//! Talking to a running CoreNLP server over HTTP.
//!
//! Request format:
//! ```text
//! POST <base>/?properties=<urlencoded JSON>
//! Content-Type: text/plain
//!
//! <raw text>
//! ```
//!
//! with JSON `{"annotators":"a,b","outputFormat":"serialized","serializer":"..."}`.
//! The `annotators` key is left out when no annotators are configured, so the
//! server applies its own defaults.
//!
//! # Example
//!
//! ```ignore
//! use corenlp_client::{annotator, Client, HttpClient};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = HttpClient::builder()
//!     .annotators(annotator::NER)
//!     .url("http://localhost:9000")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let doc = client.annotate(&CancellationToken::new(), b"Hello world.").await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::annotator::{self, Annotator};
use crate::client::{check_inputs, Client};
use crate::codec::ProtobufCodec;
use crate::config::{check_annotators, normalize_base_url, HttpConfig, PROTOBUF_SERIALIZER};
use crate::error::{ConfigurationError, Result, TransportError};
use crate::nlp::Document;

/// Query parameter carrying the pipeline properties.
pub const PROPERTIES_PARAM: &str = "properties";

/// Pipeline properties sent with each request. Field order is the JSON key order.
#[derive(Debug, Serialize)]
struct Properties<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    annotators: Option<String>,
    #[serde(rename = "outputFormat")]
    output_format: &'a str,
    serializer: &'a str,
}

/// Builder for [`HttpClient`].
#[derive(Debug, Clone, Default)]
pub struct HttpClientBuilder {
    config: HttpConfig,
    http: Option<reqwest::Client>,
}

impl HttpClientBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: HttpConfig) -> Self {
        Self { config, http: None }
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

    /// Set the server base URL.
    ///
    /// Default: `http://127.0.0.1:9000`
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Set the whole-request timeout. Ignored when a custom client is supplied.
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection establishment timeout. Ignored when a custom client
    /// is supplied.
    ///
    /// Default: none (only the whole-request timeout applies)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS, pooling).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::BlankAnnotator` if an annotator name is blank
    /// - `ConfigurationError::InvalidUrl` if the URL cannot be parsed
    /// - `ConfigurationError::UrlHasQueryOrFragment` if the URL has a query
    ///   or fragment
    /// - `ConfigurationError::HttpClient` if the HTTP client cannot be built
    pub fn build(self) -> Result<HttpClient> {
        let HttpClientBuilder { mut config, http } = self;
        check_annotators(&config.annotators)?;

        config.url = normalize_base_url(&config.url);
        let parsed =
            url::Url::parse(&config.url).map_err(|source| ConfigurationError::InvalidUrl {
                url: config.url.clone(),
                source,
            })?;
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigurationError::UrlHasQueryOrFragment { url: config.url }.into());
        }

        let http = match http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder().timeout(config.timeout);
                if let Some(connect_timeout) = config.connect_timeout {
                    builder = builder.connect_timeout(connect_timeout);
                }
                builder.build().map_err(ConfigurationError::HttpClient)?
            }
        };

        let properties = encode_properties(&config.annotators)?;
        Ok(HttpClient {
            config,
            http,
            properties,
        })
    }
}

/// Sends text to a CoreNLP server, one request per call.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: HttpConfig,
    http: reqwest::Client,
    /// Percent-encoded properties JSON, fixed for the client's lifetime.
    properties: String,
}

impl HttpClient {
    /// Create a new client builder.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a client from a configuration.
    pub fn new(config: HttpConfig) -> Result<Self> {
        HttpClientBuilder::from_config(config).build()
    }

    /// The client configuration. The URL always ends with exactly one `/`.
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// The normalized base URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Full request URL, including the properties query parameter.
    pub fn request_url(&self) -> String {
        format!("{}?{}={}", self.config.url, PROPERTIES_PARAM, self.properties)
    }

    async fn post(
        &self,
        ctx: &CancellationToken,
        text: &[u8],
    ) -> std::result::Result<Bytes, TransportError> {
        let base = &self.config.url;
        let request_url = self.request_url();
        tracing::debug!(url = %request_url, bytes = text.len(), "posting text to CoreNLP server");

        let request = self
            .http
            .post(&request_url)
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_vec());

        let response = tokio::select! {
            response = request.send() => {
                response.map_err(|e| TransportError::request(base.as_str(), e))?
            }
            _ = ctx.cancelled() => return Err(TransportError::cancelled(base.as_str())),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::status(base.as_str(), status));
        }

        let body = tokio::select! {
            body = response.bytes() => {
                body.map_err(|e| TransportError::request(base.as_str(), e))?
            }
            _ = ctx.cancelled() => return Err(TransportError::cancelled(base.as_str())),
        };

        tracing::debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "CoreNLP server responded"
        );
        Ok(body)
    }
}

/// Percent-encode the properties JSON for the given annotators.
fn encode_properties(
    annotators: &[Annotator],
) -> std::result::Result<String, ConfigurationError> {
    let properties = Properties {
        annotators: (!annotators.is_empty()).then(|| annotator::join(annotators)),
        output_format: "serialized",
        serializer: PROTOBUF_SERIALIZER,
    };
    let json = serde_json::to_string(&properties).map_err(ConfigurationError::Properties)?;
    Ok(url::form_urlencoded::byte_serialize(json.as_bytes()).collect())
}

#[async_trait]
impl Client for HttpClient {
    async fn run_text(
        &self,
        ctx: &CancellationToken,
        text: &[u8],
        doc: Option<&mut Document>,
    ) -> Result<()> {
        let doc = check_inputs(text, doc)?;
        let body = self.post(ctx, text).await?;
        ProtobufCodec::decode_into(&body, doc)?;
        Ok(())
    }
}
