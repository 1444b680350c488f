use std::time::Duration;

use gradebook_domain::{ApiConfig, Credential, GradebookError, RequestError};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::{transport_error, InfraError};

/// Payload of an outgoing request
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized as JSON; sets `Content-Type: application/json`.
    Json(Value),
    /// Sent as-is. The content type is left to the caller (a multipart
    /// boundary, for instance) and never defaults to JSON.
    Binary { bytes: Vec<u8>, content_type: Option<String> },
}

/// Unparsed response. The body is only read when asked for.
#[derive(Debug)]
pub struct RawResponse {
    inner: Response,
}

impl RawResponse {
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    pub async fn text(self) -> Result<String, RequestError> {
        self.inner.text().await.map_err(|err| transport_error(&err))
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        let body = self.text().await?;
        serde_json::from_str(&body)
            .map_err(|err| RequestError::Decode(format!("Failed to parse response: {err}")))
    }

    /// Turn a non-2xx response into [`RequestError::Rejected`] carrying the
    /// body text.
    pub async fn error_for_status(self) -> Result<Self, RequestError> {
        if self.is_success() {
            return Ok(self);
        }
        let status = self.status().as_u16();
        let body = self.inner.text().await.unwrap_or_default();
        Err(RequestError::Rejected { status, body })
    }
}

/// HTTP transport bound to the service base URL.
///
/// Never interprets status codes and never retries; only faults below HTTP
/// are errors.
#[derive(Clone)]
pub struct Transport {
    client: ReqwestClient,
    base_url: String,
}

impl Transport {
    /// Start building a transport for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> TransportBuilder {
        TransportBuilder::new(base_url)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, GradebookError> {
        let mut builder = Self::builder(&config.base_url);
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request.
    ///
    /// `Accept: application/json` is always set; `Authorization` only when
    /// a credential is supplied.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        credential: Option<&Credential>,
    ) -> Result<RawResponse, RequestError> {
        let url = self.url(path);
        let mut builder =
            self.client.request(method.clone(), &url).header(ACCEPT, "application/json");

        if let Some(credential) = credential {
            builder = builder.header(AUTHORIZATION, credential.authorization_value());
        }

        builder = match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Binary { bytes, content_type }) => {
                let builder = match content_type {
                    Some(content_type) => builder.header(CONTENT_TYPE, content_type),
                    None => builder,
                };
                builder.body(bytes)
            }
            None => builder,
        };

        debug!(%method, %url, authenticated = credential.is_some(), "sending HTTP request");

        match builder.send().await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(RawResponse { inner: response })
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(transport_error(&err))
            }
        }
    }
}

/// Builder for [`Transport`].
#[derive(Debug)]
pub struct TransportBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TransportBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: None, user_agent: None }
    }

    /// Bound every request; unset means no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<Transport, GradebookError> {
        let parsed = Url::parse(self.base_url.trim()).map_err(|err| {
            GradebookError::Config(format!("Invalid API base URL '{}': {err}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GradebookError::Config(format!(
                "Unsupported API base URL scheme: {}",
                parsed.scheme()
            )));
        }

        let mut builder = ReqwestClient::builder().no_proxy();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| GradebookError::from(InfraError::from(err)))?;

        Ok(Transport {
            client,
            base_url: self.base_url.trim().trim_end_matches('/').to_string(),
        })
    }
}
