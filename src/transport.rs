//! HTTP transport for the Artifactory REST API.
//!
//! All resource clients share one `ArtifactoryTransport`. It owns the reqwest
//! client, the base URL and the credentials, and turns every non-2xx response
//! into a `TransportError::Status` carrying the HTTP status code.
//!
//! Flow Overview:
//! - Build an `ArtifactoryTransport` from the base URL (e.g. `http://host:8082/artifactory`).
//! - Call `get`/`put_json`/`post`/`post_json`/`delete` with path segments such as
//!   `["api", "security", "users", name]`.
//! - Successful calls return the status and raw body; decode with `ArtifactoryResponse::json`.
//!
//! Path segments are percent-encoded one by one, so a user name can never
//! escape the segment it was placed in.

use crate::error::TransportError;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info_span, Instrument};
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// How requests authenticate against Artifactory.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    Basic {
        username: String,
        password: SecretString,
    },
    ApiKey(SecretString),
    AccessToken(SecretString),
    #[default]
    Anonymous,
}

impl Credentials {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            Self::ApiKey(key) => request.header(API_KEY_HEADER, key.expose_secret()),
            Self::AccessToken(token) => request.bearer_auth(token.expose_secret()),
            Self::Anonymous => request,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Accept invalid TLS certificates when false.
    pub verify_tls: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            timeout: REQUEST_TIMEOUT,
            verify_tls: true,
        }
    }
}

#[derive(Clone)]
pub struct ArtifactoryTransport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ArtifactoryTransport {
    /// Build a transport with default timeouts.
    /// # Errors
    /// Returns an error if `base_url` is not an http(s) URL or the HTTP client cannot be constructed.
    pub fn new(
        user_agent: &str,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self, TransportError> {
        Self::with_options(
            user_agent,
            base_url,
            credentials,
            &TransportOptions::default(),
        )
    }

    /// Build a transport with explicit timeouts and TLS verification.
    /// # Errors
    /// Returns an error if `base_url` is not an http(s) URL or the HTTP client cannot be constructed.
    pub fn with_options(
        user_agent: &str,
        base_url: &str,
        credentials: Credentials,
        options: &TransportOptions,
    ) -> Result<Self, TransportError> {
        let base_url = parse_base_url(base_url)?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            inner: Arc::new(TransportInner {
                client,
                base_url,
                credentials,
            }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build the absolute URL for the given path segments.
    /// # Errors
    /// Returns an error if the base URL cannot carry a path or a segment is `.` or `..`.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, TransportError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(TransportError::InvalidUrl(format!(
                "dot segment {segment:?} in path"
            )));
        }

        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// # Errors
    /// Returns an error if the request fails or Artifactory returns a non-success status.
    pub async fn get(&self, segments: &[&str]) -> Result<ArtifactoryResponse, TransportError> {
        self.send(Method::GET, segments, None::<&()>).await
    }

    /// # Errors
    /// Returns an error if the request fails or Artifactory returns a non-success status.
    pub async fn delete(&self, segments: &[&str]) -> Result<ArtifactoryResponse, TransportError> {
        self.send(Method::DELETE, segments, None::<&()>).await
    }

    /// POST without a body.
    /// # Errors
    /// Returns an error if the request fails or Artifactory returns a non-success status.
    pub async fn post(&self, segments: &[&str]) -> Result<ArtifactoryResponse, TransportError> {
        self.send(Method::POST, segments, None::<&()>).await
    }

    /// # Errors
    /// Returns an error if the request fails or Artifactory returns a non-success status.
    pub async fn post_json<B>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ArtifactoryResponse, TransportError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, segments, Some(body)).await
    }

    /// # Errors
    /// Returns an error if the request fails or Artifactory returns a non-success status.
    pub async fn put_json<B>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ArtifactoryResponse, TransportError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, segments, Some(body)).await
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<ArtifactoryResponse, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(segments)?;
        debug!("artifactory request: {} {}", method, url);

        let span = info_span!(
            "artifactory.request",
            http.method = %method,
            url = %url
        );

        let mut request = self
            .inner
            .client
            .request(method, url.clone())
            .header("Accept", "application/json");
        request = self.inner.credentials.apply(request);
        if let Some(body) = body {
            request = request.json(body);
        }

        let url = url.to_string();
        let response = request
            .send()
            .instrument(span)
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                message: artifactory_error_message(&body),
                url,
                status,
            });
        }

        Ok(ArtifactoryResponse { url, status, body })
    }
}

impl std::fmt::Debug for ArtifactoryTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactoryTransport")
            .field("base_url", &self.inner.base_url.as_str())
            .field("credentials", &self.inner.credentials)
            .finish_non_exhaustive()
    }
}

/// Successful response from Artifactory.
#[derive(Debug, Clone)]
pub struct ArtifactoryResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl ArtifactoryResponse {
    /// Decode the body as JSON.
    /// # Errors
    /// Returns an error if the body is empty or does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(TransportError::InvalidUrl(format!(
                "unsupported scheme {scheme}"
            )))
        }
    }

    if url.host().is_none() {
        return Err(TransportError::InvalidUrl(
            "no host specified".to_string(),
        ));
    }

    Ok(url)
}

/// Pull the first message out of Artifactory's `{"errors":[{"message":...}]}`
/// envelope, falling back to the raw body.
fn artifactory_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message").or(Some(v)))
        .and_then(Value::as_str)
        .map_or_else(|| body.trim().to_string(), str::to_string)
}
