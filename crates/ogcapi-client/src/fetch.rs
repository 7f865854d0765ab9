//! Request plumbing shared by every client operation.
//!
//! All outbound requests go through a [`FetchContext`], which resolves
//! relative hrefs against the service host, applies an optional
//! [`RequestRewrite`] hook and hands the request to an injected
//! [`HttpTransport`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use ogc_common::url::{host_url, resolve_against_host};
use ogc_common::{OgcError, OgcResult};

/// A GET request as seen by the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response as returned by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text; invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> OgcResult<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Executes GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the request. Any HTTP status is a successful transport result;
    /// only failures to obtain a response are errors.
    async fn get(&self, request: HttpRequest) -> OgcResult<HttpResponse>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    default_headers: Vec<(String, String)>,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            default_headers: Vec::new(),
        }
    }

    /// Headers sent with every request unless the request sets them itself.
    pub fn with_default_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.default_headers = headers;
        self
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> OgcResult<HttpResponse> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &self.default_headers {
            if request.header(name).is_none() {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                OgcError::InvalidUrl(format!("{}: {}", request.url, e))
            } else {
                OgcError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| OgcError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Hook applied to every request immediately before it is sent.
///
/// Typical uses are routing through a proxy or attaching credentials.
pub trait RequestRewrite: Send + Sync {
    fn rewrite(&self, request: HttpRequest) -> HttpRequest;
}

impl<F> RequestRewrite for F
where
    F: Fn(HttpRequest) -> HttpRequest + Send + Sync,
{
    fn rewrite(&self, request: HttpRequest) -> HttpRequest {
        self(request)
    }
}

type CompleteFn = dyn Fn(&str, &str) -> String + Send + Sync;

/// Per-service request context.
///
/// Captures the host of the URL the service was discovered from. Cloning is
/// cheap; clones share the transport and hooks.
#[derive(Clone)]
pub struct FetchContext {
    host: String,
    complete: Arc<CompleteFn>,
    rewrite: Option<Arc<dyn RequestRewrite>>,
    headers: Vec<(String, String)>,
    transport: Arc<dyn HttpTransport>,
}

impl FetchContext {
    pub fn new(original_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            host: host_url(original_url),
            complete: Arc::new(resolve_against_host),
            rewrite: None,
            headers: Vec::new(),
            transport,
        }
    }

    pub fn with_rewrite(mut self, rewrite: Option<Arc<dyn RequestRewrite>>) -> Self {
        self.rewrite = rewrite;
        self
    }

    /// Replace the href resolver; it receives `(href, host)`.
    pub fn with_complete<F>(mut self, complete: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.complete = Arc::new(complete);
        self
    }

    /// Headers attached to every request issued through this context.
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    /// Resolve an href against the service host.
    pub fn complete(&self, url: &str) -> String {
        (self.complete)(url, &self.host)
    }

    /// Send a request through the rewrite hook and the transport.
    pub async fn send(&self, request: HttpRequest) -> OgcResult<HttpResponse> {
        let mut request = request;
        for (name, value) in &self.headers {
            if request.header(name).is_none() {
                request.headers.push((name.clone(), value.clone()));
            }
        }
        let request = match &self.rewrite {
            Some(rewrite) => rewrite.rewrite(request),
            None => request,
        };

        debug!(url = %request.url, "GET");
        self.transport.get(request).await
    }

    /// GET `url`; any status is returned to the caller.
    pub async fn get(&self, url: &str) -> OgcResult<HttpResponse> {
        self.send(HttpRequest::new(url)).await
    }

    /// GET `url` and parse the body as JSON. Non-200 responses are errors.
    pub async fn get_json(&self, url: &str) -> OgcResult<Value> {
        let response = self.get(url).await?;
        if !response.is_ok() {
            return Err(OgcError::HttpStatus(response.status));
        }
        response.json()
    }
}

impl fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchContext")
            .field("host", &self.host)
            .field("rewrite", &self.rewrite.is_some())
            .field("headers", &self.headers)
            .finish()
    }
}
