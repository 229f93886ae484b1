use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

/// Placeholder for [`send_request`] calls without a payload.
pub const NO_BODY: Option<&'static ()> = None;

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("failed to serialize request payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Everything read back from a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub body: Vec<u8>,
    pub status: u16,
    /// Status line text, e.g. `"404 Not Found"`.
    pub status_text: String,
}

/// Join `domain`, `port` and `endpoint` into a URL.
///
/// With a port the result is `domain:port/endpoint`; without one it is
/// `domain/endpoint`. Exactly one slash separates the parts, whatever
/// run of slashes the inputs carry at the seam.
pub fn build_url(domain: &str, port: &str, endpoint: &str) -> String {
    let domain = domain.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');

    if port.is_empty() {
        format!("{}/{}", domain, endpoint)
    } else {
        format!("{}:{}/{}", domain, port, endpoint)
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Outbound request assembled piece by piece, then built or sent with a
/// `reqwest::Client`.
///
/// Headers overwrite earlier values with the same name; query parameters
/// are always appended, so repeating a key sends it twice.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    domain: String,
    port: String,
    method: Method,
    endpoint: String,
    headers: Vec<(String, String)>,
    params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(domain: impl Into<String>, method: Method, endpoint: impl Into<String>) -> Self {
        RequestBuilder {
            domain: domain.into(),
            port: String::new(),
            method,
            endpoint: endpoint.into(),
            headers: Vec::new(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Serialize `payload` as the request body right away.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, RequestError> {
        self.body = Some(serde_json::to_vec(payload)?);
        Ok(self)
    }

    pub fn url(&self) -> String {
        build_url(&self.domain, &self.port, &self.endpoint)
    }

    /// Produce the request without touching the network.
    pub fn build(&self, client: &Client) -> Result<reqwest::Request, RequestError> {
        let raw = self.url();
        let mut url = Url::parse(&raw).map_err(|e| RequestError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if !self.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RequestError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RequestError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let mut request = client.request(self.method.clone(), url).headers(headers);
        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }
        Ok(request.build()?)
    }

    /// Execute the request and read the whole body.
    pub async fn send(&self, client: &Client) -> Result<RawResponse, RequestError> {
        let request = self.build(client)?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok(RawResponse {
            body,
            status: status.as_u16(),
            status_text: status_line(status),
        })
    }
}

/// Build and send one request in a single call.
///
/// `method` is any HTTP method name; pass [`NO_BODY`] for `payload` to send
/// no body. A fresh `reqwest::Client` is used per call; reuse a client via
/// [`RequestBuilder::send`] when that matters.
pub async fn send_request<T: Serialize + ?Sized>(
    domain: &str,
    port: &str,
    method: &str,
    endpoint: &str,
    headers: &[(&str, &str)],
    params: &[(&str, &str)],
    payload: Option<&T>,
) -> Result<RawResponse, RequestError> {
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| RequestError::InvalidMethod(method.to_string()))?;

    let mut builder = RequestBuilder::new(domain, method, endpoint).port(port);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    for (key, value) in params {
        builder = builder.param(*key, *value);
    }
    if let Some(payload) = payload {
        builder = builder.json(payload)?;
    }

    builder.send(&Client::new()).await
}
