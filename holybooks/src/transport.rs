//! HTTP transports backed by reqwest
//!
//! The underlying reqwest client is built on the first request, so constructing
//! a transport (and a client around it) never touches the network stack.

use async_trait::async_trait;
use holybooks_core::{AsyncTransport, HolyBooksError, Response, Result, Transport};
use reqwest::header::CONTENT_TYPE;
use std::sync::OnceLock;
use std::time::Duration;

const USER_AGENT: &str = concat!("holybooks/", env!("CARGO_PKG_VERSION"));

/// Readable message for a failed request
fn describe(url: &str, error: &reqwest::Error) -> HolyBooksError {
    let message = if error.is_timeout() {
        format!("request to {} timed out", url)
    } else if error.is_connect() || error.is_request() {
        format!("could not connect to {}", url)
    } else if error.is_decode() {
        format!("unreadable response body from {}", url)
    } else {
        format!("request to {} failed: {}", url, error)
    };
    tracing::warn!("{}", message);
    HolyBooksError::Transport(message)
}

fn content_type(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Blocking transport
///
/// Must not be used from inside an async runtime; use [`AsyncReqwestTransport`]
/// there.
#[derive(Debug)]
pub struct ReqwestTransport {
    timeout: Option<Duration>,
    session: OnceLock<reqwest::blocking::Client>,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            timeout: None,
            session: OnceLock::new(),
        }
    }

    /// Bound every request; unbounded by default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether the underlying client has been built yet
    pub fn is_open(&self) -> bool {
        self.session.get().is_some()
    }

    fn session(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let session = builder
            .build()
            .map_err(|e| HolyBooksError::Transport(e.to_string()))?;
        tracing::debug!("Opened blocking HTTP session");
        Ok(self.session.get_or_init(|| session))
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .session()?
            .get(url)
            .send()
            .map_err(|e| describe(url, &e))?;

        let status = response.status().as_u16();
        let content_type = content_type(response.headers());
        let body = response.bytes().map_err(|e| describe(url, &e))?;

        Ok(Response {
            url: url.to_string(),
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

/// Suspending transport
#[derive(Debug)]
pub struct AsyncReqwestTransport {
    timeout: Option<Duration>,
    session: OnceLock<reqwest::Client>,
}

impl Default for AsyncReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncReqwestTransport {
    pub fn new() -> Self {
        Self {
            timeout: None,
            session: OnceLock::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn is_open(&self) -> bool {
        self.session.get().is_some()
    }

    fn session(&self) -> Result<&reqwest::Client> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let session = builder
            .build()
            .map_err(|e| HolyBooksError::Transport(e.to_string()))?;
        tracing::debug!("Opened async HTTP session");
        Ok(self.session.get_or_init(|| session))
    }
}

#[async_trait]
impl AsyncTransport for AsyncReqwestTransport {
    async fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .session()?
            .get(url)
            .send()
            .await
            .map_err(|e| describe(url, &e))?;

        let status = response.status().as_u16();
        let content_type = content_type(response.headers());
        let body = response.bytes().await.map_err(|e| describe(url, &e))?;

        Ok(Response {
            url: url.to_string(),
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}
