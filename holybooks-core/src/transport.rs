//! Transport abstraction
//!
//! The clients never talk HTTP themselves; they hand a URL to a transport and get
//! the raw status, content type and body back. The `holybooks` crate provides the
//! reqwest implementations, `MemoryTransport` serves canned responses for tests.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// A raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The URL that was requested
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// A 200 response carrying a JSON document
    pub fn json(url: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::new(url, 200, value.to_string()).with_content_type("application/json")
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Blocking transport
pub trait Transport: Send + Sync {
    /// Issue a GET request
    fn get(&self, url: &str) -> Result<Response>;
}

/// Suspending transport
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Issue a GET request
    async fn get(&self, url: &str) -> Result<Response>;
}

/// Transport kept by an entity that needs follow-up requests (ayah audio)
#[derive(Clone)]
pub enum TransportHandle {
    Blocking(Arc<dyn Transport>),
    Suspending(Arc<dyn AsyncTransport>),
}

impl fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportHandle::Blocking(_) => f.write_str("TransportHandle::Blocking"),
            TransportHandle::Suspending(_) => f.write_str("TransportHandle::Suspending"),
        }
    }
}

/// In-memory transport (for testing)
///
/// Responses are registered per URL; unknown URLs answer 404. Every call is
/// counted, so tests can assert that validation failures never reach the network.
#[derive(Default)]
pub struct MemoryTransport {
    responses: RwLock<HashMap<String, Response>>,
    requests: RwLock<Vec<String>>,
    calls: AtomicUsize,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a JSON body for `url`
    pub fn with_json(self, url: impl Into<String>, value: serde_json::Value) -> Self {
        let url = url.into();
        let response = Response::json(url.clone(), &value);
        self.with_response(url, response)
    }

    /// Register a full response for `url`
    pub fn with_response(self, url: impl Into<String>, response: Response) -> Self {
        self.insert(url, response);
        self
    }

    pub fn insert(&self, url: impl Into<String>, response: Response) {
        self.responses
            .write()
            .expect("memory transport lock poisoned")
            .insert(url.into(), response);
    }

    /// Number of requests served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requests
            .read()
            .expect("memory transport lock poisoned")
            .clone()
    }

    fn serve(&self, url: &str) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .write()
            .expect("memory transport lock poisoned")
            .push(url.to_string());

        let responses = self.responses.read().expect("memory transport lock poisoned");
        Ok(responses.get(url).cloned().unwrap_or_else(|| {
            Response::new(url, 404, r#"{"code":404,"status":"NOT FOUND","data":"Not found"}"#)
                .with_content_type("application/json")
        }))
    }
}

impl Transport for MemoryTransport {
    fn get(&self, url: &str) -> Result<Response> {
        self.serve(url)
    }
}

#[async_trait]
impl AsyncTransport for MemoryTransport {
    async fn get(&self, url: &str) -> Result<Response> {
        self.serve(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_transport() {
        let transport = MemoryTransport::new().with_json("http://x/a", json!({ "ok": true }));

        let hit = Transport::get(&transport, "http://x/a").unwrap();
        assert_eq!(hit.status, 200);
        assert_eq!(hit.content_type.as_deref(), Some("application/json"));

        let miss = Transport::get(&transport, "http://x/b").unwrap();
        assert_eq!(miss.status, 404);

        assert_eq!(transport.calls(), 2);
        assert_eq!(transport.requested(), vec!["http://x/a", "http://x/b"]);
    }

    #[test]
    fn test_insert_after_construction() {
        let transport = MemoryTransport::new();
        transport.insert("http://x/late", Response::new("http://x/late", 204, ""));
        assert_eq!(Transport::get(&transport, "http://x/late").unwrap().status, 204);
    }

    #[test]
    fn test_poisoned_lock_is_not_silent() {
        let transport = std::sync::Arc::new(MemoryTransport::new());
        let poisoner = std::sync::Arc::clone(&transport);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.responses.write().unwrap();
            panic!("poison the response table");
        })
        .join();

        let inserted = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            transport.insert("http://x/a", Response::new("http://x/a", 200, "{}"));
        }));
        assert!(inserted.is_err());
    }

    #[tokio::test]
    async fn test_memory_transport_async() {
        let transport = MemoryTransport::new().with_json("http://x/a", json!([1, 2]));
        let response = AsyncTransport::get(&transport, "http://x/a").await.unwrap();
        assert_eq!(response.body, b"[1,2]".to_vec());
        assert_eq!(transport.calls(), 1);
    }
}
