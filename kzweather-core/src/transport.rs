use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a reply (DNS, connect, TLS, body read).
#[derive(Debug, thiserror::Error)]
#[error("{context}: {message}")]
pub struct TransportError {
    pub context: String,
    pub message: String,
}

/// Minimal HTTP seam used by the provider clients.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<HttpReply, TransportError>;
}

/// Production transport backed by `reqwest`. Uses the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<HttpReply, TransportError> {
        let res = self.http.get(url).query(query).send().await.map_err(|e| TransportError {
            context: format!("Failed to send request to {url}"),
            message: e.to_string(),
        })?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| TransportError {
            context: format!("Failed to read response body from {url}"),
            message: e.to_string(),
        })?;

        Ok(HttpReply { status, body })
    }
}

/// Shorten a provider body for log lines.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
