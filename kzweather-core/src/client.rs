//! OpenWeatherMap clients.
//!
//! Both clients share one failure shape: anything other than a decoded 2xx
//! body is a [`FetchError`]. The dashboard shows every variant as "not found";
//! the variants keep the cause for logging.

use std::sync::Arc;

use crate::transport::{Transport, truncate_body};

pub mod air_quality;
pub mod weather;

pub use air_quality::AirQualityClient;
pub use weather::WeatherClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    ClientError,
    ServerError,
    UnexpectedStatus,
    Network,
    MalformedBody,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("provider answered with status {status}")]
    Status { status: u16 },

    #[error(transparent)]
    Transport(#[from] crate::transport::TransportError),

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::InvalidInput(_) => FailureKind::InvalidInput,
            FetchError::Status { status } if (400..500).contains(status) => FailureKind::ClientError,
            FetchError::Status { status } if (500..600).contains(status) => FailureKind::ServerError,
            FetchError::Status { .. } => FailureKind::UnexpectedStatus,
            FetchError::Transport(_) => FailureKind::Network,
            FetchError::Decode(_) => FailureKind::MalformedBody,
        }
    }
}

/// Connection details shared by both clients.
#[derive(Debug, Clone)]
pub struct Endpoint {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_key: String,
}

impl Endpoint {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>, api_key: String) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { transport, base_url, api_key }
    }

    /// GET `path` with the API key appended and return the decoded JSON body.
    async fn get_json(
        &self,
        path: &str,
        mut query: Vec<(&str, String)>,
    ) -> Result<serde_json::Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        query.push(("appid", self.api_key.clone()));

        tracing::debug!(url = %url, "requesting");
        let reply = self.transport.get(&url, &query).await?;

        if !reply.is_success() {
            tracing::debug!(
                status = reply.status,
                body = %truncate_body(&reply.body),
                "provider returned an error"
            );
            return Err(FetchError::Status { status: reply.status });
        }

        Ok(serde_json::from_str(&reply.body)?)
    }
}
