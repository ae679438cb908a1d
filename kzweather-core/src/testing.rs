//! Test doubles and provider fixtures.

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;

use crate::transport::{HttpReply, Transport, TransportError};

pub const ALMATY_WEATHER: &str = r#"{
  "coord": {"lon": 76.8512, "lat": 43.222},
  "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
  "base": "stations",
  "main": {
    "temp": 300.0, "feels_like": 299.2, "temp_min": 298.15, "temp_max": 301.15,
    "pressure": 1012, "humidity": 28
  },
  "visibility": 10000,
  "wind": {"speed": 2.5, "deg": 190},
  "clouds": {"all": 0},
  "dt": 1700445200,
  "sys": {"type": 2, "id": 2036373, "country": "KZ", "sunrise": 1700445200, "sunset": 1700480000},
  "timezone": 18000,
  "id": 1526384,
  "name": "Almaty",
  "cod": 200
}"#;

pub const ALMATY_AIR: &str = r#"{
  "coord": {"lon": 76.8512, "lat": 43.222},
  "list": [
    {
      "main": {"aqi": 2},
      "components": {"co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66, "so2": 0.64, "nh3": 0.12},
      "dt": 1700445600
    },
    {
      "main": {"aqi": 3},
      "components": {"co": 210.3, "no": 0.0, "no2": 1.1, "o3": 70.1, "so2": 0.7, "nh3": 0.2},
      "dt": 1700449200
    }
  ]
}"#;

pub const NOT_FOUND_BODY: &str = r#"{"cod":"404","message":"city not found"}"#;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Replays canned replies in order and records what was asked.
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Result<HttpReply, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn with_replies(replies: Vec<(u16, &str)>) -> Self {
        let replies = replies
            .into_iter()
            .map(|(status, body)| Ok(HttpReply { status, body: body.to_string() }))
            .collect();
        Self { replies: Mutex::new(replies), requests: Mutex::default() }
    }

    pub fn push_network_error(&self) {
        self.replies.lock().unwrap().push_back(Err(TransportError {
            context: "Failed to send request".into(),
            message: "connection refused".into(),
        }));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<HttpReply, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportError {
                context: format!("No canned reply for {url}"),
                message: "fake transport exhausted".into(),
            })
        })
    }
}
