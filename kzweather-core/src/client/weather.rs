use serde::Deserialize;

use crate::model::{Coordinates, MainMetrics, WeatherRecord};

use super::{Endpoint, FetchError};

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: Coordinates,
    main: MainMetrics,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    timezone: i64,
}

/// Current weather by city name.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    endpoint: Endpoint,
}

impl WeatherClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::InvalidInput("city name is empty".into()));
        }

        let raw = self
            .endpoint
            .get_json("/data/2.5/weather", vec![("q", city.to_string())])
            .await?;
        let parsed = OwCurrentResponse::deserialize(&raw)?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(WeatherRecord {
            country: parsed.sys.country,
            coordinates: parsed.coord,
            main: parsed.main,
            wind_speed_mps: parsed.wind.speed,
            description,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            timezone_offset: parsed.timezone,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ALMATY_WEATHER, FakeTransport, NOT_FOUND_BODY};
    use std::sync::Arc;

    fn client(transport: Arc<FakeTransport>) -> WeatherClient {
        WeatherClient::new(Endpoint::new(transport, "http://owm.test", "KEY".into()))
    }

    #[tokio::test]
    async fn not_found_status() {
        let transport = Arc::new(FakeTransport::with_replies(vec![(404, NOT_FOUND_BODY)]));
        let err = client(transport).fetch_weather("Nowhereville").await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn coordinates_match_fixture() {
        let transport = Arc::new(FakeTransport::with_replies(vec![(200, ALMATY_WEATHER)]));
        let record = client(transport).fetch_weather("Almaty").await.unwrap();

        assert_eq!(record.coordinates, Coordinates { lat: 43.222, lon: 76.8512 });
        assert_eq!(record.main.temp, 300.0);
        assert_eq!(record.main.pressure, 1012);
        assert_eq!(record.main.humidity, 28);
        assert_eq!(record.wind_speed_mps, 2.5);
        assert_eq!(record.description, "clear sky");
        assert_eq!(record.timezone_offset, 18000);
        assert_eq!(record.country.as_deref(), Some("KZ"));
        assert_eq!(record.raw["cod"], 200);
    }

    #[tokio::test]
    async fn request_shape() {
        let transport = Arc::new(FakeTransport::with_replies(vec![(200, ALMATY_WEATHER)]));
        client(transport.clone()).fetch_weather(" Almaty ").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://owm.test/data/2.5/weather");
        assert_eq!(requests[0].param("q"), Some("Almaty"));
        assert_eq!(requests[0].param("appid"), Some("KEY"));
        assert_eq!(requests[0].param("units"), None);
    }

    #[tokio::test]
    async fn empty_city_issues_no_request() {
        let transport = Arc::new(FakeTransport::default());
        let err = client(transport.clone()).fetch_weather("  ").await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidInput(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn network_failure_is_transport_error() {
        let transport = Arc::new(FakeTransport::default());
        transport.push_network_error();
        let err = client(transport).fetch_weather("Almaty").await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let transport = Arc::new(FakeTransport::with_replies(vec![(200, r#"{"coord": {}}"#)]));
        let err = client(transport).fetch_weather("Almaty").await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }
}
