use serde::Deserialize;

use crate::model::{AirQualityEntry, AirQualityRecord, Components, Coordinates};

use super::{Endpoint, FetchError};

#[derive(Debug, Deserialize)]
struct OwAqiMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwPollutionEntry {
    dt: Option<i64>,
    main: OwAqiMain,
    components: Components,
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    list: Vec<OwPollutionEntry>,
}

/// Air pollution forecast by coordinate.
#[derive(Debug, Clone)]
pub struct AirQualityClient {
    endpoint: Endpoint,
}

impl AirQualityClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub async fn fetch_air_quality(
        &self,
        coordinates: Coordinates,
    ) -> Result<AirQualityRecord, FetchError> {
        let raw = self
            .endpoint
            .get_json(
                "/data/2.5/air_pollution/forecast",
                vec![
                    ("lat", coordinates.lat.to_string()),
                    ("lon", coordinates.lon.to_string()),
                ],
            )
            .await?;
        let parsed = OwPollutionResponse::deserialize(&raw)?;

        let forecast = parsed
            .list
            .into_iter()
            .map(|e| AirQualityEntry { dt: e.dt, aqi: e.main.aqi, components: e.components })
            .collect();

        Ok(AirQualityRecord { forecast, raw })
    }
}
