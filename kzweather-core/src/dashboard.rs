use std::sync::Arc;

use anyhow::Context;

use crate::{
    Config,
    client::{AirQualityClient, Endpoint, FetchError, WeatherClient},
    population::{PopulationEntry, PopulationTable},
    report::{NotFoundView, Report},
    transport::ReqwestTransport,
};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Unknown city '{0}'.\nHint: run `kzweather cities` to list the supported cities.")]
    UnknownCity(String),
}

/// Terminal state of one request cycle.
#[derive(Debug, Clone)]
pub enum Outcome {
    Rendered(Box<Report>),
    WeatherNotFound(NotFoundView),
}

/// Runs the weather → air quality → merge cycle for one city at a time.
#[derive(Debug, Clone)]
pub struct Dashboard {
    cities: PopulationTable,
    weather: WeatherClient,
    air_quality: AirQualityClient,
}

impl Dashboard {
    pub fn new(
        cities: PopulationTable,
        weather: WeatherClient,
        air_quality: AirQualityClient,
    ) -> Self {
        Self { cities, weather, air_quality }
    }

    pub fn cities(&self) -> &PopulationTable {
        &self.cities
    }

    pub fn city(&self, name: &str) -> Result<&PopulationEntry, DashboardError> {
        self.cities.get(name).ok_or_else(|| DashboardError::UnknownCity(name.to_string()))
    }

    pub async fn run(&self, city: &str) -> Result<Outcome, DashboardError> {
        let city = self.city(city)?.clone();

        tracing::debug!(city = %city.name, "weather requested");
        let weather = match self.weather.fetch_weather(&city.name).await {
            Ok(w) => w,
            Err(e) => {
                log_collapsed("weather", &city.name, &e);
                return Ok(Outcome::WeatherNotFound(NotFoundView { city }));
            }
        };

        let coordinates = weather.coordinates;
        tracing::debug!(
            city = %city.name,
            lat = coordinates.lat,
            lon = coordinates.lon,
            "air quality requested"
        );
        let air_quality = match self.air_quality.fetch_air_quality(coordinates).await {
            Ok(a) => Some(a),
            Err(e) => {
                log_collapsed("air quality", &city.name, &e);
                None
            }
        };

        Ok(Outcome::Rendered(Box::new(Report::new(city, weather, air_quality))))
    }
}

/// Construct the production dashboard: builtin city table, reqwest transport.
pub fn dashboard_from_config(
    config: &Config,
    env_api_key: Option<String>,
) -> anyhow::Result<Dashboard> {
    let api_key = config.api_key(env_api_key)?;
    let cities = PopulationTable::builtin().context("Builtin city table is invalid")?;

    let endpoint = Endpoint::new(Arc::new(ReqwestTransport::new()), config.base_url(), api_key);
    Ok(Dashboard::new(
        cities,
        WeatherClient::new(endpoint.clone()),
        AirQualityClient::new(endpoint),
    ))
}

fn log_collapsed(source: &str, city: &str, e: &FetchError) {
    tracing::warn!(city, kind = ?e.kind(), "{source} not found: {e}");
}
