use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Main block of the current-weather payload. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

/// Current weather for one city as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub country: Option<String>,
    pub coordinates: Coordinates,
    pub main: MainMetrics,
    pub wind_speed_mps: f64,
    pub description: String,
    pub sunrise: i64,
    pub sunset: i64,
    /// Seconds east of UTC.
    pub timezone_offset: i64,
    pub raw: serde_json::Value,
}

impl WeatherRecord {
    pub fn local_sunrise(&self) -> Option<NaiveDateTime> {
        local_time(self.sunrise, self.timezone_offset)
    }

    pub fn local_sunset(&self) -> Option<NaiveDateTime> {
        local_time(self.sunset, self.timezone_offset)
    }
}

/// Shift an epoch by the location's offset and read it back as UTC calendar time.
pub fn local_time(epoch: i64, offset_secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(epoch.checked_add(offset_secs)?, 0).map(|dt| dt.naive_utc())
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityEntry {
    pub dt: Option<i64>,
    pub aqi: u8,
    pub components: Components,
}

impl AirQualityEntry {
    pub fn aqi_label(&self) -> &'static str {
        aqi_label(self.aqi)
    }
}

/// Human label for the provider's 1..=5 index.
pub fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

/// Air pollution forecast for one coordinate, ordered by time.
#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityRecord {
    pub forecast: Vec<AirQualityEntry>,
    pub raw: serde_json::Value,
}

impl AirQualityRecord {
    /// The first forecast entry describes current conditions.
    pub fn current(&self) -> Option<&AirQualityEntry> {
        self.forecast.first()
    }
}
