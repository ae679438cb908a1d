//! Display-only views assembled from a request cycle.

use std::fmt;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::{
    model::{AirQualityEntry, AirQualityRecord, Coordinates, WeatherRecord, local_time},
    population::PopulationEntry,
    units::{format_celsius, kelvin_to_celsius},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelsiusReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// A map marker for the selected city.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub coordinates: Coordinates,
    pub name: String,
    pub population: String,
}

impl MapPin {
    pub fn osm_url(&self) -> String {
        let Coordinates { lat, lon } = self.coordinates;
        format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=11/{lat}/{lon}")
    }
}

impl fmt::Display for MapPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "📍 {} ({:.4}, {:.4}), population {}\n   {}",
            self.name,
            self.coordinates.lat,
            self.coordinates.lon,
            self.population,
            self.osm_url()
        )
    }
}

/// Merged view of one successful weather fetch.
#[derive(Debug, Clone)]
pub struct Report {
    pub city: PopulationEntry,
    pub weather: WeatherRecord,
    pub celsius: CelsiusReadings,
    pub air_quality: Option<AirQualityRecord>,
}

impl Report {
    pub fn new(
        city: PopulationEntry,
        weather: WeatherRecord,
        air_quality: Option<AirQualityRecord>,
    ) -> Self {
        let celsius = CelsiusReadings {
            temp: kelvin_to_celsius(weather.main.temp),
            feels_like: kelvin_to_celsius(weather.main.feels_like),
            temp_min: kelvin_to_celsius(weather.main.temp_min),
            temp_max: kelvin_to_celsius(weather.main.temp_max),
        };
        Self { city, weather, celsius, air_quality }
    }

    pub fn sunrise(&self) -> Option<NaiveDateTime> {
        self.weather.local_sunrise()
    }

    pub fn sunset(&self) -> Option<NaiveDateTime> {
        self.weather.local_sunset()
    }

    /// Current air quality, if the forecast was fetched and is non-empty.
    pub fn current_air(&self) -> Option<&AirQualityEntry> {
        self.air_quality.as_ref().and_then(AirQualityRecord::current)
    }

    pub fn map_pin(&self) -> MapPin {
        MapPin {
            coordinates: self.weather.coordinates,
            name: self.city.name.clone(),
            population: self.city.population.clone(),
        }
    }

    /// Provider weather JSON with Celsius temperatures and the population attached.
    pub fn weather_json(&self) -> Value {
        let mut raw = self.weather.raw.clone();
        if let Some(main) = raw.get_mut("main").and_then(Value::as_object_mut) {
            let readings = [
                ("temp", self.celsius.temp),
                ("feels_like", self.celsius.feels_like),
                ("temp_min", self.celsius.temp_min),
                ("temp_max", self.celsius.temp_max),
            ];
            for (key, value) in readings {
                main.insert(key.to_string(), Value::from(value));
            }
        }
        if let Some(obj) = raw.as_object_mut() {
            obj.insert("population".to_string(), Value::from(self.city.population.clone()));
        }
        raw
    }

    pub fn air_quality_json(&self) -> Option<&Value> {
        self.air_quality.as_ref().map(|a| &a.raw)
    }
}

fn fmt_time(t: Option<NaiveDateTime>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = &self.weather;
        let c = &self.celsius;

        match &w.country {
            Some(country) => {
                writeln!(f, "🌤️ Weather Analytics in {}, {country}:", self.city.name)?
            }
            None => writeln!(f, "🌤️ Weather Analytics in {}:", self.city.name)?,
        }
        writeln!(f, "  Population:      {}", self.city.population)?;
        writeln!(f, "  Temperature:     {} °C", format_celsius(c.temp))?;
        writeln!(f, "  Feels like:      {} °C", format_celsius(c.feels_like))?;
        writeln!(
            f,
            "  Min / Max:       {} / {} °C",
            format_celsius(c.temp_min),
            format_celsius(c.temp_max)
        )?;
        writeln!(f, "  Pressure:        {} hPa", w.main.pressure)?;
        writeln!(f, "  Humidity:        {} %", w.main.humidity)?;
        writeln!(f, "  Wind Speed:      {} m/s", w.wind_speed_mps)?;
        writeln!(f, "  Weather State:   {}", w.description)?;
        writeln!(f, "  Sunrise:         {}", fmt_time(self.sunrise()))?;
        writeln!(f, "  Sunset:          {}", fmt_time(self.sunset()))?;

        match self.current_air() {
            Some(air) => {
                let p = &air.components;
                writeln!(f, "  Air Pollution Index: {} ({})", air.aqi, air.aqi_label())?;
                if let Some(dt) = air.dt {
                    let at = local_time(dt, w.timezone_offset);
                    writeln!(f, "  Air Quality As Of: {}", fmt_time(at))?;
                }
                writeln!(f, "  Air Pollution Components:")?;
                writeln!(f, "    Carbon Monoxide:  {} μg/m³", p.co)?;
                writeln!(f, "    Nitrogen Monoxide: {} μg/m³", p.no)?;
                writeln!(f, "    Nitrogen Dioxide: {} μg/m³", p.no2)?;
                writeln!(f, "    Ozone:            {} μg/m³", p.o3)?;
                writeln!(f, "    Sulphur Dioxide:  {} μg/m³", p.so2)?;
                write!(f, "    Ammonia:          {} μg/m³", p.nh3)
            }
            None => write!(f, "  ⚠️ Air quality data unavailable"),
        }
    }
}

/// Shown when the weather fetch fails. The population does not depend on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundView {
    pub city: PopulationEntry,
}

impl fmt::Display for NotFoundView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City '{}' not found, Population: {}", self.city.name, self.city.population)
    }
}
