//! Core library for the `kzweather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - OpenWeatherMap weather and air-pollution clients over a pluggable transport
//! - The static city population table
//! - The request cycle that merges both fetches into a printable report
//!
//! It is used by `kzweather-cli`; `population-scraper` shares only the table format.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod population;
pub mod report;
pub mod transport;
pub mod units;

#[cfg(test)]
mod testing;

pub use client::{AirQualityClient, Endpoint, FetchError, WeatherClient};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardError, Outcome, dashboard_from_config};
pub use model::{AirQualityRecord, Coordinates, WeatherRecord};
pub use population::{PopulationEntry, PopulationTable, TableError};
pub use report::{MapPin, NotFoundView, Report};
pub use transport::{HttpReply, ReqwestTransport, Transport, TransportError};
