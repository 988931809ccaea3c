//! Core library for the `meteo` weather dashboard.
//!
//! This crate defines:
//! - Configuration handling (default city, forecast days, endpoints)
//! - Abstraction over the upstream weather service (Open-Meteo)
//! - Shared domain models (locations, reports, WMO condition mapping)
//! - ASCII rendering used by both the CLI and the HTTP `/ascii` endpoint
//!
//! It is used by `meteo-cli` and `meteo-server`.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, Endpoints, ServerConfig};
pub use error::WeatherError;
pub use model::{Condition, CurrentReport, ForecastDay, ForecastReport, Location};
pub use provider::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS, WeatherProvider, default_provider};
