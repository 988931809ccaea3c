use crate::{
    Config,
    error::WeatherError,
    model::{CurrentReport, ForecastReport, Location},
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openmeteo;

/// Smallest forecast day count the service supports.
pub const MIN_FORECAST_DAYS: u8 = 1;
/// Largest forecast day count the service supports.
pub const MAX_FORECAST_DAYS: u8 = 7;

/// Abstraction over the upstream weather service.
///
/// All operations take a city name; coordinate resolution happens inside the
/// provider. `days` outside the supported range is brought back into it.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn geocode(&self, city: &str) -> Result<Location, WeatherError>;

    async fn current(&self, city: &str) -> Result<CurrentReport, WeatherError>;

    async fn forecast(&self, city: &str, days: u8) -> Result<ForecastReport, WeatherError>;
}

/// Construct the provider configured for this installation.
pub fn default_provider(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    Ok(Arc::new(OpenMeteoProvider::new(config)?))
}
