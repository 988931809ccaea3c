//! Application state shared across handlers.

use std::sync::Arc;

use meteo_core::{Config, WeatherProvider};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Upstream weather provider.
    pub provider: Arc<dyn WeatherProvider>,
    /// Application configuration.
    pub config: Arc<Config>,
}
