use anyhow::Context;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    Config,
    error::WeatherError,
    model::{
        CurrentReport, DailyWind, ForecastDay, ForecastReport, Location, Measurements, Place,
        TempRange, WeatherSummary,
    },
};

use super::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS, WeatherProvider};

/// `current=` field list requested for current conditions.
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                              precipitation,weather_code,surface_pressure,wind_speed_10m,\
                              wind_direction_10m";

/// `daily=` field list requested for forecasts.
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code,\
                            precipitation_sum,wind_speed_10m_max,wind_direction_10m_dominant";

/// Open-Meteo client: geocoding plus the forecast endpoint, no API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            forecast_url: config.endpoints.forecast_url.clone(),
            geocoding_url: config.endpoints.geocoding_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(format!("{what}: {e}")))?;

        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimited);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!(
                "{what} request returned HTTP {status}"
            )));
        }

        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::InvalidResponse(format!("{what}: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!(
                "{what} request returned HTTP {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::InvalidResponse(format!("{what}: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, city: &str) -> Result<Location, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        debug!(city, "resolving coordinates");

        let parsed: GeoResponse = self
            .get_json(
                &self.geocoding_url,
                &[("name", city), ("count", "1"), ("language", "en"), ("format", "json")],
                "geocoding",
            )
            .await?;

        let hit = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        Ok(Location {
            name: hit.name,
            country: hit.country.unwrap_or_else(|| "Unknown".to_string()),
            admin1: hit.admin1,
            latitude: hit.latitude,
            longitude: hit.longitude,
        })
    }

    async fn current(&self, city: &str) -> Result<CurrentReport, WeatherError> {
        let location = self.geocode(city).await?;

        debug!(name = %location.name, "fetching current weather");

        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();

        let parsed: OmForecastResponse = self
            .get_json(
                &self.forecast_url,
                &[
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                    ("current", CURRENT_FIELDS),
                    ("timezone", "auto"),
                    ("wind_speed_unit", "ms"),
                ],
                "current weather",
            )
            .await?;

        let current = parsed.current.ok_or_else(|| {
            WeatherError::InvalidResponse("no current block in forecast response".to_string())
        })?;

        let timestamp = parse_local_time(&current.time)?;

        Ok(CurrentReport {
            location: Place::from(&location),
            current: Measurements {
                temperature: current.temperature_2m,
                feels_like: current.apparent_temperature,
                humidity: current.relative_humidity_2m,
                pressure: current.surface_pressure,
                wind_speed: current.wind_speed_10m,
                wind_direction: current.wind_direction_10m,
                precipitation: current.precipitation,
            },
            weather: WeatherSummary::from_wmo(current.weather_code),
            timestamp,
        })
    }

    async fn forecast(&self, city: &str, days: u8) -> Result<ForecastReport, WeatherError> {
        let days = days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS);
        let location = self.geocode(city).await?;

        debug!(name = %location.name, days, "fetching forecast");

        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();
        let days_param = days.to_string();

        let parsed: OmForecastResponse = self
            .get_json(
                &self.forecast_url,
                &[
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                    ("daily", DAILY_FIELDS),
                    ("timezone", "auto"),
                    ("forecast_days", days_param.as_str()),
                    ("wind_speed_unit", "ms"),
                ],
                "forecast",
            )
            .await?;

        let daily = parsed.daily.ok_or_else(|| {
            WeatherError::InvalidResponse("no daily block in forecast response".to_string())
        })?;

        let len = daily.time.len().min(days as usize);
        let mut forecast = Vec::with_capacity(len);

        for i in 0..len {
            let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").map_err(|e| {
                WeatherError::InvalidResponse(format!(
                    "invalid forecast date '{}': {e}",
                    daily.time[i]
                ))
            })?;

            let code = pick(&daily.weather_code, i, "weather_code")?;

            forecast.push(ForecastDay {
                date,
                temperature: TempRange {
                    max: pick(&daily.temperature_2m_max, i, "temperature_2m_max")?,
                    min: pick(&daily.temperature_2m_min, i, "temperature_2m_min")?,
                },
                weather: WeatherSummary::from_wmo(code),
                precipitation: pick(&daily.precipitation_sum, i, "precipitation_sum")?,
                wind: DailyWind {
                    speed: pick(&daily.wind_speed_10m_max, i, "wind_speed_10m_max")?,
                    direction: pick(
                        &daily.wind_direction_10m_dominant,
                        i,
                        "wind_direction_10m_dominant",
                    )?,
                },
            });
        }

        Ok(ForecastReport { location: Place::from(&location), forecast })
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: u8,
    apparent_temperature: f64,
    precipitation: f64,
    weather_code: u8,
    surface_pressure: f64,
    wind_speed_10m: f64,
    wind_direction_10m: u16,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<u8>,
    precipitation_sum: Vec<f64>,
    wind_speed_10m_max: Vec<f64>,
    wind_direction_10m_dominant: Vec<u16>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: Option<OmCurrent>,
    daily: Option<OmDaily>,
}

/// Daily arrays must be at least as long as the time axis we iterate.
fn pick<T: Copy>(values: &[T], i: usize, field: &str) -> Result<T, WeatherError> {
    values.get(i).copied().ok_or_else(|| {
        WeatherError::InvalidResponse(format!("daily field '{field}' shorter than time axis"))
    })
}

/// Open-Meteo returns location-local times like `2025-06-01T14:30`.
fn parse_local_time(s: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::InvalidResponse(format!("invalid observation time '{s}': {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
