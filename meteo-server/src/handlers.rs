//! HTTP request handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use meteo_core::{CurrentReport, ForecastReport, render};

use crate::{error::ApiError, state::AppState};

/// Landing page, embedded at build time.
pub async fn landing() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Service self-description: endpoints, parameters, examples.
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Weather API is running",
        "endpoints": {
            "GET /": "Landing page",
            "GET /api": "API information",
            "GET /weather": "Get current weather for a city",
            "GET /forecast": "Get weather forecast for a city",
            "GET /ascii": "Get ASCII art weather display"
        },
        "parameters": {
            "city": "City name (optional, default: London)",
            "days": "Number of forecast days 1-7 (optional, default: 5)",
            "mode": "ASCII display mode: 'current' or 'forecast' (optional, default: 'current')"
        },
        "examples": {
            "current_weather": "/weather?city=London",
            "forecast": "/forecast?city=Paris&days=3",
            "ascii_display": "/ascii?city=Tokyo&mode=current"
        }
    }))
}

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    city: Option<String>,
}

pub async fn current_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<CurrentReport>, ApiError> {
    let city = validate_city(params.city.as_deref(), state.config.city())?;

    info!(%city, "fetching current weather");
    let report = state.provider.current(&city).await?;

    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    city: Option<String>,
    days: Option<String>,
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastReport>, ApiError> {
    let city = validate_city(params.city.as_deref(), state.config.city())?;
    let days = parse_days(params.days.as_deref(), state.config.days())?;

    info!(%city, days, "fetching forecast");
    let report = state.provider.forecast(&city, days).await?;

    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct AsciiParams {
    city: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AsciiResponse {
    pub city: String,
    pub mode: String,
    pub ascii: String,
}

/// Same dashboards the CLI prints, shipped as JSON.
pub async fn ascii(
    State(state): State<AppState>,
    Query(params): Query<AsciiParams>,
) -> Result<Json<AsciiResponse>, ApiError> {
    let city = validate_city(params.city.as_deref(), state.config.city())?;
    let mode = params.mode.as_deref().unwrap_or("current").to_lowercase();

    info!(%city, %mode, "rendering ascii display");

    let ascii = match mode.as_str() {
        "current" => {
            let report = state.provider.current(&city).await?;
            render::current_report(&report, render::is_night_now())
        }
        "forecast" => {
            let report = state.provider.forecast(&city, state.config.days()).await?;
            render::forecast_report(&report)
        }
        _ => {
            return Err(ApiError::BadRequest("Mode must be 'current' or 'forecast'".to_string()));
        }
    };

    Ok(Json(AsciiResponse { city, mode, ascii }))
}

/// JSON 404 for unknown routes.
pub async fn fallback() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": "Please check the API documentation at the /api endpoint",
            "available_endpoints": ["/", "/api", "/weather", "/forecast", "/ascii"]
        })),
    )
}

/// Missing or blank `city` falls back to the configured default; anything
/// else must be a plausible city name.
fn validate_city(param: Option<&str>, fallback: &str) -> Result<String, ApiError> {
    let city = param.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(fallback);

    let chars = city.chars().count();
    if chars < 2 {
        return Err(ApiError::BadRequest("City name must be at least 2 characters long".into()));
    }
    if chars > 100 {
        return Err(ApiError::BadRequest("City name is too long".into()));
    }

    Ok(city.to_string())
}

fn parse_days(param: Option<&str>, fallback: u8) -> Result<u8, ApiError> {
    let Some(raw) = param else {
        return Ok(fallback);
    };

    let days: u8 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Days must be a valid number between 1 and 7".into()))?;

    if !(1..=7).contains(&days) {
        return Err(ApiError::BadRequest("Days must be between 1 and 7".into()));
    }

    Ok(days)
}
