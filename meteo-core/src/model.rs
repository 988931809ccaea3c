use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A geocoded place, as resolved from a city name.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "Name, Country" label used in rendered output headers.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Coarse condition class derived from a WMO weather code.
///
/// Drives the choice of ASCII art and mini icons; serialized lowercase in
/// JSON responses (`"clear"`, `"rain"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Storm,
    Unknown,
}

impl Condition {
    pub const fn from_wmo(code: u8) -> Self {
        match code {
            0 | 1 => Self::Clear,
            2 | 3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Storm,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable description for a WMO weather code.
///
/// See <https://open-meteo.com/en/docs> for the code reference.
pub const fn wmo_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Weather code plus its derived description and condition class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub code: u8,
    pub description: String,
    pub condition: Condition,
}

impl WeatherSummary {
    pub fn from_wmo(code: u8) -> Self {
        Self {
            code,
            description: wmo_description(code).to_string(),
            condition: Condition::from_wmo(code),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Location block of a JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl From<&Location> for Place {
    fn from(loc: &Location) -> Self {
        Self {
            name: loc.name.clone(),
            country: loc.country.clone(),
            coordinates: Coordinates { lat: loc.latitude, lon: loc.longitude },
        }
    }
}

/// Instantaneous measurements of the current conditions.
///
/// Temperatures in °C, pressure in hPa, wind in m/s, precipitation in mm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurements {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub precipitation: f64,
}

/// Current weather for a resolved location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentReport {
    pub location: Place,
    pub current: Measurements,
    pub weather: WeatherSummary,
    /// Observation time, local to the location.
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TempRange {
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyWind {
    /// Daily maximum wind speed in m/s.
    pub speed: f64,
    /// Dominant wind direction in degrees.
    pub direction: u16,
}

/// One day of forecast data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature: TempRange,
    pub weather: WeatherSummary,
    /// Precipitation sum in mm.
    pub precipitation: f64,
    pub wind: DailyWind,
}

/// Multi-day forecast for a resolved location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub location: Place,
    pub forecast: Vec<ForecastDay>,
}
