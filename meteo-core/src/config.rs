use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// City used when neither the caller nor the config names one.
pub const FALLBACK_CITY: &str = "London";

/// Forecast day count used when neither the caller nor the config names one.
pub const FALLBACK_DAYS: u8 = 5;

/// Open-Meteo endpoint base URLs.
///
/// Overridable so tests (and self-hosted mirrors) can point the provider at a
/// different server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            geocoding_url: default_geocoding_url(),
        }
    }
}

/// Bind address for `meteo-server`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Kyiv"
/// forecast_days = 3
///
/// [server]
/// port = 8080
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// City used when the CLI gets no positional argument or an HTTP request
    /// has no `city` parameter.
    pub default_city: Option<String>,

    /// Forecast day count used when `--days` / `days=` is absent (1-7).
    pub forecast_days: Option<u8>,

    /// Outbound HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default)]
    pub server: ServerConfig,
}

const fn default_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: None,
            forecast_days: None,
            timeout_secs: default_timeout(),
            endpoints: Endpoints::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// City to use when the caller didn't name one.
    pub fn city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(FALLBACK_CITY)
    }

    /// Forecast day count to use when the caller didn't name one, kept in
    /// the supported 1-7 range.
    pub fn days(&self) -> u8 {
        self.forecast_days.unwrap_or(FALLBACK_DAYS).clamp(1, 7)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service() {
        let cfg = Config::default();
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 5000);
        assert!(cfg.endpoints.forecast_url.contains("api.open-meteo.com"));
        assert!(cfg.endpoints.geocoding_url.contains("geocoding-api.open-meteo.com"));
    }

    #[test]
    fn city_and_days_fall_back() {
        let cfg = Config::default();
        assert_eq!(cfg.city(), "London");
        assert_eq!(cfg.days(), 5);

        let cfg = Config {
            default_city: Some("Kyiv".into()),
            forecast_days: Some(3),
            ..Config::default()
        };
        assert_eq!(cfg.city(), "Kyiv");
        assert_eq!(cfg.days(), 3);
    }

    #[test]
    fn days_is_kept_in_range() {
        let cfg = Config { forecast_days: Some(12), ..Config::default() };
        assert_eq!(cfg.days(), 7);

        let cfg = Config { forecast_days: Some(0), ..Config::default() };
        assert_eq!(cfg.days(), 1);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("default_city = \"Paris\"").expect("valid toml");
        assert_eq!(cfg.city(), "Paris");
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            default_city: Some("Tokyo".into()),
            forecast_days: Some(7),
            timeout_secs: 20,
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).expect("serializes");
        let back: Config = toml::from_str(&text).expect("parses");

        assert_eq!(back.default_city.as_deref(), Some("Tokyo"));
        assert_eq!(back.forecast_days, Some(7));
        assert_eq!(back.timeout_secs, 20);
    }
}
