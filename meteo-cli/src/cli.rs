use anyhow::{Context, ensure};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Text};

use meteo_core::{Config, provider, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "meteo",
    version,
    about = "Weather dashboard for your terminal",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub show: ShowArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set defaults (city, forecast days) and save them.
    Configure,
}

/// Arguments of the default invocation: show weather for a city.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// City name to get weather for (default: configured city, else London).
    pub city: Option<String>,

    /// Show the weather forecast instead of current weather.
    #[arg(short, long)]
    pub forecast: bool,

    /// Number of forecast days (default: 5).
    #[arg(short, long, value_name = "1-7", value_parser = clap::value_parser!(u8).range(1..=7))]
    pub days: Option<u8>,

    /// Show the application banner.
    #[arg(short, long)]
    pub banner: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => show(self.show).await,
        }
    }
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    if args.banner {
        print!("{}", render::banner());
        return Ok(());
    }

    let config = Config::load()?;
    let provider = provider::default_provider(&config)?;

    let city = args.city.as_deref().unwrap_or_else(|| config.city());

    if args.forecast {
        let days = args.days.unwrap_or_else(|| config.days());
        let report = provider.forecast(city, days).await?;
        print!("{}", render::forecast_report(&report));
    } else {
        let report = provider.current(city).await?;
        print!("{}", render::current_report(&report, render::is_night_now()));
    }

    Ok(())
}

/// Interactive configuration, persisted to the platform config directory.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let city = Text::new("Default city:")
        .with_default(config.city())
        .prompt()
        .context("Failed to read default city")?;

    let days = CustomType::<u8>::new("Default forecast days (1-7):")
        .with_default(config.days())
        .with_error_message("Please enter a number")
        .prompt()
        .context("Failed to read default forecast days")?;

    ensure!((1..=7).contains(&days), "Forecast days must be between 1 and 7, got {days}");

    let city = city.trim();
    if !city.is_empty() {
        config.default_city = Some(city.to_string());
    }
    config.forecast_days = Some(days);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_uses_defaults() {
        let cli = Cli::try_parse_from(["meteo"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(cli.show.city.is_none());
        assert!(!cli.show.forecast);
        assert!(cli.show.days.is_none());
        assert!(!cli.show.banner);
    }

    #[test]
    fn city_with_forecast_flags() {
        let cli = Cli::try_parse_from(["meteo", "Tokyo", "--forecast", "--days", "3"])
            .expect("parses");
        assert_eq!(cli.show.city.as_deref(), Some("Tokyo"));
        assert!(cli.show.forecast);
        assert_eq!(cli.show.days, Some(3));
    }

    #[test]
    fn short_flags_work() {
        let cli = Cli::try_parse_from(["meteo", "-f", "-d", "7", "Paris"]).expect("parses");
        assert_eq!(cli.show.city.as_deref(), Some("Paris"));
        assert!(cli.show.forecast);
        assert_eq!(cli.show.days, Some(7));
    }

    #[test]
    fn days_outside_range_is_rejected() {
        assert!(Cli::try_parse_from(["meteo", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["meteo", "--days", "8"]).is_err());
    }

    #[test]
    fn banner_flag() {
        let cli = Cli::try_parse_from(["meteo", "--banner"]).expect("parses");
        assert!(cli.show.banner);
    }

    #[test]
    fn configure_subcommand() {
        let cli = Cli::try_parse_from(["meteo", "configure"]).expect("parses");
        assert!(matches!(cli.command, Some(Command::Configure)));
    }
}
