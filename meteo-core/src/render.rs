//! Terminal rendering: banner, condition art, temperature bar, trend graphs.
//!
//! Everything here returns plain strings so the CLI can print them and the
//! HTTP `/ascii` endpoint can ship them as JSON.

use chrono::{Local, Timelike};

use crate::model::{Condition, CurrentReport, ForecastReport};

const SUNNY: &str = r"
    \   /
     .-.
  ‒ (   ) ‒
     `-'
    /   \
";

const CLOUDY: &str = r"
     .--.
  .-(    ).
 (___.__)__)
";

const RAINY: &str = r"
     .--.
  .-(    ).
 (___.__)__)
  ʻ ʻ ʻ ʻ
 ʻ ʻ ʻ ʻ
";

const STORMY: &str = r"
     .--.
  .-(    ).
 (___.__)__)
    * *
  * * *
";

const SNOWY: &str = r"
     .--.
  .-(    ).
 (___.__)__)
   * * *
  * * *
";

const FOGGY: &str = r"
     .--.
  .-(    ).
 (___.__)__)
 ≡ ≡ ≡ ≡ ≡
≡ ≡ ≡ ≡ ≡ ≡
";

const NIGHT: &str = r"
      *
   *     *
 *    (   *
   *     *
      *
";

const BANNER: &str = "
╔══════════════════════════════════════════════════════════════════════════════╗
║                              WEATHER DASHBOARD                               ║
║                      Advanced Command Line Weather Service                   ║
║                            Powered by Open-Meteo API                         ║
╚══════════════════════════════════════════════════════════════════════════════╝
";

const RULE_WIDTH: usize = 80;
const GRAPH_HEIGHT: usize = 10;

/// Application banner.
pub fn banner() -> &'static str {
    BANNER
}

/// Multi-line art for a condition class. Clear nights get the starfield.
pub fn condition_art(condition: Condition, night: bool) -> &'static str {
    if night && condition == Condition::Clear {
        return NIGHT;
    }

    match condition {
        Condition::Clear => SUNNY,
        Condition::Rain => RAINY,
        Condition::Storm => STORMY,
        Condition::Snow => SNOWY,
        Condition::Fog => FOGGY,
        Condition::Cloudy | Condition::Unknown => CLOUDY,
    }
}

/// Compact icon used in forecast rows.
pub fn mini_icon(condition: Condition) -> &'static str {
    match condition {
        Condition::Clear => "[SUN]",
        Condition::Rain => "[RAIN]",
        Condition::Storm => "[STORM]",
        Condition::Snow => "[SNOW]",
        Condition::Fog => "[FOG]",
        Condition::Cloudy | Condition::Unknown => "[CLOUD]",
    }
}

/// Local night window used for the clear-sky starfield art.
pub fn is_night_now() -> bool {
    let hour = Local::now().hour();
    hour < 6 || hour > 20
}

/// 50-cell temperature scale from -20 °C to 50 °C with a `●` marker.
pub fn temp_bar(temp: f64) -> String {
    const MIN_RANGE: f64 = -20.0;
    const MAX_RANGE: f64 = 50.0;
    const BAR_LENGTH: usize = 50;

    let pos = if temp < MIN_RANGE {
        0
    } else if temp > MAX_RANGE {
        BAR_LENGTH - 1
    } else {
        ((temp - MIN_RANGE) / (MAX_RANGE - MIN_RANGE) * (BAR_LENGTH - 1) as f64) as usize
    };

    let mut bar = String::with_capacity(BAR_LENGTH * 3);
    for i in 0..BAR_LENGTH {
        if i == pos {
            bar.push('●');
        } else if i < pos {
            // Fill texture by temperature band: frost, mild, warm.
            if temp < 0.0 {
                bar.push('▓');
            } else if temp < 20.0 {
                bar.push('▒');
            } else {
                bar.push('░');
            }
        } else {
            bar.push('.');
        }
    }

    format!("{MIN_RANGE}°C [{bar}] {MAX_RANGE}°C\n        Current: {temp}°C")
}

/// 10-row line graph with y-axis labels, `●` points and `─` connectors.
///
/// Fewer than two points (or mismatched labels) renders a placeholder
/// message instead of a graph.
pub fn line_graph(data: &[f64], labels: &[String], title: &str, unit: &str) -> String {
    if data.len() < 2 || data.len() != labels.len() {
        return format!("\n[GRAPH] {title}\nInsufficient data for graph display");
    }

    let min_val = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max_val > min_val { max_val - min_val } else { 1.0 };

    let normalized: Vec<f64> = data
        .iter()
        .map(|v| (v - min_val) / range * (GRAPH_HEIGHT - 1) as f64)
        .collect();

    let mut lines = vec![format!("\n[GRAPH] {title}"), "=".repeat(60)];

    for row in (0..GRAPH_HEIGHT).rev() {
        let y_value = min_val + row as f64 * range / (GRAPH_HEIGHT - 1) as f64;
        let mut line = format!("{y_value:>6.1}{unit} |");

        for (i, &norm) in normalized.iter().enumerate() {
            let r = row as f64;
            let cell = if (norm - r).abs() < 0.5 {
                '●'
            } else if i > 0 {
                let prev = normalized[i - 1];
                if (prev <= r && r <= norm) || (norm <= r && r <= prev) { '─' } else { ' ' }
            } else {
                ' '
            };
            line.push(cell);
            line.push(' ');
        }

        lines.push(line);
    }

    lines.push(format!("        +{}", "─".repeat(data.len() * 2 - 1)));
    lines.push(format!(
        "         {}",
        labels
            .iter()
            .map(|l| l.chars().take(3).collect::<String>())
            .collect::<Vec<_>>()
            .join("  ")
    ));

    lines.join("\n")
}

/// Full-width dashboard for current conditions.
pub fn current_report(report: &CurrentReport, night: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let location = if report.location.country.is_empty() {
        report.location.name.clone()
    } else {
        format!("{}, {}", report.location.name, report.location.country)
    };

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("WEATHER DASHBOARD - {}\n", location.to_uppercase()));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(condition_art(report.weather.condition, night));
    out.push('\n');

    let m = &report.current;
    out.push_str(&format!(
        "TEMPERATURE: {}°C (feels like {}°C)\n",
        m.temperature, m.feels_like
    ));
    out.push_str(&format!("CONDITION: {}\n", report.weather.description));
    out.push_str(&format!("HUMIDITY: {}%\n", m.humidity));
    out.push_str(&format!("PRESSURE: {} hPa\n", m.pressure));
    out.push_str(&format!("WIND: {} m/s\n", m.wind_speed));
    if m.precipitation > 0.0 {
        out.push_str(&format!("PRECIPITATION: {} mm\n", m.precipitation));
    }

    out.push_str("\nTemperature Scale:\n");
    out.push_str(&temp_bar(m.temperature));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    out
}

/// Day-per-row forecast table followed by trend graphs.
pub fn forecast_report(report: &ForecastReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let days = report.forecast.len();
    let location = if report.location.country.is_empty() {
        report.location.name.clone()
    } else {
        format!("{}, {}", report.location.name, report.location.country)
    };

    let mut out = String::new();
    out.push_str(&format!("\n{}-DAY FORECAST - {}\n", days, location.to_uppercase()));
    out.push_str(&rule);
    out.push('\n');

    for day in &report.forecast {
        let day_str = day.date.format("%a %m/%d").to_string();
        let icon = mini_icon(day.weather.condition);
        out.push_str(&format!(
            "{:>9} | {:>8} | {:>5.1}°C | {:>5.1}°C | {}\n",
            day_str, icon, day.temperature.max, day.temperature.min, day.weather.description
        ));
    }

    if days >= 2 {
        let labels: Vec<String> =
            report.forecast.iter().map(|d| d.date.format("%m/%d").to_string()).collect();
        let maxs: Vec<f64> = report.forecast.iter().map(|d| d.temperature.max).collect();
        let mins: Vec<f64> = report.forecast.iter().map(|d| d.temperature.min).collect();
        let precip: Vec<f64> = report.forecast.iter().map(|d| d.precipitation).collect();
        let winds: Vec<f64> = report.forecast.iter().map(|d| d.wind.speed).collect();

        out.push_str(&line_graph(&maxs, &labels, "Max Temperature Trend", "°C"));
        out.push('\n');
        out.push_str(&line_graph(&mins, &labels, "Min Temperature Trend", "°C"));
        out.push('\n');

        if precip.iter().any(|p| *p > 0.0) {
            out.push_str(&line_graph(&precip, &labels, "Precipitation Trend", "mm"));
            out.push('\n');
        }
        if winds.iter().any(|w| *w > 0.0) {
            out.push_str(&line_graph(&winds, &labels, "Wind Speed Trend", "m/s"));
            out.push('\n');
        }
    }

    out.push_str(&rule);
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Coordinates, CurrentReport, DailyWind, ForecastDay, ForecastReport, Measurements, Place,
        TempRange, WeatherSummary,
    };
    use chrono::NaiveDate;

    fn place(name: &str, country: &str) -> Place {
        Place {
            name: name.into(),
            country: country.into(),
            coordinates: Coordinates { lat: 0.0, lon: 0.0 },
        }
    }

    fn current(code: u8, temperature: f64, precipitation: f64) -> CurrentReport {
        CurrentReport {
            location: place("Lisbon", "Portugal"),
            current: Measurements {
                temperature,
                feels_like: temperature - 1.0,
                humidity: 55,
                pressure: 1015.0,
                wind_speed: 3.0,
                wind_direction: 90,
                precipitation,
            },
            weather: WeatherSummary::from_wmo(code),
            timestamp: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn forecast(days: usize) -> ForecastReport {
        let forecast = (0..days)
            .map(|i| ForecastDay {
                date: NaiveDate::from_ymd_opt(2025, 6, 2 + i as u32).unwrap(),
                temperature: TempRange { max: 20.0 + i as f64, min: 10.0 + i as f64 },
                weather: WeatherSummary::from_wmo(if i % 2 == 0 { 0 } else { 61 }),
                precipitation: i as f64,
                wind: DailyWind { speed: 4.0 + i as f64, direction: 180 },
            })
            .collect();
        ForecastReport { location: place("Oslo", "Norway"), forecast }
    }

    #[test]
    fn art_selection_follows_condition() {
        assert!(condition_art(Condition::Clear, false).contains("(   )"));
        assert!(condition_art(Condition::Rain, false).contains('ʻ'));
        assert!(condition_art(Condition::Fog, false).contains('≡'));
        // Unknown conditions fall back to the cloud.
        assert_eq!(condition_art(Condition::Unknown, false), condition_art(Condition::Cloudy, false));
    }

    #[test]
    fn clear_nights_get_the_starfield() {
        let night = condition_art(Condition::Clear, true);
        assert_ne!(night, condition_art(Condition::Clear, false));
        assert!(night.contains('*'));
        // Night only swaps art for clear skies.
        assert_eq!(condition_art(Condition::Rain, true), condition_art(Condition::Rain, false));
    }

    #[test]
    fn mini_icons() {
        assert_eq!(mini_icon(Condition::Clear), "[SUN]");
        assert_eq!(mini_icon(Condition::Storm), "[STORM]");
        assert_eq!(mini_icon(Condition::Unknown), "[CLOUD]");
    }

    #[test]
    fn temp_bar_marks_the_position() {
        let bar = temp_bar(15.0);
        assert!(bar.contains('●'));
        assert!(bar.starts_with("-20°C ["));
        assert!(bar.contains("] 50°C"));
        assert!(bar.contains("Current: 15°C"));
    }

    #[test]
    fn temp_bar_clamps_out_of_range_values() {
        let cold = temp_bar(-100.0);
        let marker_at = cold.chars().position(|c| c == '●').unwrap();
        // '[' sits at index 6; the marker lands in the first cell.
        assert_eq!(marker_at, 7);

        let hot = temp_bar(100.0);
        assert!(hot.contains("●]"));
    }

    #[test]
    fn temp_bar_fill_matches_band() {
        assert!(temp_bar(-5.0).contains('▓'));
        assert!(temp_bar(10.0).contains('▒'));
        assert!(temp_bar(30.0).contains('░'));
    }

    #[test]
    fn line_graph_needs_two_points() {
        let graph = line_graph(&[1.0], &["a".into()], "Lonely", "");
        assert!(graph.contains("Insufficient data"));

        let graph = line_graph(&[1.0, 2.0], &["a".into()], "Mismatch", "");
        assert!(graph.contains("Insufficient data"));
    }

    #[test]
    fn line_graph_plots_points_and_axis() {
        let labels = vec!["06/02".to_string(), "06/03".to_string(), "06/04".to_string()];
        let graph = line_graph(&[10.0, 20.0, 15.0], &labels, "Max Temperature Trend", "°C");

        assert!(graph.contains("[GRAPH] Max Temperature Trend"));
        assert!(graph.contains('●'));
        assert!(graph.contains("        +"));
        // Highest y-axis label comes before the lowest one.
        let top = graph.find("20.0°C").expect("max label");
        let bottom = graph.find("10.0°C").expect("min label");
        assert!(top < bottom);
    }

    #[test]
    fn line_graph_flat_series_does_not_divide_by_zero() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let graph = line_graph(&[5.0, 5.0], &labels, "Flat", "");
        assert!(graph.contains('●'));
    }

    #[test]
    fn current_report_lists_all_fields() {
        let text = current_report(&current(2, 18.4, 0.0), false);

        assert!(text.contains("WEATHER DASHBOARD - LISBON, PORTUGAL"));
        assert!(text.contains("TEMPERATURE: 18.4°C (feels like 17.4°C)"));
        assert!(text.contains("CONDITION: Partly cloudy"));
        assert!(text.contains("HUMIDITY: 55%"));
        assert!(text.contains("PRESSURE: 1015 hPa"));
        assert!(text.contains("WIND: 3 m/s"));
        assert!(text.contains("Temperature Scale:"));
        // Dry weather hides the precipitation row.
        assert!(!text.contains("PRECIPITATION"));
    }

    #[test]
    fn current_report_shows_precipitation_when_wet() {
        let text = current_report(&current(61, 12.0, 2.4), false);
        assert!(text.contains("PRECIPITATION: 2.4 mm"));
    }

    #[test]
    fn forecast_report_has_a_row_per_day_and_graphs() {
        let text = forecast_report(&forecast(3));

        assert!(text.contains("3-DAY FORECAST - OSLO, NORWAY"));
        assert_eq!(text.matches("[SUN]").count(), 2);
        assert_eq!(text.matches("[RAIN]").count(), 1);
        assert!(text.contains("Max Temperature Trend"));
        assert!(text.contains("Min Temperature Trend"));
        // Day 1+ have precipitation and all days have wind.
        assert!(text.contains("Precipitation Trend"));
        assert!(text.contains("Wind Speed Trend"));
    }

    #[test]
    fn single_day_forecast_skips_graphs() {
        let text = forecast_report(&forecast(1));
        assert!(text.contains("1-DAY FORECAST"));
        assert!(!text.contains("[GRAPH]"));
    }

    #[test]
    fn banner_is_boxed() {
        assert!(banner().contains("WEATHER DASHBOARD"));
        assert!(banner().contains('╔'));
        assert!(banner().contains('╝'));
    }
}
