use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Coordinate, ForecastPoint, ForecastProvider, ValidityRule, provider_from_config,
};
use inquire::{Password, Select, Text};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Marine point forecast CLI")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the StormGlass API token and defaults.
    Configure,

    /// Show hourly swell, wave and wind points for a location.
    Points {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Last hour to fetch, RFC 3339 (e.g. 2020-06-14T05:50:02Z). Falls back to the
        /// configured `end`; if neither is set, StormGlass uses its default window.
        #[arg(long)]
        end: Option<String>,

        /// Preferred data source for this call, e.g. "noaa" or "sg".
        #[arg(long)]
        source: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Points { lat, lng, end, source, json } => {
                show_points(Coordinate::new(lat, lng), end, source, json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let token = Password::new("StormGlass API token:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API token")?;

    let source = Text::new("Preferred data source:")
        .with_default(&config.stormglass.source)
        .prompt()
        .context("Failed to read data source")?;

    let validity = Select::new(
        "Drop records whose values are:",
        ValidityRule::all().to_vec(),
    )
    .with_help_message("truthy: missing or zero (legacy); present: missing only")
    .prompt()
    .context("Failed to read validity rule")?;

    config.set_api_token(token.trim().to_string());
    config.stormglass.source = source.trim().to_string();
    config.stormglass.validity = validity;
    config.save()?;

    info!(path = %Config::config_file_path()?.display(), "Saved configuration");
    println!("Configuration saved.");
    Ok(())
}

async fn show_points(
    coordinate: Coordinate,
    end: Option<String>,
    source: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(end) = end {
        let parsed = DateTime::parse_from_rfc3339(&end)
            .with_context(|| format!("Invalid --end value '{end}', expected RFC 3339"))?;
        config.stormglass.end = Some(parsed.timestamp());
    }
    if let Some(source) = source {
        config.stormglass.source = source;
    }

    let provider: Box<dyn ForecastProvider> = provider_from_config(&config)?;
    let points = provider.fetch_points(coordinate).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        print_table(&points);
    }

    Ok(())
}

fn print_table(points: &[ForecastPoint]) {
    if points.is_empty() {
        println!("No complete forecast points returned.");
        return;
    }

    println!(
        "{:<26} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "time", "swellDir", "swellHt", "swellPd", "waveDir", "waveHt", "windDir", "windSpd"
    );
    for p in points {
        println!(
            "{:<26} {:>8.1} {:>8.2} {:>8.1} {:>8.1} {:>8.2} {:>8.1} {:>8.1}",
            p.time,
            p.swell_direction,
            p.swell_height,
            p.swell_period,
            p.wave_direction,
            p.wave_height,
            p.wind_direction,
            p.wind_speed,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn points_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "forecast", "points", "--lat", "-33.79", "--lng", "-151.28", "--json",
        ])
        .expect("arguments should parse");

        match cli.command {
            Command::Points { lat, lng, json, end, source } => {
                assert_eq!(lat, -33.79);
                assert_eq!(lng, -151.28);
                assert!(json);
                assert!(end.is_none());
                assert!(source.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn points_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["forecast", "points", "--lat", "1.0"]).is_err());
    }
}
