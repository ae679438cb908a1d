use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use kzweather_core::{
    Config, Dashboard, Outcome, PopulationTable, Report, config::API_KEY_ENV,
    dashboard_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "kzweather", version, about = "Weather and air quality for Kazakhstani cities")]
pub struct Cli {
    /// Verbose logging to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and an optional default city.
    Configure,

    /// Show weather and air quality for a city.
    Show {
        /// City name; prompts with the city list when absent.
        city: Option<String>,

        /// Also print the raw provider JSON.
        #[arg(long)]
        raw: bool,

        /// Do not print the map pin.
        #[arg(long)]
        no_map: bool,
    },

    /// List supported cities with their population.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, raw, no_map } => show(city, raw, !no_map).await,
            Command::Cities => {
                let table = PopulationTable::builtin().context("Builtin city table is invalid")?;
                print!("{}", format_cities(&table));
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    cfg.api_key = Some(api_key.trim().to_string());

    let table = PopulationTable::builtin().context("Builtin city table is invalid")?;
    let default_city =
        Select::new("Default city (Esc to skip):", table.names()).prompt_skippable()?;
    if let Some(city) = default_city {
        cfg.default_city = Some(city.to_string());
    }

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(city: Option<String>, raw: bool, map: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let dashboard = dashboard_from_config(&cfg, std::env::var(API_KEY_ENV).ok())?;

    let city = match city {
        Some(c) => c,
        None => choose_city(&dashboard, cfg.default_city.as_deref())?,
    };

    match dashboard.run(&city).await? {
        Outcome::Rendered(report) => {
            print!("{}", render(&report, raw, map)?);
            Ok(())
        }
        Outcome::WeatherNotFound(view) => bail!("{view}"),
    }
}

fn choose_city(dashboard: &Dashboard, default_city: Option<&str>) -> anyhow::Result<String> {
    let names = dashboard.cities().names();
    let cursor = default_city
        .and_then(|d| names.iter().position(|n| n.eq_ignore_ascii_case(d)))
        .unwrap_or(0);

    let choice = Select::new("Choose a city", names).with_starting_cursor(cursor).prompt()?;
    Ok(choice.to_string())
}

fn render(report: &Report, raw: bool, map: bool) -> anyhow::Result<String> {
    let mut out = format!("{report}\n");

    if map {
        out.push_str(&format!("\n{}\n", report.map_pin()));
    }

    if raw {
        let weather = serde_json::to_string_pretty(&report.weather_json())
            .context("Failed to serialize weather JSON")?;
        out.push_str(&format!("\nWeather JSON Data\n{weather}\n"));

        if let Some(air) = report.air_quality_json() {
            let air =
                serde_json::to_string_pretty(air).context("Failed to serialize air pollution JSON")?;
            out.push_str(&format!("\nAir Pollution JSON Data\n{air}\n"));
        }
    }

    Ok(out)
}

fn format_cities(table: &PopulationTable) -> String {
    table
        .iter()
        .map(|e| format!("{:<18} {:>9}\n", e.name, e.population))
        .collect()
}
