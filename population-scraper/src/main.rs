//! Offline data-preparation tool.
//!
//! Downloads the public list of Kazakhstani cities by population and writes the
//! TOML table embedded by `kzweather-core`. The dashboard never runs this.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use kzweather_core::{PopulationEntry, PopulationTable};
use scraper::{Html, Selector};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

const DEFAULT_URL: &str =
    "https://all-populations.com/en/kz/list-of-cities-in-kazakhstan-by-population.html";

const HEADER: &str = "# Kazakhstan cities by population, 2022-2023.\n\
# Regenerate with `cargo run -p population-scraper -- --output kzweather-core/data/cities.toml`.\n\n";

#[derive(Debug, Parser)]
#[command(name = "population-scraper", version, about = "Regenerate the city population table")]
struct Args {
    /// Page holding the population table.
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Write the table here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env()?,
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    tracing::info!(url = %args.url, "fetching population page");
    let res = reqwest::get(&args.url)
        .await
        .with_context(|| format!("Failed to fetch {}", args.url))?;
    let status = res.status();
    if !status.is_success() {
        bail!("{} answered with status {status}", args.url);
    }
    let html = res.text().await.context("Failed to read population page body")?;

    let entries = parse_population_table(&html)?;
    tracing::info!(cities = entries.len(), "parsed population table");

    let table = PopulationTable::from_entries(entries).context("Scraped table is invalid")?;
    let toml = format!("{HEADER}{}", table.to_toml_string()?);

    match args.output {
        Some(path) => {
            fs::write(&path, toml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "table written");
        }
        None => print!("{toml}"),
    }
    Ok(())
}

/// Read `table.table.table-bordered`: first cell is the city, later cells'
/// digits are the population (the last non-empty one wins). Header rows have
/// no `td` and are skipped.
fn parse_population_table(html: &str) -> Result<Vec<PopulationEntry>> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table.table.table-bordered")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| anyhow!("No `table.table-bordered` found in page"))?;

    let mut entries = Vec::new();
    for row in table.select(&row_sel) {
        let mut cells = row.select(&cell_sel);
        let Some(name_cell) = cells.next() else {
            continue;
        };
        let name = name_cell.text().collect::<String>().trim().to_string();

        let population = cells
            .map(|c| c.text().flat_map(str::chars).filter(char::is_ascii_digit).collect::<String>())
            .filter(|digits| !digits.is_empty())
            .last();

        match population {
            Some(population) if !name.is_empty() => {
                entries.push(PopulationEntry { name, population });
            }
            _ => tracing::debug!(row = %name, "skipping row without a population"),
        }
    }

    if entries.is_empty() {
        bail!("Population table has no data rows");
    }
    Ok(entries)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector '{css}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table class="table">
          <tr><td>Decoy</td><td>1</td></tr>
        </table>
        <table class="table table-bordered">
          <tr><th>City</th><th>Population</th></tr>
          <tr><td>Almaty</td><td>1 534 353</td></tr>
          <tr><td> Astana </td><td>844,930</td></tr>
          <tr><td>Temir</td><td>2520</td></tr>
          <tr><td>Ghost</td><td>n/a</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn parses_bordered_table() {
        let entries = parse_population_table(PAGE).unwrap();
        let pairs: Vec<_> =
            entries.iter().map(|e| (e.name.as_str(), e.population.as_str())).collect();
        assert_eq!(pairs, [("Almaty", "1534353"), ("Astana", "844930"), ("Temir", "2520")]);
    }

    #[test]
    fn last_populated_cell_wins() {
        let page = r#"<table class="table table-bordered">
            <tr><td>Aksu</td><td>2021: 41000</td><td>42519</td><td></td></tr>
        </table>"#;
        let entries = parse_population_table(page).unwrap();
        assert_eq!(entries[0].population, "42519");
    }

    #[test]
    fn scraped_rows_form_a_valid_table() {
        let table = PopulationTable::from_entries(parse_population_table(PAGE).unwrap()).unwrap();
        let text = table.to_toml_string().unwrap();
        assert_eq!(PopulationTable::from_toml_str(&text).unwrap(), table);
    }

    #[test]
    fn missing_table_is_an_error() {
        let err = parse_population_table("<p>nothing here</p>").unwrap_err();
        assert!(err.to_string().contains("table-bordered"));
    }

    #[test]
    fn header_only_table_is_an_error() {
        let page = r#"<table class="table table-bordered"><tr><th>City</th></tr></table>"#;
        assert!(parse_population_table(page).is_err());
    }
}
