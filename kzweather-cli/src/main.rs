//! Binary crate for the `kzweather` command-line dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive city selection and configuration
//! - Printing the report, map pin and raw JSON

use clap::Parser;

mod cli;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logger::init(cmd.debug)?;
    cmd.run().await
}
