//! filmdex CLI — movie and person records from the site's mobile pages.
//!
//! Looks up titles and names, retrieves their pages, and prints the
//! extracted records as JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
