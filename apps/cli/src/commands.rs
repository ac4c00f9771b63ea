//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use filmdex_access::MobileAccess;
use filmdex_shared::{AccessConfig, AppConfig, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// filmdex — movie and person records from the mobile site.
#[derive(Parser)]
#[command(
    name = "filmdex",
    version,
    about = "Look up movies and people and print their records as JSON.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.filmdex/filmdex.toml.
    #[arg(long, global = true, env = "FILMDEX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(flatten)]
    Lookup(Lookup),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands that retrieve a page and print its record.
#[derive(Subcommand)]
pub(crate) enum Lookup {
    /// Search movie titles.
    SearchMovie {
        /// Title to search for.
        query: String,

        /// Maximum number of results (defaults to the configured value).
        #[arg(short = 'n', long)]
        results: Option<u32>,
    },

    /// Main details of a movie.
    Movie {
        /// Movie code, with or without the `tt` prefix.
        id: String,
    },

    /// Plot summaries of a movie.
    Plot {
        /// Movie code, with or without the `tt` prefix.
        id: String,
    },

    /// Search person names.
    SearchPerson {
        /// Name to search for.
        query: String,

        /// Maximum number of results (defaults to the configured value).
        #[arg(short = 'n', long)]
        results: Option<u32>,
    },

    /// Main details and filmography of a person.
    Person {
        /// Person code, with or without the `nm` prefix.
        id: String,
    },

    /// Biography of a person.
    Bio {
        /// Person code, with or without the `nm` prefix.
        id: String,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "filmdex=warn",
        1 => "filmdex=info",
        2 => "filmdex=debug",
        _ => "filmdex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Lookup(lookup) => {
            let access = MobileAccess::from_config(&AccessConfig::try_from(&config)?)?;
            cmd_lookup(&access, lookup).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_lookup(access: &MobileAccess, lookup: Lookup) -> Result<()> {
    let spinner = spinner()?;

    let json = match lookup {
        Lookup::SearchMovie { query, results } => {
            spinner.set_message(format!("Searching titles for \"{query}\""));
            to_json(&access.search_movie(&query, results).await?)?
        }
        Lookup::Movie { id } => {
            spinner.set_message("Fetching movie details");
            to_json(&access.get_movie_main(bare_id(&id, "tt")).await?)?
        }
        Lookup::Plot { id } => {
            spinner.set_message("Fetching plot summaries");
            to_json(&access.get_movie_plot(bare_id(&id, "tt")).await?)?
        }
        Lookup::SearchPerson { query, results } => {
            spinner.set_message(format!("Searching names for \"{query}\""));
            to_json(&access.search_person(&query, results).await?)?
        }
        Lookup::Person { id } => {
            spinner.set_message("Fetching person details");
            to_json(&access.get_person_main(bare_id(&id, "nm")).await?)?
        }
        Lookup::Bio { id } => {
            spinner.set_message("Fetching biography");
            to_json(&access.get_person_biography(bare_id(&id, "nm")).await?)?
        }
    };

    spinner.finish_and_clear();
    println!("{json}");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    info!(path = %path.display(), "config initialized");
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Accept `tt0133093` / `nm0000206` as well as the bare code.
fn bare_id<'a>(raw: &'a str, prefix: &str) -> &'a str {
    let raw = raw.trim();
    raw.strip_prefix(prefix).unwrap_or(raw)
}

fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Spinner on stderr, so stdout carries only the JSON output.
fn spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}
