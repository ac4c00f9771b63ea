//! Application configuration for filmdex.
//!
//! User config lives at `~/.filmdex/filmdex.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FilmdexError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "filmdex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".filmdex";

// ---------------------------------------------------------------------------
// Config structs (matching filmdex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Retrieval settings.
    #[serde(default)]
    pub access: AccessSection,

    /// Search settings.
    #[serde(default)]
    pub search: SearchSection,
}

/// `[access]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessSection {
    /// Root of the site; page paths are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AccessSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.imdb.com/".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_redirects() -> usize {
    5
}
fn default_user_agent() -> String {
    concat!("filmdex/", env!("CARGO_PKG_VERSION")).into()
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    /// Maximum number of results requested from a search page.
    #[serde(default = "default_results")]
    pub results: u32,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            results: default_results(),
        }
    }
}

fn default_results() -> u32 {
    20
}

// ---------------------------------------------------------------------------
// Access config (runtime, validated)
// ---------------------------------------------------------------------------

/// Runtime retrieval configuration, validated from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// Site root. Always ends with `/` so relative joins keep its path.
    pub base_url: Url,
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    pub search_results: u32,
}

impl TryFrom<&AppConfig> for AccessConfig {
    type Error = FilmdexError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        let mut raw = config.access.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| FilmdexError::config(format!("invalid base_url '{raw}': {e}")))?;

        if config.search.results == 0 {
            return Err(FilmdexError::config("search.results must be at least 1"));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(config.access.timeout_secs),
            max_redirects: config.access.max_redirects,
            user_agent: config.access.user_agent.clone(),
            search_results: config.search.results,
        })
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(&default_base_url()).expect("default base url is valid"),
            timeout: Duration::from_secs(default_timeout_secs()),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            search_results: default_results(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.filmdex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FilmdexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.filmdex/filmdex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FilmdexError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        FilmdexError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| FilmdexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| FilmdexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| FilmdexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
