//! Configuration settings for cosvalue.

use crate::market::TipPolicyKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `COSVALUE__SCRAPER__SERIES`.
pub const ENV_PREFIX: &str = "COSVALUE";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Value page scraping.
    pub scraper: ScraperConfig,
    /// Lookup history.
    pub history: HistoryConfig,
    /// Trading tip rules.
    pub tips: TipsConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered with `COSVALUE__*` environment
    /// variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        let settings = config::Config::builder()
            .add_source(
                config::File::from(config_path.clone())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok(loaded)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Where the history file lives.
    pub fn history_path(&self) -> crate::Result<PathBuf> {
        match &self.history.path {
            Some(path) => Ok(path.clone()),
            None => super::data_dir().map(|dir| dir.join(super::HISTORY_FILE)),
        }
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Scraper configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site base URL.
    pub base_url: String,
    /// Game series suffix of the page name.
    pub series: String,
    /// Custom User-Agent header (reqwest default when unset).
    pub user_agent: Option<String>,
    /// Request timeout in seconds (no timeout when unset).
    pub timeout_secs: Option<u64>,
    /// Honour HTTP(S)_PROXY environment variables.
    pub use_system_proxy: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.game.guide".to_string(),
            series: "sonaria".to_string(),
            user_agent: None,
            timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

/// History configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file path (data directory when unset).
    pub path: Option<PathBuf>,
    /// Maximum number of autocomplete suggestions shown.
    pub max_suggestions: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_suggestions: 5,
        }
    }
}

/// Trading tip configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipsConfig {
    /// Which rule set produces the tips.
    pub policy: TipPolicyKind,
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Draw the animated line backdrop.
    pub animate_backdrop: bool,
    /// Number of strokes in each backdrop frame.
    pub backdrop_strokes: usize,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Currency label appended to values.
    pub value_unit: String,
    /// Label appended to demand.
    pub demand_unit: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            animate_backdrop: true,
            backdrop_strokes: 30,
            show_status_bar: true,
            value_unit: "Mush".to_string(),
            demand_unit: "Players".to_string(),
        }
    }
}

/// Key bindings configuration (normal mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Focus the search input.
    pub search: String,
    /// Alternate key to focus the search input.
    pub insert: String,
    /// Repeat the last lookup.
    pub refresh: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            search: "/".to_string(),
            insert: "i".to_string(),
            refresh: "r".to_string(),
        }
    }
}
