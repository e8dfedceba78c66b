//! Configuration management for cosvalue.

mod settings;

pub use settings::{
    Config, ENV_PREFIX, HistoryConfig, KeyBindings, ScraperConfig, TipsConfig, UiConfig,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the lookup history inside the data directory.
pub const HISTORY_FILE: &str = "history.txt";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "cosvalue", "cosvalue")
}

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine config directory"))
}

/// Get the data directory path.
pub fn data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine data directory"))
}

/// Get the log directory path.
pub fn log_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("logs"))
        .ok_or_else(|| Error::config("Could not determine log directory"))
}
