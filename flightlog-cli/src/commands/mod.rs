//! CLI command implementations.
//!
//! - [`config`] - Configuration management (show, init, path)
//! - [`replay`] - Replay a recorded flight through the phase engine

pub mod config;
pub mod replay;

use std::path::{Path, PathBuf};

use flightlog::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Configuration file in effect: `--config` or the default location.
pub fn resolve_config_path(config: Option<&Path>) -> PathBuf {
    config.map(Path::to_path_buf).unwrap_or_else(config_file_path)
}

/// Load the configuration, falling back to defaults when the file is absent.
pub fn load_config(config: Option<&Path>) -> Result<ConfigFile, CliError> {
    let path = resolve_config_path(config);
    Ok(ConfigFile::load_from(&path)?)
}
