//! Settings structs for all configuration sections.
//!
//! Each struct represents one or more `[section]`s of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use super::engine::EngineConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Engine thresholds (`[engine]`) and poll delays (`[poll]`)
    pub engine: EngineConfig,
    /// Logging settings (`[logging]`)
    pub logging: LoggingSettings,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
