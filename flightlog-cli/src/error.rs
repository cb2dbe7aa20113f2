//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use flightlog::airport::AirportIndexError;
use flightlog::config::{ConfigError, ConfigFileError};
use flightlog::replay::RecordingError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid command line usage
    Usage(String),
    /// Configuration file could not be read or written
    Config(ConfigFileError),
    /// Engine configuration rejected
    Engine(ConfigError),
    /// Airport database could not be loaded
    Airports(AirportIndexError),
    /// Flight recording could not be opened
    Recording(RecordingError),
    /// Failed to serialize the flight log
    Serialize(serde_json::Error),
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) | CliError::Engine(_) => {
                eprintln!();
                eprintln!("Check the configuration with: flightlog config show");
                eprintln!("Reset it to defaults with:    flightlog config init --force");
            }
            CliError::Airports(AirportIndexError::NotFound(_)) => {
                eprintln!();
                eprintln!("Point --apt-dat at an apt.dat file, or --xplane at an X-Plane 12");
                eprintln!("installation. Replays without airports record departures as ZZZZ.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Engine(e) => write!(f, "Invalid engine configuration: {}", e),
            CliError::Airports(e) => write!(f, "Failed to load airport database: {}", e),
            CliError::Recording(e) => write!(f, "Failed to open recording: {}", e),
            CliError::Serialize(e) => write!(f, "Failed to serialize flight log: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Airports(e) => Some(e),
            CliError::Recording(e) => Some(e),
            CliError::Serialize(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Engine(e)
    }
}

impl From<AirportIndexError> for CliError {
    fn from(e: AirportIndexError) -> Self {
        CliError::Airports(e)
    }
}

impl From<RecordingError> for CliError {
    fn from(e: RecordingError) -> Self {
        CliError::Recording(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialize(e)
    }
}
