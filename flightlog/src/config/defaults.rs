//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::engine::EngineConfig;
use super::file::config_directory;
use super::settings::*;

// =============================================================================
// Engine thresholds
// =============================================================================

/// Ground speed that starts a taxi.
pub const DEFAULT_TAXI_SPEED: f64 = 1.0;

/// Vertical speed above which the aircraft is climbing.
pub const DEFAULT_CLIMB_RATE: f64 = 500.0;

/// Vertical speed below which the aircraft is descending.
pub const DEFAULT_DESCEND_RATE: f64 = -500.0;

/// Sustained climb/descent/level window.
pub const DEFAULT_VERTICAL_WINDOW_SECS: f64 = 30.0;

/// Heading change that forces a trail point.
pub const DEFAULT_HEADING_CHANGE_DEG: f64 = 10.0;

/// Trail compression on a steady heading.
pub const DEFAULT_SAMPLE_EVERY_TICKS: u32 = 50;

pub const DEFAULT_TAKEOFF_SPEED: f64 = 40.0;
pub const DEFAULT_TAKEOFF_WINDOW_SECS: f64 = 3.0;
pub const DEFAULT_CLIMB_OUT_AGL: f64 = 1000.0;
pub const DEFAULT_TOUCHDOWN_WINDOW_SECS: f64 = 1.0;
pub const DEFAULT_TAXI_IN_SPEED: f64 = 30.0;
pub const DEFAULT_TAXI_IN_WINDOW_SECS: f64 = 3.0;
pub const DEFAULT_PARKED_WINDOW_SECS: f64 = 10.0;

// =============================================================================
// Poll delays (seconds)
// =============================================================================

pub const DEFAULT_POLL_PARKED: f64 = 1.0;
pub const DEFAULT_POLL_TAXI_OUT: f64 = 0.2;
pub const DEFAULT_POLL_TAKEOFF: f64 = 0.2;
pub const DEFAULT_POLL_CLIMB: f64 = 0.2;
pub const DEFAULT_POLL_CRUISE: f64 = 1.0;
pub const DEFAULT_POLL_DESCEND: f64 = 0.2;
pub const DEFAULT_POLL_LANDING: f64 = 0.2;
pub const DEFAULT_POLL_TAXI_IN: f64 = 0.2;

// =============================================================================
// Logging
// =============================================================================

/// Log file name inside the log directory.
pub const DEFAULT_LOG_FILE: &str = "flightlog.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            logging: LoggingSettings {
                directory: config_directory().join("logs"),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
