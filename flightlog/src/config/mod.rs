//! Configuration for the flight phase engine and the command-line tools.
//!
//! - [`EngineConfig`] holds thresholds, hysteresis windows and per-phase poll
//!   delays, and is validated before an engine is built.
//! - [`ConfigFile`] is the on-disk `~/.flightlog/config.ini` representation.
//!
//! # Example
//!
//! ```
//! use flightlog::config::{window_ticks, EngineConfig};
//! use flightlog::flight_status::FlightPhase;
//!
//! let config = EngineConfig::default();
//! let poll = config.poll.for_phase(FlightPhase::Cruise);
//! assert_eq!(window_ticks(config.vertical_window_secs, poll), 30);
//! ```

mod defaults;
mod engine;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use engine::{window_ticks, ConfigError, EngineConfig, PollSettings};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings};
