//! FlightLog - flight phase detection for X-Plane
//!
//! This library infers the phase of a flight (parked, taxi, take-off, climb,
//! cruise, descend, landing) from periodically sampled simulator telemetry
//! and keeps a running flight log: state-change events and a geo-referenced
//! position trail.
//!
//! # High-Level API
//!
//! The [`flight_status::PhaseEngine`] is driven one snapshot at a time and
//! tells the caller when to sample next:
//!
//! ```ignore
//! use flightlog::config::ConfigFile;
//! use flightlog::flight_status::PhaseEngine;
//!
//! let config = ConfigFile::load()?;
//! let mut engine = PhaseEngine::new(config.engine, accessor)?;
//!
//! loop {
//!     let snapshot = read_telemetry();
//!     let delay = engine.process_snapshot(&snapshot);
//!     sleep(Duration::from_secs_f64(delay));
//! }
//! ```
//!
//! For offline use, [`replay`] reads recorded flights and
//! [`flight_loop::FlightLoop`] drives the engine asynchronously.

pub mod airport;
pub mod config;
pub mod flight_loop;
pub mod flight_status;
pub mod geo;
pub mod logging;
pub mod replay;
pub mod telemetry;

/// Version of the FlightLog library and CLI.
///
/// Defined in the workspace `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
