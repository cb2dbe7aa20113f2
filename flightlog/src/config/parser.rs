//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::flight_status::FlightPhase;

/// `[poll]` keys and the phase each one configures.
pub(super) const POLL_KEYS: [(&str, FlightPhase); 8] = [
    ("parked", FlightPhase::Parked),
    ("taxi_out", FlightPhase::TaxiOut),
    ("takeoff", FlightPhase::TakeOff),
    ("climb", FlightPhase::Climb),
    ("cruise", FlightPhase::Cruise),
    ("descend", FlightPhase::Descend),
    ("landing", FlightPhase::Landing),
    ("taxi_in", FlightPhase::TaxiIn),
];

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
/// The resulting engine configuration is validated before it is returned.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [engine] section
    if let Some(section) = ini.section(Some("engine")) {
        let engine = &mut config.engine;
        let fields: [(&str, &mut f64); 12] = [
            ("taxi_speed", &mut engine.taxi_speed),
            ("climb_rate", &mut engine.climb_rate),
            ("descend_rate", &mut engine.descend_rate),
            ("vertical_window_secs", &mut engine.vertical_window_secs),
            ("heading_change_deg", &mut engine.heading_change_deg),
            ("takeoff_speed", &mut engine.takeoff_speed),
            ("takeoff_window_secs", &mut engine.takeoff_window_secs),
            ("climb_out_agl", &mut engine.climb_out_agl),
            ("touchdown_window_secs", &mut engine.touchdown_window_secs),
            ("taxi_in_speed", &mut engine.taxi_in_speed),
            ("taxi_in_window_secs", &mut engine.taxi_in_window_secs),
            ("parked_window_secs", &mut engine.parked_window_secs),
        ];
        for (key, field) in fields {
            if let Some(v) = section.get(key) {
                *field = parse_number("engine", key, v)?;
            }
        }
        if let Some(v) = section.get("sample_every_ticks") {
            engine.sample_every_ticks =
                v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "engine".to_string(),
                    key: "sample_every_ticks".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer".to_string(),
                })?;
        }
    }

    // [poll] section
    if let Some(section) = ini.section(Some("poll")) {
        for (key, phase) in POLL_KEYS {
            if let Some(v) = section.get(key) {
                let seconds = parse_number("poll", key, v)?;
                if seconds <= 0.0 {
                    return Err(ConfigFileError::InvalidValue {
                        section: "poll".to_string(),
                        key: key.to_string(),
                        value: v.to_string(),
                        reason: "must be a positive number of seconds".to_string(),
                    });
                }
                config.engine.poll.set(phase, seconds);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    config.engine.validate()?;

    Ok(config)
}

fn parse_number(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a number".to_string(),
        }),
    }
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
