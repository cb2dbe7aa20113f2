//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::fmt::Write;
use std::path::Path;

use super::parser::POLL_KEYS;
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let engine = &config.engine;

    let mut poll = String::new();
    for (key, phase) in POLL_KEYS {
        // Writing into a String cannot fail
        let _ = writeln!(poll, "{} = {}", key, engine.poll.for_phase(phase));
    }

    format!(
        r#"[engine]
; Speeds, rates and heights are compared against telemetry as-is and must use
; the same units as the telemetry source (X-Plane: knots, feet per minute, feet).
;
; Ground speed that starts a taxi out of the parked phase
taxi_speed = {}
; Vertical speed above which the aircraft is climbing
climb_rate = {}
; Vertical speed below which the aircraft is descending
descend_rate = {}
; Seconds of sustained climb, descent or level flight before a phase change
vertical_window_secs = {}
; Heading change (degrees) that always records a trail point
heading_change_deg = {}
; On a steady heading, record one trail point every N samples
sample_every_ticks = {}
; Take-off roll: ground speed and how long it must be held
takeoff_speed = {}
takeoff_window_secs = {}
; Height above ground at which the take-off ends and the climb begins
climb_out_agl = {}
; Seconds of weight-on-wheels before a landing is declared
touchdown_window_secs = {}
; End of the landing roll: ground speed and how long it must be held
taxi_in_speed = {}
taxi_in_window_secs = {}
; Seconds stationary after taxi-in before the aircraft is parked
parked_window_secs = {}

[poll]
; Seconds between telemetry samples in each phase (must be positive)
{}
[logging]
; Directory for log files
directory = {}
; Log file name
file = {}
"#,
        engine.taxi_speed,
        engine.climb_rate,
        engine.descend_rate,
        engine.vertical_window_secs,
        engine.heading_change_deg,
        engine.sample_every_ticks,
        engine.takeoff_speed,
        engine.takeoff_window_secs,
        engine.climb_out_agl,
        engine.touchdown_window_secs,
        engine.taxi_in_speed,
        engine.taxi_in_window_secs,
        engine.parked_window_secs,
        poll,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Format a path for the config file, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
