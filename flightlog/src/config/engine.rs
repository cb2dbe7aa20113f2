//! Phase engine thresholds and poll delays.

use super::defaults::*;
use crate::flight_status::FlightPhase;

/// Errors raised when an [`EngineConfig`] is not usable.
///
/// Hysteresis windows are converted to tick counts by dividing by the poll
/// delay, so zero or negative delays must be rejected before the engine
/// ever runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A poll delay is zero, negative or not a number.
    #[error("Poll delay for {phase} must be a positive number of seconds, got {value}")]
    InvalidPollDelay { phase: FlightPhase, value: f64 },

    /// A hysteresis window is zero, negative or not a number.
    #[error("Window '{name}' must be a positive number of seconds, got {value}")]
    InvalidWindow { name: &'static str, value: f64 },

    /// A threshold is out of range.
    #[error("Threshold '{name}' is invalid: {reason}")]
    InvalidThreshold { name: &'static str, reason: String },
}

/// Seconds between ticks for each phase.
///
/// Dynamic phases poll fast so transitions are detected promptly;
/// parked and cruise poll slowly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollSettings {
    pub parked: f64,
    pub taxi_out: f64,
    pub takeoff: f64,
    pub climb: f64,
    pub cruise: f64,
    pub descend: f64,
    pub landing: f64,
    pub taxi_in: f64,
}

impl PollSettings {
    /// Poll delay for `phase`. Unclassified phases use the parked delay.
    pub fn for_phase(&self, phase: FlightPhase) -> f64 {
        match phase {
            FlightPhase::Unknown | FlightPhase::Parked => self.parked,
            FlightPhase::TaxiOut => self.taxi_out,
            FlightPhase::TakeOff => self.takeoff,
            FlightPhase::Climb => self.climb,
            FlightPhase::Cruise => self.cruise,
            FlightPhase::Descend => self.descend,
            FlightPhase::Landing => self.landing,
            FlightPhase::TaxiIn => self.taxi_in,
        }
    }

    /// Set the poll delay for `phase`.
    pub fn set(&mut self, phase: FlightPhase, seconds: f64) {
        let slot = match phase {
            FlightPhase::Unknown | FlightPhase::Parked => &mut self.parked,
            FlightPhase::TaxiOut => &mut self.taxi_out,
            FlightPhase::TakeOff => &mut self.takeoff,
            FlightPhase::Climb => &mut self.climb,
            FlightPhase::Cruise => &mut self.cruise,
            FlightPhase::Descend => &mut self.descend,
            FlightPhase::Landing => &mut self.landing,
            FlightPhase::TaxiIn => &mut self.taxi_in,
        };
        *slot = seconds;
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            parked: DEFAULT_POLL_PARKED,
            taxi_out: DEFAULT_POLL_TAXI_OUT,
            takeoff: DEFAULT_POLL_TAKEOFF,
            climb: DEFAULT_POLL_CLIMB,
            cruise: DEFAULT_POLL_CRUISE,
            descend: DEFAULT_POLL_DESCEND,
            landing: DEFAULT_POLL_LANDING,
            taxi_in: DEFAULT_POLL_TAXI_IN,
        }
    }
}

/// Configuration for the flight phase engine.
///
/// Speeds, rates and heights are compared against telemetry as-is, so they
/// must be expressed in the same units the telemetry provider reports.
///
/// # Example
///
/// ```
/// use flightlog::config::EngineConfig;
/// use flightlog::flight_status::FlightPhase;
///
/// let mut config = EngineConfig::default();
/// assert_eq!(config.poll.for_phase(FlightPhase::Climb), 0.2);
///
/// config.poll.set(FlightPhase::Cruise, 0.0);
/// assert!(config.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Ground speed above which a parked aircraft is taxiing.
    pub taxi_speed: f64,
    /// Vertical speed above which the aircraft is climbing.
    pub climb_rate: f64,
    /// Vertical speed below which the aircraft is descending.
    pub descend_rate: f64,
    /// Seconds of sustained climb, descent or level flight before a transition.
    pub vertical_window_secs: f64,
    /// Heading change (degrees) that forces a trail point.
    pub heading_change_deg: f64,
    /// Sampling ticks between trail points on a steady heading.
    pub sample_every_ticks: u32,
    /// Ground speed marking the take-off roll.
    pub takeoff_speed: f64,
    /// Seconds above take-off speed before entering TakeOff.
    pub takeoff_window_secs: f64,
    /// Height above ground at which the take-off is complete.
    pub climb_out_agl: f64,
    /// Seconds of weight-on-wheels before a landing is declared.
    pub touchdown_window_secs: f64,
    /// Ground speed below which the landing roll is over.
    pub taxi_in_speed: f64,
    /// Seconds below taxi-in speed before entering TaxiIn.
    pub taxi_in_window_secs: f64,
    /// Seconds stationary before the aircraft is parked.
    pub parked_window_secs: f64,
    /// Per-phase poll delays.
    pub poll: PollSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            taxi_speed: DEFAULT_TAXI_SPEED,
            climb_rate: DEFAULT_CLIMB_RATE,
            descend_rate: DEFAULT_DESCEND_RATE,
            vertical_window_secs: DEFAULT_VERTICAL_WINDOW_SECS,
            heading_change_deg: DEFAULT_HEADING_CHANGE_DEG,
            sample_every_ticks: DEFAULT_SAMPLE_EVERY_TICKS,
            takeoff_speed: DEFAULT_TAKEOFF_SPEED,
            takeoff_window_secs: DEFAULT_TAKEOFF_WINDOW_SECS,
            climb_out_agl: DEFAULT_CLIMB_OUT_AGL,
            touchdown_window_secs: DEFAULT_TOUCHDOWN_WINDOW_SECS,
            taxi_in_speed: DEFAULT_TAXI_IN_SPEED,
            taxi_in_window_secs: DEFAULT_TAXI_IN_WINDOW_SECS,
            parked_window_secs: DEFAULT_PARKED_WINDOW_SECS,
            poll: PollSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Check that the configuration can drive the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for phase in FlightPhase::ALL {
            let value = self.poll.for_phase(phase);
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidPollDelay { phase, value });
            }
        }

        let windows = [
            ("vertical_window_secs", self.vertical_window_secs),
            ("takeoff_window_secs", self.takeoff_window_secs),
            ("touchdown_window_secs", self.touchdown_window_secs),
            ("taxi_in_window_secs", self.taxi_in_window_secs),
            ("parked_window_secs", self.parked_window_secs),
        ];
        for (name, value) in windows {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidWindow { name, value });
            }
        }

        if self.climb_rate <= self.descend_rate {
            return Err(ConfigError::InvalidThreshold {
                name: "climb_rate",
                reason: format!(
                    "climb rate {} must be above descend rate {}",
                    self.climb_rate, self.descend_rate
                ),
            });
        }
        if self.sample_every_ticks == 0 {
            return Err(ConfigError::InvalidThreshold {
                name: "sample_every_ticks",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..180.0).contains(&self.heading_change_deg) {
            return Err(ConfigError::InvalidThreshold {
                name: "heading_change_deg",
                reason: format!("{} is outside 0-180 degrees", self.heading_change_deg),
            });
        }
        if self.taxi_in_speed <= self.taxi_speed {
            return Err(ConfigError::InvalidThreshold {
                name: "taxi_in_speed",
                reason: format!(
                    "taxi-in speed {} must be above taxi speed {}",
                    self.taxi_in_speed, self.taxi_speed
                ),
            });
        }

        Ok(())
    }
}

/// Number of ticks at `poll_frequency` needed to cover `window_secs`.
///
/// Truncates like an integer conversion, with a small epsilon so that
/// `30 / 0.2` yields 150 rather than 149. Never returns zero.
pub fn window_ticks(window_secs: f64, poll_frequency: f64) -> u32 {
    let ticks = (window_secs / poll_frequency + 1e-9).floor();
    (ticks as u32).max(1)
}
