//! Flight phase enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stage of a flight.
///
/// ```text
/// Parked → TaxiOut → TakeOff → Climb ⇄ Cruise ⇄ Descend → Landing → TaxiIn → Parked
///                                 ↖_____________↙
/// ```
///
/// Climb, Cruise and Descend may alternate; every other transition is
/// one-directional within a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    /// Not yet classified (engine resumed without a known phase).
    #[default]
    Unknown,
    Parked,
    TaxiOut,
    TakeOff,
    Climb,
    Cruise,
    Descend,
    Landing,
    TaxiIn,
}

impl FlightPhase {
    /// Every phase, in flight order.
    pub const ALL: [FlightPhase; 9] = [
        FlightPhase::Unknown,
        FlightPhase::Parked,
        FlightPhase::TaxiOut,
        FlightPhase::TakeOff,
        FlightPhase::Climb,
        FlightPhase::Cruise,
        FlightPhase::Descend,
        FlightPhase::Landing,
        FlightPhase::TaxiIn,
    ];

    /// Phases in which vertical speed drives climb/cruise/descend changes.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Climb | Self::Cruise | Self::Descend)
    }

    /// Phases in which the aircraft moves and the trail is sampled.
    pub fn is_moving(&self) -> bool {
        !matches!(self, Self::Unknown | Self::Parked)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Parked => "Parked",
            Self::TaxiOut => "Taxi out",
            Self::TakeOff => "Take off",
            Self::Climb => "Climb",
            Self::Cruise => "Cruise",
            Self::Descend => "Descend",
            Self::Landing => "Landing",
            Self::TaxiIn => "Taxi in",
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error parsing a [`FlightPhase`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown flight phase '{0}'")]
pub struct ParsePhaseError(String);

impl FromStr for FlightPhase {
    type Err = ParsePhaseError;

    /// Accepts `taxi_out`, `taxi-out`, `Taxi out` and `TaxiOut` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "unknown" => Ok(Self::Unknown),
            "parked" => Ok(Self::Parked),
            "taxiout" => Ok(Self::TaxiOut),
            "takeoff" => Ok(Self::TakeOff),
            "climb" => Ok(Self::Climb),
            "cruise" => Ok(Self::Cruise),
            "descend" | "descent" => Ok(Self::Descend),
            "landing" => Ok(Self::Landing),
            "taxiin" => Ok(Self::TaxiIn),
            _ => Err(ParsePhaseError(s.to_string())),
        }
    }
}
