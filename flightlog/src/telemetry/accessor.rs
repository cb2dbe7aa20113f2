//! Named-parameter accessor collaborator.
//!
//! The accessor sits between the engine and the simulator for values that
//! are not part of the per-tick snapshot. Implementations must never panic;
//! every failure is reported as an [`AccessorError`] and the engine degrades
//! to placeholder values.

use crate::geo::GeoPoint;

use super::snapshot::TelemetrySnapshot;
use super::value::TelemetryValue;

/// Errors returned by a [`TelemetryAccessor`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessorError {
    /// The backing data source is not available (plugin not ready, no database).
    #[error("Telemetry source unavailable: {0}")]
    Unavailable(String),

    /// The requested parameter or airport does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The parameter exists but does not have the requested type.
    #[error("Parameter '{name}' is not a {expected}")]
    WrongType { name: String, expected: &'static str },
}

/// Airport identity returned by a nearest-airport lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestAirport {
    /// ICAO or local identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl NearestAirport {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Access to simulator values outside the per-tick snapshot.
pub trait TelemetryAccessor {
    /// Resolve the airport closest to `position`.
    fn nearest_airport(&self, position: GeoPoint) -> Result<NearestAirport, AccessorError>;

    /// Read a named parameter.
    ///
    /// * `name` - dataref path
    /// * `label` - short label used for logging and as a fallback key
    /// * `precision` - decimal places to round numeric values to
    /// * `is_string` - the parameter is a byte array to be returned as a string
    fn value_by_name(
        &self,
        name: &str,
        label: &str,
        precision: Option<u8>,
        is_string: bool,
    ) -> Result<TelemetryValue, AccessorError>;

    /// Called at the start of every tick with the snapshot being processed.
    ///
    /// Live accessors read the simulator directly and ignore this.
    fn observe(&mut self, _snapshot: &TelemetrySnapshot) {}
}

impl<T: TelemetryAccessor + ?Sized> TelemetryAccessor for Box<T> {
    fn nearest_airport(&self, position: GeoPoint) -> Result<NearestAirport, AccessorError> {
        (**self).nearest_airport(position)
    }

    fn value_by_name(
        &self,
        name: &str,
        label: &str,
        precision: Option<u8>,
        is_string: bool,
    ) -> Result<TelemetryValue, AccessorError> {
        (**self).value_by_name(name, label, precision, is_string)
    }

    fn observe(&mut self, snapshot: &TelemetrySnapshot) {
        (**self).observe(snapshot)
    }
}

/// Round `value` to `precision` decimal places.
pub fn round_to_precision(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_one_decimal() {
        assert_eq!(round_to_precision(1234.5678, 1), 1234.6);
        assert_eq!(round_to_precision(1234.44, 1), 1234.4);
        assert_eq!(round_to_precision(-3.25, 0), -3.0);
    }
}
