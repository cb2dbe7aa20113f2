//! Departure and arrival capture.
//!
//! Both routines are point-in-time snapshots of collaborator data. Lookup
//! failures never abort the capture: they are logged and the affected
//! fields fall back to placeholders.

use tracing::warn;

use super::status::{ArrivalInfo, DepartureInfo};
use crate::geo::GeoPoint;
use crate::telemetry::{
    params, round_to_precision, NearestAirport, TelemetryAccessor, TelemetryValue,
};

/// Airport identifier used when the nearest airport cannot be resolved.
///
/// `ZZZZ` is the ICAO flight-plan designator for aerodromes without a code.
pub const UNKNOWN_AIRPORT_ID: &str = "ZZZZ";

/// Capture the departure record for a flight that starts to taxi.
pub fn capture_departure_info<A>(accessor: &A, position: GeoPoint, timestamp: f64) -> DepartureInfo
where
    A: TelemetryAccessor + ?Sized,
{
    let airport = resolve_airport(accessor, position);

    let fuel_weight = read_weight(accessor, params::FUEL_WEIGHT, "fuel_weight");
    let total_weight = read_weight(accessor, params::TOTAL_WEIGHT, "total_weight");

    let aircraft_icao = read_string(accessor, params::AIRCRAFT_ICAO, "icao");
    let aircraft_name = read_string(accessor, params::AIRCRAFT_NAME, "acf_ui_name");

    DepartureInfo {
        airport_id: airport.id,
        airport_name: airport.name,
        timestamp,
        fuel_weight,
        total_weight,
        aircraft_icao,
        aircraft_name,
    }
}

/// Capture the arrival record once the landing roll has ended.
pub fn capture_arrival_info<A>(accessor: &A, position: GeoPoint, timestamp: f64) -> ArrivalInfo
where
    A: TelemetryAccessor + ?Sized,
{
    let airport = resolve_airport(accessor, position);
    ArrivalInfo {
        airport_id: airport.id,
        airport_name: airport.name,
        timestamp,
    }
}

fn resolve_airport<A>(accessor: &A, position: GeoPoint) -> NearestAirport
where
    A: TelemetryAccessor + ?Sized,
{
    match accessor.nearest_airport(position) {
        Ok(airport) if !airport.id.trim().is_empty() => airport,
        Ok(airport) => {
            warn!(name = %airport.name, "Nearest airport has no identifier");
            NearestAirport::new(UNKNOWN_AIRPORT_ID, &airport.name)
        }
        Err(e) => {
            warn!(
                latitude = position.latitude,
                longitude = position.longitude,
                error = %e,
                "Nearest airport lookup failed"
            );
            NearestAirport::new(UNKNOWN_AIRPORT_ID, "")
        }
    }
}

fn read_weight<A>(accessor: &A, name: &str, label: &str) -> Option<f64>
where
    A: TelemetryAccessor + ?Sized,
{
    match accessor.value_by_name(name, label, Some(params::WEIGHT_PRECISION), false) {
        Ok(value) => match value.as_f64() {
            Some(v) if v.is_finite() => Some(round_to_precision(v, params::WEIGHT_PRECISION)),
            _ => {
                warn!(dataref = name, %value, "Weight is not a number");
                None
            }
        },
        Err(e) => {
            warn!(dataref = name, error = %e, "Failed to read weight");
            None
        }
    }
}

fn read_string<A>(accessor: &A, name: &str, label: &str) -> String
where
    A: TelemetryAccessor + ?Sized,
{
    match accessor.value_by_name(name, label, None, true) {
        Ok(TelemetryValue::Str(s)) => s.trim_end_matches('\0').trim().to_string(),
        Ok(other) => {
            warn!(dataref = name, value = %other, "Expected a string value");
            String::new()
        }
        Err(e) => {
            warn!(dataref = name, error = %e, "Failed to read aircraft metadata");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::AccessorError;
    use std::cell::Cell;
    use std::collections::HashMap;

    struct StubAccessor {
        airport: Result<NearestAirport, AccessorError>,
        values: HashMap<&'static str, TelemetryValue>,
        lookups: Cell<usize>,
    }

    impl StubAccessor {
        fn full() -> Self {
            let mut values = HashMap::new();
            values.insert(params::FUEL_WEIGHT, TelemetryValue::Float(5234.567));
            values.insert(params::TOTAL_WEIGHT, TelemetryValue::Float(61234.04));
            values.insert(params::AIRCRAFT_ICAO, TelemetryValue::from("B738\0\0"));
            values.insert(params::AIRCRAFT_NAME, TelemetryValue::from("Boeing 737-800"));
            Self {
                airport: Ok(NearestAirport::new("LFBO", "Toulouse-Blagnac")),
                values,
                lookups: Cell::new(0),
            }
        }
    }

    impl TelemetryAccessor for StubAccessor {
        fn nearest_airport(&self, _position: GeoPoint) -> Result<NearestAirport, AccessorError> {
            self.airport.clone()
        }

        fn value_by_name(
            &self,
            name: &str,
            _label: &str,
            _precision: Option<u8>,
            _is_string: bool,
        ) -> Result<TelemetryValue, AccessorError> {
            self.lookups.set(self.lookups.get() + 1);
            self.values
                .get(name)
                .cloned()
                .ok_or_else(|| AccessorError::NotFound(name.to_string()))
        }
    }

    #[test]
    fn test_full_capture() {
        let accessor = StubAccessor::full();
        let info = capture_departure_info(&accessor, GeoPoint::new(43.63, 1.37), 42.0);

        assert_eq!(info.airport_id, "LFBO");
        assert_eq!(info.airport_name, "Toulouse-Blagnac");
        assert_eq!(info.timestamp, 42.0);
        assert_eq!(info.fuel_weight, Some(5234.6));
        assert_eq!(info.total_weight, Some(61234.0));
        assert_eq!(info.aircraft_icao, "B738");
        assert_eq!(info.aircraft_name, "Boeing 737-800");
        assert_eq!(accessor.lookups.get(), 4);
    }

    #[test]
    fn test_airport_failure_degrades() {
        let mut accessor = StubAccessor::full();
        accessor.airport = Err(AccessorError::Unavailable("no navdata".to_string()));

        let info = capture_departure_info(&accessor, GeoPoint::new(0.0, 0.0), 1.0);
        assert_eq!(info.airport_id, UNKNOWN_AIRPORT_ID);
        assert!(info.airport_name.is_empty());
        assert_eq!(info.aircraft_icao, "B738");
    }

    #[test]
    fn test_metadata_failures_degrade() {
        let mut accessor = StubAccessor::full();
        accessor.values.clear();
        accessor
            .values
            .insert(params::FUEL_WEIGHT, TelemetryValue::from("heavy"));

        let info = capture_departure_info(&accessor, GeoPoint::new(0.0, 0.0), 1.0);
        assert_eq!(info.fuel_weight, None);
        assert_eq!(info.total_weight, None);
        assert!(info.aircraft_icao.is_empty());
        assert!(info.aircraft_name.is_empty());
    }

    #[test]
    fn test_blank_airport_id_replaced() {
        let mut accessor = StubAccessor::full();
        accessor.airport = Ok(NearestAirport::new("  ", "Farm strip"));

        let info = capture_arrival_info(&accessor, GeoPoint::new(0.0, 0.0), 9.0);
        assert_eq!(info.airport_id, UNKNOWN_AIRPORT_ID);
        assert_eq!(info.airport_name, "Farm strip");
        assert_eq!(info.timestamp, 9.0);
    }
}
