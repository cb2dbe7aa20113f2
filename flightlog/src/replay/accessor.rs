//! Accessor backed by the snapshot being replayed.

use tracing::trace;

use crate::airport::AirportIndex;
use crate::geo::GeoPoint;
use crate::telemetry::{
    round_to_precision, AccessorError, NearestAirport, TelemetryAccessor, TelemetrySnapshot,
    TelemetryValue,
};

/// Answers named lookups from the most recent replayed snapshot.
///
/// A parameter is looked up by its dataref name first, then by its short
/// label, so recordings may use either.
#[derive(Debug, Default)]
pub struct ReplayAccessor {
    current: Option<TelemetrySnapshot>,
    airports: Option<AirportIndex>,
}

impl ReplayAccessor {
    /// Accessor without an airport database; airport lookups fail.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_airports(airports: AirportIndex) -> Self {
        Self {
            current: None,
            airports: Some(airports),
        }
    }

    pub fn airports(&self) -> Option<&AirportIndex> {
        self.airports.as_ref()
    }

    fn lookup(&self, name: &str, label: &str) -> Option<&TelemetryValue> {
        let snapshot = self.current.as_ref()?;
        snapshot.get(name).or_else(|| snapshot.get(label))
    }
}

impl TelemetryAccessor for ReplayAccessor {
    fn nearest_airport(&self, position: GeoPoint) -> Result<NearestAirport, AccessorError> {
        let index = self
            .airports
            .as_ref()
            .ok_or_else(|| AccessorError::Unavailable("no airport database loaded".to_string()))?;

        let (airport, distance_nm) = index
            .nearest(position)
            .ok_or_else(|| AccessorError::NotFound("airport database is empty".to_string()))?;

        trace!(airport = %airport.id, distance_nm, "Resolved nearest airport");
        Ok(NearestAirport::new(&airport.id, &airport.name))
    }

    fn value_by_name(
        &self,
        name: &str,
        label: &str,
        precision: Option<u8>,
        is_string: bool,
    ) -> Result<TelemetryValue, AccessorError> {
        let value = self
            .lookup(name, label)
            .ok_or_else(|| AccessorError::NotFound(name.to_string()))?;

        if is_string {
            return match value {
                TelemetryValue::Str(s) => Ok(TelemetryValue::Str(s.clone())),
                _ => Err(AccessorError::WrongType {
                    name: name.to_string(),
                    expected: "string",
                }),
            };
        }

        match (value, precision) {
            (TelemetryValue::Str(_), _) => Err(AccessorError::WrongType {
                name: name.to_string(),
                expected: "number",
            }),
            (v, Some(places)) => v
                .as_f64()
                .map(|f| TelemetryValue::Float(round_to_precision(f, places)))
                .ok_or_else(|| AccessorError::WrongType {
                    name: name.to_string(),
                    expected: "number",
                }),
            (v, None) => Ok(v.clone()),
        }
    }

    fn observe(&mut self, snapshot: &TelemetrySnapshot) {
        self.current = Some(snapshot.clone());
    }
}
