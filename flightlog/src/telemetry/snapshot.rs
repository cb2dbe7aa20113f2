//! Per-tick telemetry snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value::TelemetryValue;

/// Error reading a parameter from a snapshot.
///
/// Both variants are recoverable: the engine treats the tick as degraded
/// and skips phase logic for it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TelemetryError {
    /// The parameter is not present in the snapshot.
    #[error("Telemetry parameter '{0}' is missing")]
    Missing(String),

    /// The parameter is present but has an unusable type or value.
    #[error("Telemetry parameter '{name}' has unexpected value {found} (expected {expected})")]
    WrongType {
        name: String,
        expected: &'static str,
        found: String,
    },
}

/// Mapping from parameter name to value for a single tick.
///
/// Produced fresh each tick by the telemetry provider and read-only to the
/// engine. Individual fields are copied out into events and trail points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelemetrySnapshot {
    values: HashMap<String, TelemetryValue>,
}

impl TelemetrySnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<TelemetryValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: &str, value: impl Into<TelemetryValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Remove a parameter, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<TelemetryValue> {
        self.values.remove(name)
    }

    /// Raw access to a parameter.
    pub fn get(&self, name: &str) -> Option<&TelemetryValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read a numeric parameter.
    ///
    /// NaN and infinite values are rejected; X-Plane reports them for
    /// uninitialised datarefs during aircraft loading.
    pub fn float(&self, name: &str) -> Result<f64, TelemetryError> {
        let value = self.require(name)?;
        match value.as_f64() {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(wrong_type(name, "finite number", value)),
        }
    }

    /// Read a flag parameter.
    pub fn bool(&self, name: &str) -> Result<bool, TelemetryError> {
        let value = self.require(name)?;
        value
            .as_bool()
            .ok_or_else(|| wrong_type(name, "bool", value))
    }

    /// Read a flag that the provider may omit.
    ///
    /// Absent is `Ok(None)`; present but unusable is still an error.
    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>, TelemetryError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(_) => self.bool(name).map(Some),
        }
    }

    /// Read a string parameter.
    pub fn string(&self, name: &str) -> Result<&str, TelemetryError> {
        let value = self.require(name)?;
        value
            .as_str()
            .ok_or_else(|| wrong_type(name, "string", value))
    }

    /// Iterate over all parameters in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TelemetryValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &str) -> Result<&TelemetryValue, TelemetryError> {
        self.values
            .get(name)
            .ok_or_else(|| TelemetryError::Missing(name.to_string()))
    }
}

impl<K: Into<String>> FromIterator<(K, TelemetryValue)> for TelemetrySnapshot {
    fn from_iter<I: IntoIterator<Item = (K, TelemetryValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn wrong_type(name: &str, expected: &'static str, found: &TelemetryValue) -> TelemetryError {
    TelemetryError::WrongType {
        name: name.to_string(),
        expected,
        found: format!("{} ({})", found, found.type_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter() {
        let snapshot = TelemetrySnapshot::new();
        assert_eq!(
            snapshot.float("vs"),
            Err(TelemetryError::Missing("vs".to_string()))
        );
    }

    #[test]
    fn test_wrong_type() {
        let snapshot = TelemetrySnapshot::new().with("vs", "fast");
        assert!(matches!(
            snapshot.float("vs"),
            Err(TelemetryError::WrongType { expected: "finite number", .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let snapshot = TelemetrySnapshot::new().with("gs", f64::NAN);
        assert!(snapshot.float("gs").is_err());
    }

    #[test]
    fn test_flag_from_int() {
        let snapshot = TelemetrySnapshot::new().with("on_ground", 1);
        assert_eq!(snapshot.bool("on_ground"), Ok(true));
    }

    #[test]
    fn test_optional_flag() {
        let snapshot = TelemetrySnapshot::new().with("on_ground", "maybe");
        assert_eq!(snapshot.optional_bool("parking_brake"), Ok(None));
        assert!(snapshot.optional_bool("on_ground").is_err());
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let snapshot: TelemetrySnapshot =
            serde_json::from_str(r#"{"ts": 12.5, "gs": 0, "on_ground": true}"#).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.float("ts"), Ok(12.5));
        assert_eq!(snapshot.float("gs"), Ok(0.0));
        assert_eq!(snapshot.bool("on_ground"), Ok(true));
    }
}
