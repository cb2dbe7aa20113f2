//! Typed telemetry scalar.

use serde::{Deserialize, Serialize};

/// A single telemetry value.
///
/// X-Plane exposes datarefs as floats, doubles, ints and byte arrays (strings).
/// Booleans are carried explicitly when the producer knows the flag semantics,
/// but integer and float flags are accepted wherever a bool is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl TelemetryValue {
    /// Numeric view of the value. Ints widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Integer view of the value. Floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Flag view of the value. Numbers are true when non-zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Int(v) => Some(*v != 0),
            Self::Float(v) => Some(*v != 0.0),
            Self::Str(_) => None,
        }
    }

    /// String view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }
}

impl std::fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for TelemetryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for TelemetryValue {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<i64> for TelemetryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TelemetryValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<bool> for TelemetryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for TelemetryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TelemetryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(TelemetryValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(TelemetryValue::Float(3.5).as_i64(), None);
    }

    #[test]
    fn test_numeric_flags() {
        assert_eq!(TelemetryValue::Int(1).as_bool(), Some(true));
        assert_eq!(TelemetryValue::Float(0.0).as_bool(), Some(false));
        assert_eq!(TelemetryValue::from("no").as_bool(), None);
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<TelemetryValue> =
            serde_json::from_str(r#"[true, 42, 1.5, "B738"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                TelemetryValue::Bool(true),
                TelemetryValue::Int(42),
                TelemetryValue::Float(1.5),
                TelemetryValue::Str("B738".to_string()),
            ]
        );
    }
}
