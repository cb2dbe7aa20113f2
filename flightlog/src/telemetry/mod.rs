//! Simulator telemetry as seen by the flight phase engine.
//!
//! The engine consumes one [`TelemetrySnapshot`] per tick: a mapping from
//! parameter name to a typed scalar ([`TelemetryValue`]). Values that are only
//! needed occasionally (aircraft identity, weights) are fetched on demand
//! through a [`TelemetryAccessor`], which also resolves the nearest airport.
//!
//! # Parameter names
//!
//! Per-tick parameters use the short keys in [`params`] (`vs`, `gs`, `ts`, ...).
//! Named parameters fetched through the accessor use X-Plane dataref paths.
//!
//! # Example
//!
//! ```
//! use flightlog::telemetry::{params, TelemetrySnapshot, TelemetryValue};
//!
//! let snapshot = TelemetrySnapshot::new()
//!     .with(params::VERTICAL_SPEED, 650.0)
//!     .with(params::ON_GROUND, false);
//!
//! assert_eq!(snapshot.float(params::VERTICAL_SPEED).unwrap(), 650.0);
//! assert!(snapshot.float(params::GROUND_SPEED).is_err());
//! ```

mod accessor;
pub mod params;
mod snapshot;
mod source;
mod value;

pub use accessor::{round_to_precision, AccessorError, NearestAirport, TelemetryAccessor};
pub use snapshot::{TelemetryError, TelemetrySnapshot};
pub use source::SnapshotSource;
pub use value::TelemetryValue;
