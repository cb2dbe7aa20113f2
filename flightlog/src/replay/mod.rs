//! Offline replay of recorded flights.
//!
//! A recording is a JSON-lines file, one snapshot per line:
//!
//! ```text
//! # LFBO to LFPG, A320
//! {"ts": 1.0, "lat": 43.6294, "lng": 1.3678, "elevation": 499.0, "heading": 143.0,
//!  "gs": 0.0, "vs": 0.0, "agl": 0.0, "on_ground": true,
//!  "sim/flightmodel/weight/m_fuel_total": 5200.0}
//! ```
//!
//! (shown wrapped; each snapshot is a single line). Blank lines and lines
//! starting with `#` are skipped.
//!
//! [`Recording`] yields the snapshots; [`ReplayAccessor`] answers named
//! parameter lookups from the snapshot being replayed and resolves airports
//! from an optional [`AirportIndex`](crate::airport::AirportIndex).

mod accessor;
mod recording;

pub use accessor::ReplayAccessor;
pub use recording::{Recording, RecordingError};
