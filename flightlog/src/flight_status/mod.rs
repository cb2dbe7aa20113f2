//! Flight phase tracking and the running flight log.
//!
//! The [`PhaseEngine`] consumes telemetry snapshots one tick at a time,
//! advances the [`FlightPhase`] state machine and records into the
//! [`FlightStatus`] aggregate:
//!
//! - an append-only event log ([`FlightEvent`]),
//! - a location trail with adaptive sampling ([`LocationTrail`]),
//! - departure and arrival records captured at the phase boundaries.
//!
//! ```text
//! Parked ─▶ TaxiOut ─▶ TakeOff ─▶ Climb ◀─▶ Cruise ◀─▶ Descend
//!   ▲                                  └────────┬─────────┘
//!   │                                           ▼
//!   └────────────── TaxiIn ◀────────────── Landing
//! ```

mod airborne;
mod departure;
mod engine;
mod event;
mod ground;
mod location;
mod phase;
mod status;

pub use departure::{capture_arrival_info, capture_departure_info, UNKNOWN_AIRPORT_ID};
pub use engine::PhaseEngine;
pub use event::{EventId, EventKind, FlightEvent};
pub use location::{LocationPoint, LocationTrail, SamplePolicy};
pub use phase::{FlightPhase, ParsePhaseError};
pub use status::{ArrivalInfo, DepartureInfo, FlightStatus};
