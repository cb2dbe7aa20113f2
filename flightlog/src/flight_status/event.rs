//! Flight event log entries.

use serde::Serialize;

use super::phase::FlightPhase;

/// Kind of a flight event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The flight phase changed.
    State,
    /// A notable moment within a phase (e.g. liftoff).
    Milestone,
}

/// Handle to an event in the log.
///
/// Handles are indices into an append-only log and stay valid for the
/// lifetime of the [`FlightStatus`](super::FlightStatus) that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(pub(super) usize);

impl EventId {
    /// Position of the event in the log.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A timestamped, phase-tagged record of a discrete occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightEvent {
    pub name: String,
    pub kind: EventKind,
    /// Simulator time of the tick that emitted the event.
    pub timestamp: f64,
    /// Phase active when the event was emitted. For state events this is
    /// the phase being left.
    pub phase: FlightPhase,
}
