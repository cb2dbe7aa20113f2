//! Flight status aggregate.

use serde::Serialize;

use super::event::{EventId, EventKind, FlightEvent};
use super::location::{LocationPoint, LocationTrail, SamplePolicy};
use super::phase::FlightPhase;

/// Departure record frozen when the aircraft starts to taxi.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureInfo {
    pub airport_id: String,
    pub airport_name: String,
    /// Simulator time of the taxi-out tick.
    pub timestamp: f64,
    /// Fuel weight, rounded to one decimal. `None` if it could not be read.
    pub fuel_weight: Option<f64>,
    /// Total weight, rounded to one decimal. `None` if it could not be read.
    pub total_weight: Option<f64>,
    pub aircraft_icao: String,
    pub aircraft_name: String,
}

/// Arrival record captured when the landing roll ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrivalInfo {
    pub airport_id: String,
    pub airport_name: String,
    pub timestamp: f64,
}

/// Consecutive-tick counters for hysteresis.
///
/// `climb` and `descend` follow the vertical speed rules. `level` counts
/// ticks inside the vertical dead zone. `phase` is the window counter of
/// whichever single-signal transition the current phase is waiting for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct HysteresisCounters {
    pub climb: u32,
    pub descend: u32,
    pub level: u32,
    pub phase: u32,
    pub liftoff_recorded: bool,
}

/// Running log of a flight: phase, events, trail and departure/arrival.
///
/// Owned and mutated exclusively by the [`PhaseEngine`](super::PhaseEngine).
/// Readers get shared references or clones between ticks.
#[derive(Debug, Clone, Serialize)]
pub struct FlightStatus {
    phase: FlightPhase,
    /// Seconds between ticks in the current phase.
    poll_frequency: f64,
    events: Vec<FlightEvent>,
    locations: LocationTrail,
    departure: Option<DepartureInfo>,
    arrival: Option<ArrivalInfo>,
    #[serde(skip)]
    counters: HysteresisCounters,
    #[serde(skip)]
    last_tick: Option<f64>,
}

impl FlightStatus {
    pub(crate) fn new(phase: FlightPhase, poll_frequency: f64) -> Self {
        Self {
            phase,
            poll_frequency,
            events: Vec::new(),
            locations: LocationTrail::new(),
            departure: None,
            arrival: None,
            counters: HysteresisCounters::default(),
            last_tick: None,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn poll_frequency(&self) -> f64 {
        self.poll_frequency
    }

    /// Event log in emission order.
    pub fn events(&self) -> &[FlightEvent] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&FlightEvent> {
        self.events.get(id.0)
    }

    pub fn last_event(&self) -> Option<&FlightEvent> {
        self.events.last()
    }

    pub fn locations(&self) -> &LocationTrail {
        &self.locations
    }

    /// Position recorded for an event, if one was recorded.
    pub fn location_of(&self, id: EventId) -> Option<&LocationPoint> {
        self.locations.iter().find(|p| p.event == Some(id))
    }

    /// Departure of the current (or most recent) flight.
    pub fn departure(&self) -> Option<&DepartureInfo> {
        self.departure.as_ref()
    }

    /// Arrival of the current flight, once the landing roll has ended.
    pub fn arrival(&self) -> Option<&ArrivalInfo> {
        self.arrival.as_ref()
    }

    pub fn climb_counter(&self) -> u32 {
        self.counters.climb
    }

    pub fn descend_counter(&self) -> u32 {
        self.counters.descend
    }

    /// Simulator time of the last processed tick.
    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    // Mutators, engine only.

    pub(crate) fn counters_mut(&mut self) -> &mut HysteresisCounters {
        &mut self.counters
    }

    pub(crate) fn set_phase(&mut self, phase: FlightPhase, poll_frequency: f64) {
        self.phase = phase;
        self.poll_frequency = poll_frequency;
        self.counters = HysteresisCounters::default();
    }

    pub(crate) fn set_last_tick(&mut self, timestamp: f64) {
        self.last_tick = Some(timestamp);
    }

    pub(crate) fn push_event(&mut self, name: String, kind: EventKind) -> EventId {
        let id = EventId(self.events.len());
        self.events.push(FlightEvent {
            name,
            kind,
            timestamp: self.last_tick.unwrap_or_default(),
            phase: self.phase,
        });
        id
    }

    pub(crate) fn record_location(&mut self, point: LocationPoint, policy: SamplePolicy) -> bool {
        self.locations.record(point, policy)
    }

    /// Attach `event` to the most recent trail point if it has none yet.
    pub(crate) fn pin_event_to_last_location(&mut self, event: EventId) -> bool {
        self.locations.pin_last(event)
    }

    /// Start a new flight: freeze its departure and forget the previous arrival.
    pub(crate) fn begin_flight(&mut self, departure: DepartureInfo) {
        self.departure = Some(departure);
        self.arrival = None;
    }

    pub(crate) fn set_arrival(&mut self, arrival: ArrivalInfo) {
        self.arrival = Some(arrival);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_stamped_with_tick_and_phase() {
        let mut status = FlightStatus::new(FlightPhase::Cruise, 1.0);
        status.set_last_tick(120.0);
        let id = status.push_event("Climb".to_string(), EventKind::State);

        let event = status.event(id).unwrap();
        assert_eq!(event.timestamp, 120.0);
        assert_eq!(event.phase, FlightPhase::Cruise);
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_set_phase_resets_counters() {
        let mut status = FlightStatus::new(FlightPhase::Cruise, 1.0);
        status.counters_mut().climb = 12;
        status.counters_mut().liftoff_recorded = true;
        status.set_phase(FlightPhase::Climb, 0.2);

        assert_eq!(status.climb_counter(), 0);
        assert_eq!(status.poll_frequency(), 0.2);
        assert!(!status.counters_mut().liftoff_recorded);
    }

    #[test]
    fn test_serialized_shape() {
        let status = FlightStatus::new(FlightPhase::Parked, 1.0);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["phase"], "parked");
        assert!(json["events"].is_array());
        assert!(json["locations"].is_array());
        assert!(json.get("counters").is_none());
    }
}
