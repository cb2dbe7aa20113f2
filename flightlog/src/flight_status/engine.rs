//! Phase engine - the per-tick state machine.
//!
//! # Tick contract
//!
//! [`PhaseEngine::process_snapshot`] consumes one snapshot and returns the
//! number of seconds until the next snapshot should be taken. Within a tick
//! the engine:
//!
//! 1. offers the snapshot to the accessor,
//! 2. reads the candidate trail point (timestamp, position, kinematics),
//! 3. ignores the tick if the timestamp does not advance (sim paused),
//! 4. seeds the trail on the first usable tick,
//! 5. dispatches to exactly one phase handler.
//!
//! A tick with missing or malformed telemetry is degraded: nothing advances
//! and the current poll delay is returned. Hysteresis counters count ticks,
//! so callers must honor the returned delay for the windows to mean seconds.

use tracing::{debug, info, trace};

use super::event::{EventId, EventKind};
use super::location::{LocationPoint, SamplePolicy};
use super::phase::FlightPhase;
use super::status::FlightStatus;
use crate::config::{ConfigError, EngineConfig};
use crate::geo::heading_delta;
use crate::telemetry::{TelemetryAccessor, TelemetryError, TelemetrySnapshot};

/// Data shared by the handlers for the tick being processed.
pub(super) struct Tick<'a> {
    pub snapshot: &'a TelemetrySnapshot,
    /// Candidate trail point built from the snapshot.
    pub point: LocationPoint,
    /// The trail was seeded with this tick's point.
    pub seeded: bool,
}

impl Tick<'_> {
    pub fn timestamp(&self) -> f64 {
        self.point.timestamp
    }
}

/// Flight phase engine.
///
/// Owns the [`FlightStatus`] and the telemetry accessor. Construct it once
/// and hand it to whatever drives the ticks.
///
/// # Example
///
/// ```
/// use flightlog::config::EngineConfig;
/// use flightlog::flight_status::{FlightPhase, PhaseEngine};
/// use flightlog::geo::GeoPoint;
/// use flightlog::telemetry::{
///     params, AccessorError, NearestAirport, TelemetryAccessor, TelemetrySnapshot, TelemetryValue,
/// };
///
/// struct Offline;
///
/// impl TelemetryAccessor for Offline {
///     fn nearest_airport(&self, _: GeoPoint) -> Result<NearestAirport, AccessorError> {
///         Ok(NearestAirport::new("LFBO", "Toulouse-Blagnac"))
///     }
///     fn value_by_name(&self, name: &str, _: &str, _: Option<u8>, _: bool)
///         -> Result<TelemetryValue, AccessorError> {
///         Err(AccessorError::NotFound(name.to_string()))
///     }
/// }
///
/// let mut engine = PhaseEngine::new(EngineConfig::default(), Offline).unwrap();
/// let snapshot = TelemetrySnapshot::new()
///     .with(params::TIMESTAMP, 1.0)
///     .with(params::LATITUDE, 43.63)
///     .with(params::LONGITUDE, 1.37)
///     .with(params::ELEVATION, 499.0)
///     .with(params::HEADING, 140.0)
///     .with(params::GROUND_SPEED, 0.0)
///     .with(params::VERTICAL_SPEED, 0.0);
///
/// let delay = engine.process_snapshot(&snapshot);
/// assert_eq!(delay, 1.0);
/// assert_eq!(engine.phase(), FlightPhase::Parked);
/// assert_eq!(engine.status().locations().len(), 1);
/// ```
pub struct PhaseEngine<A> {
    pub(super) config: EngineConfig,
    pub(super) accessor: A,
    pub(super) status: FlightStatus,
}

impl<A: TelemetryAccessor> PhaseEngine<A> {
    /// Create an engine for an aircraft that is parked.
    pub fn new(config: EngineConfig, accessor: A) -> Result<Self, ConfigError> {
        Self::with_initial_phase(config, accessor, FlightPhase::Parked)
    }

    /// Create an engine starting in `phase`.
    ///
    /// Use [`FlightPhase::Unknown`] when attaching to a simulator session of
    /// unknown state; the first tick then classifies the phase.
    pub fn with_initial_phase(
        config: EngineConfig,
        accessor: A,
        phase: FlightPhase,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let poll_frequency = config.poll.for_phase(phase);
        info!(phase = %phase, poll_frequency, "Flight phase engine created");
        Ok(Self {
            config,
            accessor,
            status: FlightStatus::new(phase, poll_frequency),
        })
    }

    pub fn status(&self) -> &FlightStatus {
        &self.status
    }

    pub fn phase(&self) -> FlightPhase {
        self.status.phase()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Consume the engine, keeping the flight log.
    pub fn into_status(self) -> FlightStatus {
        self.status
    }

    /// Process one telemetry snapshot.
    ///
    /// Returns the delay in seconds until the next snapshot.
    pub fn process_snapshot(&mut self, snapshot: &TelemetrySnapshot) -> f64 {
        self.accessor.observe(snapshot);

        if let Err(e) = self.run_tick(snapshot) {
            debug!(
                phase = %self.status.phase(),
                error = %e,
                "Degraded telemetry tick, phase logic skipped"
            );
        }

        self.status.poll_frequency()
    }

    fn run_tick(&mut self, snapshot: &TelemetrySnapshot) -> Result<(), TelemetryError> {
        let point = LocationPoint::from_snapshot(snapshot)?;

        if let Some(last) = self.status.last_tick() {
            if point.timestamp <= last {
                trace!(
                    timestamp = point.timestamp,
                    last,
                    "Timestamp did not advance, ignoring tick"
                );
                return Ok(());
            }
        }
        self.status.set_last_tick(point.timestamp);

        let seeded = self.status.locations().is_empty()
            && self
                .status
                .record_location(point.clone(), SamplePolicy::Always);
        if seeded {
            debug!(
                latitude = point.latitude,
                longitude = point.longitude,
                "Seeded location trail"
            );
        }

        let tick = Tick {
            snapshot,
            point,
            seeded,
        };

        match self.status.phase() {
            FlightPhase::Unknown => self.handle_unknown(&tick),
            FlightPhase::Parked => self.handle_parked(&tick),
            FlightPhase::TaxiOut => self.handle_taxi_out(&tick),
            FlightPhase::TakeOff => self.handle_takeoff(&tick),
            FlightPhase::Climb | FlightPhase::Cruise | FlightPhase::Descend => {
                self.handle_in_flight(&tick)
            }
            FlightPhase::Landing => self.handle_landing(&tick),
            FlightPhase::TaxiIn => self.handle_taxi_in(&tick),
        }
    }

    /// Enter `phase`, adopting its poll delay and resetting all counters.
    pub(super) fn change_state(&mut self, phase: FlightPhase) {
        let previous = self.status.phase();
        let poll_frequency = self.config.poll.for_phase(phase);
        self.status.set_phase(phase, poll_frequency);
        info!(
            from = %previous,
            to = %phase,
            poll_frequency,
            "Flight phase changed"
        );
    }

    /// Append an event stamped with the current tick and phase.
    pub(super) fn add_event(&mut self, name: impl Into<String>, kind: EventKind) -> EventId {
        let name = name.into();
        info!(event = %name, kind = ?kind, phase = %self.status.phase(), "Flight event");
        self.status.push_event(name, kind)
    }

    /// Offer this tick's point to the trail.
    ///
    /// On the seeding tick the point is already recorded, so an event is
    /// pinned to the seed instead of appending a duplicate.
    pub(super) fn add_location(
        &mut self,
        tick: &Tick<'_>,
        policy: SamplePolicy,
        event: Option<EventId>,
    ) -> bool {
        if tick.seeded {
            return event.is_some_and(|id| self.status.pin_event_to_last_location(id));
        }

        let point = tick.point.clone().with_event(event);
        self.status.record_location(point, policy)
    }

    /// Emit a state event, change phase and pin the event to a trail point.
    pub(super) fn transition(&mut self, tick: &Tick<'_>, phase: FlightPhase, name: String) {
        let event = self.add_event(name, EventKind::State);
        self.change_state(phase);
        self.add_location(tick, SamplePolicy::Always, Some(event));
    }

    /// Emit a milestone event within the current phase.
    pub(super) fn milestone(&mut self, tick: &Tick<'_>, name: &str) {
        let event = self.add_event(name, EventKind::Milestone);
        self.add_location(tick, SamplePolicy::Always, Some(event));
    }

    /// Adaptive trail sampling for ticks without a transition.
    ///
    /// Turns are densified: a heading change beyond the threshold always
    /// records. On a steady heading only every N-th sampling tick records.
    pub(super) fn sample_trail(&mut self, tick: &Tick<'_>) {
        if tick.seeded {
            return;
        }

        let policy = match self.status.locations().last() {
            // Wraps through north, unlike a plain absolute difference.
            Some(last)
                if heading_delta(last.heading, tick.point.heading)
                    > self.config.heading_change_deg =>
            {
                SamplePolicy::Always
            }
            Some(_) => SamplePolicy::EveryTicks(self.config.sample_every_ticks),
            None => SamplePolicy::Always,
        };

        if self.add_location(tick, policy, None) {
            trace!(
                heading = tick.point.heading,
                policy = ?policy,
                "Recorded trail point"
            );
        }
    }
}
