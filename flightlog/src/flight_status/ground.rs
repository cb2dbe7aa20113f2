//! Ground phase handlers: Unknown, Parked, TaxiOut, Landing, TaxiIn.

use tracing::info;

use super::departure::{capture_arrival_info, capture_departure_info};
use super::engine::{PhaseEngine, Tick};
use super::phase::FlightPhase;
use crate::config::window_ticks;
use crate::telemetry::{params, TelemetryAccessor, TelemetryError};

impl<A: TelemetryAccessor> PhaseEngine<A> {
    /// Classify an engine attached to a session of unknown state.
    pub(super) fn handle_unknown(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        let on_ground = tick.snapshot.bool(params::ON_GROUND)?;
        let ground_speed = tick.point.ground_speed;

        let phase = if !on_ground {
            FlightPhase::Cruise
        } else if ground_speed > self.config.taxi_speed {
            self.start_flight(tick);
            FlightPhase::TaxiOut
        } else {
            FlightPhase::Parked
        };

        info!(phase = %phase, on_ground, ground_speed, "Classified initial flight phase");
        self.change_state(phase);
        Ok(())
    }

    pub(super) fn handle_parked(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        if tick.point.ground_speed <= self.config.taxi_speed {
            return Ok(());
        }

        let airport_id = self.start_flight(tick);
        self.transition(
            tick,
            FlightPhase::TaxiOut,
            format!("Taxi out at {}", airport_id),
        );
        Ok(())
    }

    pub(super) fn handle_taxi_out(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        let rolling = tick.point.ground_speed > self.config.takeoff_speed;
        if self.sustained(rolling, self.config.takeoff_window_secs) {
            self.transition(tick, FlightPhase::TakeOff, "Take off".to_string());
            return Ok(());
        }

        self.sample_trail(tick);
        Ok(())
    }

    pub(super) fn handle_landing(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        let on_ground = tick.snapshot.bool(params::ON_GROUND)?;
        let slowed = on_ground && tick.point.ground_speed < self.config.taxi_in_speed;

        if self.sustained(slowed, self.config.taxi_in_window_secs) {
            let arrival =
                capture_arrival_info(&self.accessor, tick.point.position(), tick.timestamp());
            info!(
                airport = %arrival.airport_id,
                name = %arrival.airport_name,
                "Captured arrival info"
            );
            let name = format!("Taxi in at {}", arrival.airport_id);
            self.status.set_arrival(arrival);
            self.transition(tick, FlightPhase::TaxiIn, name);
            return Ok(());
        }

        self.sample_trail(tick);
        Ok(())
    }

    pub(super) fn handle_taxi_in(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        let stopped = tick.point.ground_speed <= self.config.taxi_speed;
        if self.sustained(stopped, self.config.parked_window_secs) {
            self.transition(tick, FlightPhase::Parked, "Parked".to_string());
            return Ok(());
        }

        self.sample_trail(tick);
        Ok(())
    }

    /// Capture departure info for a new flight, returning the airport id.
    fn start_flight(&mut self, tick: &Tick<'_>) -> String {
        let departure =
            capture_departure_info(&self.accessor, tick.point.position(), tick.timestamp());
        info!(
            airport = %departure.airport_id,
            name = %departure.airport_name,
            aircraft = %departure.aircraft_icao,
            fuel_weight = ?departure.fuel_weight,
            "Captured departure info"
        );
        let airport_id = departure.airport_id.clone();
        self.status.begin_flight(departure);
        airport_id
    }

    /// Advance the phase-window counter and report whether `condition` has
    /// held for `window_secs` at the current poll delay.
    pub(super) fn sustained(&mut self, condition: bool, window_secs: f64) -> bool {
        let needed = window_ticks(window_secs, self.status.poll_frequency());
        let counters = self.status.counters_mut();
        if condition {
            counters.phase = counters.phase.saturating_add(1);
        } else {
            counters.phase = 0;
        }
        counters.phase >= needed
    }
}
