//! Airborne phase handlers: TakeOff and the Climb/Cruise/Descend cycle.

use tracing::trace;

use super::engine::{PhaseEngine, Tick};
use super::phase::FlightPhase;
use crate::config::window_ticks;
use crate::telemetry::{params, TelemetryAccessor, TelemetryError};

impl<A: TelemetryAccessor> PhaseEngine<A> {
    pub(super) fn handle_takeoff(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        let on_ground = tick.snapshot.bool(params::ON_GROUND)?;
        let agl = tick.snapshot.float(params::AGL)?;

        let lifted_off = !on_ground && !self.status.counters_mut().liftoff_recorded;
        if lifted_off {
            self.status.counters_mut().liftoff_recorded = true;
            self.milestone(tick, "Liftoff");
        }

        // One event per tick: a window reached on the liftoff tick still
        // holds on the next one.
        let climbing_out = !on_ground && agl > self.config.climb_out_agl;
        if self.sustained(climbing_out, self.config.takeoff_window_secs) && !lifted_off {
            self.transition(tick, FlightPhase::Climb, "Climb".to_string());
            return Ok(());
        }

        if !lifted_off {
            self.sample_trail(tick);
        }
        Ok(())
    }

    /// Shared handler for Climb, Cruise and Descend.
    ///
    /// Touchdown is checked first, then the vertical-speed windows. A phase
    /// never re-enters itself.
    pub(super) fn handle_in_flight(&mut self, tick: &Tick<'_>) -> Result<(), TelemetryError> {
        let on_ground = tick.snapshot.optional_bool(params::ON_GROUND)?.unwrap_or(false);
        let vertical_speed = tick.point.vertical_speed;
        let current = self.status.phase();

        if self.sustained(on_ground, self.config.touchdown_window_secs) {
            self.transition(tick, FlightPhase::Landing, "Landing".to_string());
            return Ok(());
        }

        let needed = window_ticks(
            self.config.vertical_window_secs,
            self.status.poll_frequency(),
        );
        let climb_rate = self.config.climb_rate;
        let descend_rate = self.config.descend_rate;

        let counters = self.status.counters_mut();
        if vertical_speed > climb_rate {
            counters.climb = counters.climb.saturating_add(1);
        } else {
            counters.climb = 0;
        }
        if vertical_speed < descend_rate {
            counters.descend = counters.descend.saturating_add(1);
        } else {
            counters.descend = 0;
        }
        if vertical_speed >= descend_rate && vertical_speed <= climb_rate {
            counters.level = counters.level.saturating_add(1);
        } else {
            counters.level = 0;
        }
        let (climb, descend, level) = (counters.climb, counters.descend, counters.level);

        trace!(
            phase = %current,
            vertical_speed,
            climb,
            descend,
            level,
            needed,
            "Vertical hysteresis"
        );

        if current != FlightPhase::Climb && climb >= needed {
            self.transition(tick, FlightPhase::Climb, "Climb".to_string());
        } else if current != FlightPhase::Descend && descend >= needed {
            self.transition(tick, FlightPhase::Descend, "Descend".to_string());
        } else if current != FlightPhase::Cruise && level >= needed {
            self.transition(tick, FlightPhase::Cruise, "Cruise".to_string());
        } else {
            self.sample_trail(tick);
        }
        Ok(())
    }
}
