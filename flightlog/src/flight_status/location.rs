//! Geo-referenced position trail.
//!
//! The trail is compressed on straight, steady segments and densified in
//! turns: a point is always recorded when the heading has changed enough
//! since the last point, otherwise only every N sampling ticks.

use serde::Serialize;

use super::event::EventId;
use crate::geo::GeoPoint;
use crate::telemetry::{params, TelemetryError, TelemetrySnapshot};

/// A recorded position and kinematic state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPoint {
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub heading: f64,
    pub ground_speed: f64,
    pub vertical_speed: f64,
    /// Event recorded at this position, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventId>,
}

impl LocationPoint {
    /// Build a candidate point from a snapshot.
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Result<Self, TelemetryError> {
        Ok(Self {
            timestamp: snapshot.float(params::TIMESTAMP)?,
            latitude: snapshot.float(params::LATITUDE)?,
            longitude: snapshot.float(params::LONGITUDE)?,
            altitude: snapshot.float(params::ELEVATION)?,
            heading: snapshot.float(params::HEADING)?,
            ground_speed: snapshot.float(params::GROUND_SPEED)?,
            vertical_speed: snapshot.float(params::VERTICAL_SPEED)?,
            event: None,
        })
    }

    /// Attach an event reference.
    pub fn with_event(mut self, event: Option<EventId>) -> Self {
        self.event = event;
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// When a candidate point should be appended to the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePolicy {
    /// Record unconditionally.
    Always,
    /// Record once this many sampling calls have accumulated since the last
    /// recorded point.
    EveryTicks(u32),
}

/// Ordered sequence of recorded positions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LocationTrail {
    points: Vec<LocationPoint>,
    #[serde(skip)]
    ticks_since_last: u32,
}

impl LocationTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate point to the trail.
    ///
    /// Returns true if the point was appended. Points whose timestamp does
    /// not advance past the last recorded point are never appended.
    pub fn record(&mut self, point: LocationPoint, policy: SamplePolicy) -> bool {
        if let Some(last) = self.points.last() {
            if point.timestamp <= last.timestamp {
                tracing::trace!(
                    timestamp = point.timestamp,
                    last = last.timestamp,
                    "Dropping trail point that does not advance in time"
                );
                return false;
            }
        }

        if let SamplePolicy::EveryTicks(threshold) = policy {
            self.ticks_since_last = self.ticks_since_last.saturating_add(1);
            if self.ticks_since_last < threshold {
                return false;
            }
        }

        self.points.push(point);
        self.ticks_since_last = 0;
        true
    }

    /// Attach `event` to the last point. Points keep their first event.
    pub fn pin_last(&mut self, event: EventId) -> bool {
        match self.points.last_mut() {
            Some(point) if point.event.is_none() => {
                point.event = Some(event);
                true
            }
            _ => false,
        }
    }

    /// Most recently recorded point.
    pub fn last(&self) -> Option<&LocationPoint> {
        self.points.last()
    }

    /// Sampling calls since the last recorded point.
    pub fn ticks_since_last(&self) -> u32 {
        self.ticks_since_last
    }

    pub fn points(&self) -> &[LocationPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total great-circle length of the trail in nautical miles.
    pub fn distance_nm(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].position().distance_nm(&pair[1].position()))
            .sum()
    }
}
