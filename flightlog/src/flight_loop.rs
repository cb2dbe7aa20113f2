//! Async tick driver for the phase engine.
//!
//! The engine reports how long to wait before the next snapshot. The loop
//! honors that delay on the snapshot clock: snapshots stamped earlier than
//! the previous tick plus its delay are skipped, whatever the cadence of the
//! source. Real-time mode additionally sleeps the delay on the wall clock;
//! otherwise a recording is replayed as fast as possible. Between ticks the loop
//! publishes a [`FlightProgress`] summary on a `watch` channel, so readers
//! never observe the engine mid-tick.
//!
//! # Example
//!
//! ```ignore
//! let engine = PhaseEngine::new(config, ReplayAccessor::new())?;
//! let mut flight_loop = FlightLoop::new(engine, Recording::open("flight.jsonl")?)
//!     .realtime(true);
//! let mut progress = flight_loop.subscribe();
//!
//! let summary = flight_loop.run(CancellationToken::new()).await;
//! ```

use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, trace, warn};

use crate::flight_status::{FlightPhase, FlightStatus, PhaseEngine};
use crate::telemetry::{params, SnapshotSource, TelemetryAccessor};

/// Slack when comparing a snapshot timestamp with the due time, absorbing
/// floating point error in recorded timestamps.
const DUE_TOLERANCE_SECS: f64 = 1e-3;

/// Snapshot of engine state published after each tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightProgress {
    pub phase: FlightPhase,
    pub poll_frequency: f64,
    /// Snapshots processed so far.
    pub ticks: u64,
    pub events: usize,
    pub locations: usize,
    pub last_event: Option<String>,
}

impl FlightProgress {
    fn from_status(status: &FlightStatus, ticks: u64) -> Self {
        Self {
            phase: status.phase(),
            poll_frequency: status.poll_frequency(),
            ticks,
            events: status.events().len(),
            locations: status.locations().len(),
            last_event: status.last_event().map(|e| e.name.clone()),
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The snapshot source has no more snapshots.
    Exhausted,
    /// The cancellation token fired.
    Cancelled,
}

/// Totals for a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSummary {
    pub ticks: u64,
    /// Snapshots the source failed to produce.
    pub source_errors: u64,
    /// Snapshots dropped because the engine's poll delay had not elapsed.
    pub skipped: u64,
    pub stop: StopReason,
}

/// Drives a [`PhaseEngine`] from a [`SnapshotSource`].
pub struct FlightLoop<A, S> {
    engine: PhaseEngine<A>,
    source: S,
    realtime: bool,
    ticks: u64,
    progress_tx: watch::Sender<FlightProgress>,
}

impl<A, S> FlightLoop<A, S>
where
    A: TelemetryAccessor,
    S: SnapshotSource,
{
    pub fn new(engine: PhaseEngine<A>, source: S) -> Self {
        let (progress_tx, _) = watch::channel(FlightProgress::from_status(engine.status(), 0));
        Self {
            engine,
            source,
            realtime: false,
            ticks: 0,
            progress_tx,
        }
    }

    /// Sleep the engine's poll delay between ticks.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Receive a progress update after every tick.
    pub fn subscribe(&self) -> watch::Receiver<FlightProgress> {
        self.progress_tx.subscribe()
    }

    pub fn engine(&self) -> &PhaseEngine<A> {
        &self.engine
    }

    pub fn into_engine(self) -> PhaseEngine<A> {
        self.engine
    }

    /// Run until the source is exhausted or `cancellation` fires.
    pub async fn run(&mut self, cancellation: CancellationToken) -> LoopSummary {
        let mut source_errors = 0u64;
        let mut skipped = 0u64;
        let mut next_due: Option<f64> = None;
        info!(realtime = self.realtime, "Flight loop started");

        let stop = loop {
            if cancellation.is_cancelled() {
                break StopReason::Cancelled;
            }

            let snapshot = match self.source.next_snapshot() {
                None => break StopReason::Exhausted,
                Some(Ok(snapshot)) => snapshot,
                Some(Err(e)) => {
                    source_errors += 1;
                    warn!(error = %e, "Snapshot source error, skipping");
                    continue;
                }
            };

            // Snapshots without a usable timestamp still reach the engine,
            // which treats them as degraded ticks.
            let timestamp = snapshot.float(params::TIMESTAMP).ok();
            if let (Some(ts), Some(due)) = (timestamp, next_due) {
                if ts + DUE_TOLERANCE_SECS < due {
                    skipped += 1;
                    trace!(timestamp = ts, due, "Snapshot before poll delay elapsed, skipping");
                    continue;
                }
            }

            let delay = self.engine.process_snapshot(&snapshot);
            if let Some(ts) = timestamp {
                next_due = Some(ts + delay);
            }
            self.ticks += 1;
            self.publish();

            if self.realtime {
                tokio::select! {
                    biased;

                    _ = cancellation.cancelled() => break StopReason::Cancelled,
                    _ = tokio::time::sleep(Duration::from_secs_f64(delay)) => {}
                }
            }
        };

        let summary = LoopSummary {
            ticks: self.ticks,
            source_errors,
            skipped,
            stop,
        };
        info!(
            ticks = summary.ticks,
            source_errors = summary.source_errors,
            skipped = summary.skipped,
            stop = ?summary.stop,
            phase = %self.engine.phase(),
            "Flight loop stopped"
        );
        summary
    }

    fn publish(&self) {
        let progress = FlightProgress::from_status(self.engine.status(), self.ticks);
        self.progress_tx.send_if_modified(|current| {
            if *current == progress {
                false
            } else {
                *current = progress;
                true
            }
        });
    }
}
