//! Snapshot producers.

use std::convert::Infallible;

use super::snapshot::TelemetrySnapshot;

/// A producer of telemetry snapshots, one per tick.
///
/// `None` means the source is exhausted. Errors are per-item: a source may
/// yield further snapshots after reporting one.
pub trait SnapshotSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn next_snapshot(&mut self) -> Option<Result<TelemetrySnapshot, Self::Error>>;
}

impl SnapshotSource for std::vec::IntoIter<TelemetrySnapshot> {
    type Error = Infallible;

    fn next_snapshot(&mut self) -> Option<Result<TelemetrySnapshot, Self::Error>> {
        self.next().map(Ok)
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    type Error = S::Error;

    fn next_snapshot(&mut self) -> Option<Result<TelemetrySnapshot, Self::Error>> {
        (**self).next_snapshot()
    }
}
