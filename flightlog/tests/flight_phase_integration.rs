//! Integration tests for the flight phase engine.
//!
//! These tests replay a complete scripted flight, Toulouse to Paris CDG,
//! through the public API:
//! - Recording file → FlightLoop → PhaseEngine → FlightStatus
//! - Departure and arrival airports resolved from an apt.dat file
//! - Flight log export as JSON
//!
//! Run with: `cargo test --test flight_phase_integration`

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use flightlog::airport::AirportIndex;
use flightlog::config::{ConfigFile, EngineConfig};
use flightlog::flight_loop::{FlightLoop, StopReason};
use flightlog::flight_status::{EventKind, FlightPhase, FlightStatus, PhaseEngine};
use flightlog::geo::GeoPoint;
use flightlog::replay::{Recording, ReplayAccessor};

// ============================================================================
// Test Helpers
// ============================================================================

const LFBO: GeoPoint = GeoPoint {
    latitude: 43.6294,
    longitude: 1.3678,
};

const LFPG: GeoPoint = GeoPoint {
    latitude: 49.0097,
    longitude: 2.5479,
};

const APT_DAT: &str = r#"
I
1100 Version

1 499 0 0 LFBO Toulouse-Blagnac
1302 datum_lat 43.6294
1302 datum_lon 1.3678

1 392 0 0 LFPG Paris Charles de Gaulle
1302 datum_lat 49.0097
1302 datum_lon 2.5479

99
"#;

/// Recorder cadence: ten snapshots per simulator second, faster than any
/// engine poll delay so the flight loop has to drop snapshots.
const CADENCE: f64 = 0.1;

/// Airborne seconds over which the script drifts from LFBO to LFPG.
const ROUTE_SECS: f64 = 160.0;

/// Builds a JSON-lines recording one snapshot at a time.
struct FlightScript {
    cadence: f64,
    samples: u64,
    position: GeoPoint,
    heading: f64,
    lines: Vec<String>,
}

impl FlightScript {
    fn new() -> Self {
        Self::with_cadence(CADENCE)
    }

    fn with_cadence(cadence: f64) -> Self {
        Self {
            cadence,
            samples: 0,
            position: LFBO,
            heading: 143.0,
            lines: vec!["# LFBO to LFPG".to_string()],
        }
    }

    /// Simulator time of the last snapshot.
    fn ts(&self) -> f64 {
        self.samples as f64 * self.cadence
    }

    /// Snapshots covering `secs`, with the elapsed segment time for each.
    fn offsets(&self, secs: f64) -> Vec<f64> {
        let count = (secs / self.cadence).round() as u64;
        (0..count).map(|i| i as f64 * self.cadence).collect()
    }

    fn ground(&mut self, secs: f64, gs: impl Fn(f64) -> f64) {
        for t in self.offsets(secs) {
            self.push(gs(t), 0.0, 0.0, true);
        }
    }

    fn air(&mut self, secs: f64, vs: f64, agl: impl Fn(f64) -> f64) {
        let step = self.cadence / ROUTE_SECS;
        for t in self.offsets(secs) {
            // Drift north-east towards Paris.
            self.position.latitude += (LFPG.latitude - LFBO.latitude) * step;
            self.position.longitude += (LFPG.longitude - LFBO.longitude) * step;
            self.push(250.0, vs, agl(t), false);
        }
    }

    fn push(&mut self, gs: f64, vs: f64, agl: f64, on_ground: bool) {
        self.samples += 1;
        let snapshot = json!({
            "ts": self.ts(),
            "lat": self.position.latitude,
            "lng": self.position.longitude,
            "elevation": 500.0 + agl,
            "heading": self.heading,
            "gs": gs,
            "vs": vs,
            "agl": agl,
            "on_ground": if on_ground { 1 } else { 0 },
            "sim/flightmodel/weight/m_fuel_total": 5234.56,
            "sim/flightmodel/weight/m_total": 64012.04,
            "sim/aircraft/view/acf_ICAO": "A320",
            "sim/aircraft/view/acf_ui_name": "Airbus A320neo",
        });
        self.lines.push(snapshot.to_string());
    }

    /// Toulouse gate to Paris gate.
    ///
    /// Segment start times: taxi 5 s, take-off roll 15 s, climb-out 19 s,
    /// level-off 67 s, top of descent 127 s, touchdown 177 s, gate 194 s.
    fn full_flight() -> Self {
        Self::full_flight_at(CADENCE)
    }

    fn full_flight_at(cadence: f64) -> Self {
        let mut script = Self::with_cadence(cadence);

        script.ground(5.0, |_| 0.0);
        script.ground(5.0, |_| 15.0);
        script.heading = 320.0;
        script.ground(5.0, |_| 15.0);
        script.ground(4.0, |_| 140.0);

        script.air(8.0, 2500.0, |t| 100.0 + 250.0 * t);
        script.air(40.0, 2000.0, |_| 8000.0);
        script.air(60.0, 0.0, |_| 30000.0);
        script.air(40.0, -1500.0, |_| 20000.0);
        script.air(10.0, -700.0, |_| 2000.0);

        script.position = GeoPoint::new(LFPG.latitude + 0.005, LFPG.longitude);
        script.ground(12.0, |t| (130.0 - 25.0 * t).max(10.0));
        script.ground(5.0, |_| 10.0);
        script.ground(12.0, |_| 0.0);

        script
    }

    fn write(&self, dir: &Path) -> PathBuf {
        let path = dir.join("flight.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in &self.lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }
}

fn airport_index(dir: &Path) -> AirportIndex {
    let path = dir.join("apt.dat");
    std::fs::write(&path, APT_DAT).unwrap();
    AirportIndex::from_apt_dat(&path).unwrap()
}

async fn replay(path: &Path, accessor: ReplayAccessor) -> FlightStatus {
    let engine = PhaseEngine::new(EngineConfig::default(), accessor).unwrap();
    let mut flight_loop = FlightLoop::new(engine, Recording::open(path).unwrap());
    let summary = flight_loop.run(CancellationToken::new()).await;

    assert_eq!(summary.stop, StopReason::Exhausted);
    assert_eq!(summary.source_errors, 0);
    flight_loop.into_engine().into_status()
}

fn event_names(status: &FlightStatus) -> Vec<&str> {
    status.events().iter().map(|e| e.name.as_str()).collect()
}

// ============================================================================
// Full Flight
// ============================================================================

#[tokio::test]
async fn test_full_flight_event_sequence() {
    let dir = TempDir::new().unwrap();
    let path = FlightScript::full_flight().write(dir.path());
    let accessor = ReplayAccessor::with_airports(airport_index(dir.path()));

    let status = replay(&path, accessor).await;

    assert_eq!(
        event_names(&status),
        vec![
            "Taxi out at LFBO",
            "Take off",
            "Liftoff",
            "Climb",
            "Cruise",
            "Descend",
            "Landing",
            "Taxi in at LFPG",
            "Parked",
        ]
    );
    assert_eq!(status.phase(), FlightPhase::Parked);
    assert_eq!(status.poll_frequency(), 1.0);

    let kinds: Vec<_> = status.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds[2], EventKind::Milestone);
    assert!(kinds
        .iter()
        .enumerate()
        .all(|(i, kind)| i == 2 || *kind == EventKind::State));
}

#[tokio::test]
async fn test_vertical_windows_span_thirty_seconds() {
    let dir = TempDir::new().unwrap();
    let path = FlightScript::full_flight().write(dir.path());

    let status = replay(&path, ReplayAccessor::new()).await;
    let at = |name: &str| {
        status
            .events()
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.timestamp)
            .unwrap()
    };

    // Level from 67 s while climbing at a 0.2 s poll.
    let cruise = at("Cruise");
    assert!((96.5..97.5).contains(&cruise), "got {}", cruise);

    // Descending from 127 s while cruising at a 1 s poll.
    let descend = at("Descend");
    assert!((156.5..157.5).contains(&descend), "got {}", descend);
}

#[tokio::test]
async fn test_recorder_cadence_does_not_change_flight() {
    let coarse_dir = TempDir::new().unwrap();
    let fine_dir = TempDir::new().unwrap();
    let coarse_path = FlightScript::full_flight_at(0.1).write(coarse_dir.path());
    let fine_path = FlightScript::full_flight_at(0.05).write(fine_dir.path());

    let coarse = replay(&coarse_path, ReplayAccessor::new()).await;
    let fine = replay(&fine_path, ReplayAccessor::new()).await;

    assert_eq!(event_names(&coarse), event_names(&fine));
    for (a, b) in coarse.events().iter().zip(fine.events()) {
        assert!(
            (a.timestamp - b.timestamp).abs() < 0.5,
            "'{}' at {} vs {}",
            a.name,
            a.timestamp,
            b.timestamp
        );
    }
}

#[tokio::test]
async fn test_full_flight_departure_and_arrival() {
    let dir = TempDir::new().unwrap();
    let path = FlightScript::full_flight().write(dir.path());
    let accessor = ReplayAccessor::with_airports(airport_index(dir.path()));

    let status = replay(&path, accessor).await;

    let departure = status.departure().unwrap();
    assert_eq!(departure.airport_id, "LFBO");
    assert_eq!(departure.airport_name, "Toulouse-Blagnac");
    assert_eq!(departure.fuel_weight, Some(5234.6));
    assert_eq!(departure.total_weight, Some(64012.0));
    assert_eq!(departure.aircraft_icao, "A320");
    assert_eq!(departure.aircraft_name, "Airbus A320neo");
    assert_eq!(departure.timestamp, status.events()[0].timestamp);

    let arrival = status.arrival().unwrap();
    assert_eq!(arrival.airport_id, "LFPG");
    assert_eq!(arrival.airport_name, "Paris Charles de Gaulle");
    assert!(arrival.timestamp > departure.timestamp);
}

#[tokio::test]
async fn test_full_flight_trail() {
    let dir = TempDir::new().unwrap();
    let path = FlightScript::full_flight().write(dir.path());

    let status = replay(&path, ReplayAccessor::new()).await;
    let trail = status.locations();

    assert!(trail
        .points()
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));

    // Every event is pinned to the point recorded on its tick.
    for (index, event) in status.events().iter().enumerate() {
        let point = trail
            .iter()
            .find(|p| p.event.map(|id| id.index()) == Some(index))
            .unwrap_or_else(|| panic!("no trail point for '{}'", event.name));
        assert_eq!(point.timestamp, event.timestamp);
    }

    // The taxi turn from 143 to 320 degrees is recorded.
    assert!(trail.iter().any(|p| p.heading == 320.0 && p.event.is_none()));

    let distance = trail.distance_nm();
    assert!(distance > 250.0 && distance < 400.0, "got {}", distance);
}

#[tokio::test]
async fn test_next_flight_recaptures_departure() {
    let dir = TempDir::new().unwrap();
    let mut script = FlightScript::full_flight();
    script.ground(2.0, |_| 12.0);
    let path = script.write(dir.path());

    let accessor = ReplayAccessor::with_airports(airport_index(dir.path()));
    let status = replay(&path, accessor).await;

    assert_eq!(status.phase(), FlightPhase::TaxiOut);
    assert_eq!(status.events().last().unwrap().name, "Taxi out at LFPG");
    assert_eq!(status.departure().unwrap().airport_id, "LFPG");
    assert!(status.arrival().is_none());
}

// ============================================================================
// Degraded Inputs
// ============================================================================

#[tokio::test]
async fn test_without_airport_database() {
    let dir = TempDir::new().unwrap();
    let path = FlightScript::full_flight().write(dir.path());

    let status = replay(&path, ReplayAccessor::new()).await;

    assert_eq!(status.events()[0].name, "Taxi out at ZZZZ");
    assert_eq!(status.departure().unwrap().airport_name, "");
    assert_eq!(status.arrival().unwrap().airport_id, "ZZZZ");
}

#[tokio::test]
async fn test_paused_simulator_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let mut script = FlightScript::new();
    script.ground(0.3, |_| 0.0);
    let frozen = script.lines.last().unwrap().clone();
    for _ in 0..20 {
        script.lines.push(frozen.clone());
    }
    let path = script.write(dir.path());

    let status = replay(&path, ReplayAccessor::new()).await;

    assert!(status.events().is_empty());
    assert_eq!(status.locations().len(), 1);
    assert_eq!(status.phase(), FlightPhase::Parked);
}

#[tokio::test]
async fn test_corrupt_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let mut script = FlightScript::new();
    script.ground(2.0, |_| 0.0);
    script.lines.push("{\"ts\": ".to_string());
    script.lines.push("[\"not\", \"an\", \"object\"]".to_string());
    script.ground(2.0, |_| 8.0);
    let path = script.write(dir.path());

    let engine = PhaseEngine::new(EngineConfig::default(), ReplayAccessor::new()).unwrap();
    let mut flight_loop = FlightLoop::new(engine, Recording::open(&path).unwrap());
    let summary = flight_loop.run(CancellationToken::new()).await;

    assert_eq!(summary.source_errors, 2);
    assert_eq!(summary.ticks + summary.skipped, 40);
    assert!(summary.skipped > 0);
    assert_eq!(flight_loop.engine().phase(), FlightPhase::TaxiOut);
}

// ============================================================================
// Export and Configuration
// ============================================================================

#[tokio::test]
async fn test_json_export_shape() {
    let dir = TempDir::new().unwrap();
    let path = FlightScript::full_flight().write(dir.path());
    let accessor = ReplayAccessor::with_airports(airport_index(dir.path()));

    let status = replay(&path, accessor).await;
    let value = serde_json::to_value(&status).unwrap();

    assert_eq!(value["phase"], "parked");
    assert_eq!(value["departure"]["airport_id"], "LFBO");
    assert_eq!(value["events"].as_array().unwrap().len(), 9);
    assert_eq!(value["events"][0]["kind"], "state");
    assert_eq!(value["events"][2]["kind"], "milestone");
    assert_eq!(
        value["locations"].as_array().unwrap().len(),
        status.locations().len()
    );
}

#[test]
fn test_config_file_slows_sampling() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.ini");
    std::fs::write(&path, "[engine]\nsample_every_ticks = 5\n\n[poll]\ncruise = 2.0\n").unwrap();

    let config = ConfigFile::load_from(&path).unwrap();
    assert_eq!(config.engine.sample_every_ticks, 5);
    assert!(PhaseEngine::new(config.engine, ReplayAccessor::new()).is_ok());
}

#[test]
fn test_config_file_rejects_zero_poll_delay() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.ini");
    std::fs::write(&path, "[poll]\nclimb = 0\n").unwrap();

    assert!(ConfigFile::load_from(&path).is_err());
}
