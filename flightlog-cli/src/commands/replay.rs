//! Replay command - run a recorded flight through the phase engine.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use flightlog::airport::AirportIndex;
use flightlog::flight_loop::FlightLoop;
use flightlog::flight_status::{FlightPhase, FlightStatus, PhaseEngine};
use flightlog::logging::{init_logging, Console};
use flightlog::replay::{Recording, ReplayAccessor};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::load_config;
use crate::error::CliError;

/// Flight log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// Full flight log as JSON
    Json,
}

/// Arguments for the replay command.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Recorded flight (JSON lines, optionally .gz)
    pub recording: PathBuf,

    /// apt.dat used to resolve departure and arrival airports
    #[arg(long, conflicts_with = "xplane")]
    pub apt_dat: Option<PathBuf>,

    /// X-Plane installation whose apt.dat should be used
    #[arg(long)]
    pub xplane: Option<PathBuf>,

    /// Honor the engine's poll delays instead of replaying at full speed
    #[arg(long)]
    pub realtime: bool,

    /// Phase to start in; `unknown` classifies from the first snapshot
    #[arg(long, default_value = "parked")]
    pub initial_phase: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the flight log to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not mirror log output to the console
    #[arg(long, short)]
    pub quiet: bool,
}

/// Run the replay command.
pub async fn run(args: ReplayArgs, config: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config)?;
    let initial_phase: FlightPhase = args
        .initial_phase
        .parse()
        .map_err(|e: flightlog::flight_status::ParsePhaseError| CliError::Usage(e.to_string()))?;

    let _logging_guard =
        init_logging(&config.logging.directory, &config.logging.file, console_target(&args))
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let accessor = match load_airports(&args)? {
        Some(index) => ReplayAccessor::with_airports(index),
        None => {
            warn!("No airport database given, airports will be recorded as unknown");
            ReplayAccessor::new()
        }
    };

    let engine = PhaseEngine::with_initial_phase(config.engine, accessor, initial_phase)?;
    let recording = Recording::open(&args.recording)?;
    info!(
        recording = %args.recording.display(),
        realtime = args.realtime,
        "Replaying flight"
    );

    let cancellation = CancellationToken::new();
    let ctrl_c = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping replay");
            ctrl_c.cancel();
        }
    });

    let mut flight_loop = FlightLoop::new(engine, recording).realtime(args.realtime);
    let summary = flight_loop.run(cancellation).await;
    if summary.source_errors > 0 {
        warn!(
            errors = summary.source_errors,
            "Some recording lines could not be read"
        );
    }

    let status = flight_loop.into_engine().into_status();
    let rendered = match args.format {
        OutputFormat::Text => render_text(&status),
        OutputFormat::Json => serde_json::to_string_pretty(&status)? + "\n",
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered).map_err(|error| CliError::FileWrite {
            path: path.display().to_string(),
            error,
        })?,
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Keep log lines off stdout when it carries the JSON flight log.
fn console_target(args: &ReplayArgs) -> Console {
    if args.quiet {
        Console::Off
    } else if args.format == OutputFormat::Json && args.output.is_none() {
        Console::Stderr
    } else {
        Console::Stdout
    }
}

fn load_airports(args: &ReplayArgs) -> Result<Option<AirportIndex>, CliError> {
    let index = match (&args.apt_dat, &args.xplane) {
        (Some(path), _) => AirportIndex::from_apt_dat(path)?,
        (None, Some(root)) => AirportIndex::from_xplane_path(root)?,
        (None, None) => return Ok(None),
    };
    Ok(Some(index))
}

/// Human readable flight log.
fn render_text(status: &FlightStatus) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Flight Log");
    let _ = writeln!(out, "==========");
    let _ = writeln!(out);

    if let Some(departure) = status.departure() {
        let _ = writeln!(
            out,
            "Departure: {} {} at {:.1}s",
            departure.airport_id, departure.airport_name, departure.timestamp
        );
        if !departure.aircraft_icao.is_empty() || !departure.aircraft_name.is_empty() {
            let _ = writeln!(
                out,
                "Aircraft:  {} {}",
                departure.aircraft_icao, departure.aircraft_name
            );
        }
        if let Some(fuel) = departure.fuel_weight {
            let _ = writeln!(out, "Fuel:      {:.1}", fuel);
        }
    }
    if let Some(arrival) = status.arrival() {
        let _ = writeln!(
            out,
            "Arrival:   {} {} at {:.1}s",
            arrival.airport_id, arrival.airport_name, arrival.timestamp
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Events:");
    if status.events().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for event in status.events() {
        let _ = writeln!(
            out,
            "  {:>10.1}s  {:<9} {}",
            event.timestamp,
            event.phase.to_string(),
            event.name
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Final phase:     {}", status.phase());
    let _ = writeln!(out, "Trail points:    {}", status.locations().len());
    let _ = writeln!(
        out,
        "Trail distance:  {:.1} nm",
        status.locations().distance_nm()
    );

    out
}
