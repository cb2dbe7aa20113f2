//! FlightLog CLI - Command-line interface
//!
//! Replays recorded flights through the phase engine and manages the
//! configuration file.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::replay::ReplayArgs;

#[derive(Parser)]
#[command(name = "flightlog")]
#[command(version = flightlog::VERSION)]
#[command(about = "Flight phase detection and flight logging for X-Plane", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.flightlog/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded flight and print its flight log
    Replay(ReplayArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay(args) => commands::replay::run(args, cli.config.as_deref()).await,
        Commands::Config { command } => commands::config::run(command, cli.config.as_deref()),
    };

    if let Err(e) = result {
        e.exit();
    }
}
