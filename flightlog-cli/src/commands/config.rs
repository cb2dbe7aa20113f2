//! Configuration management CLI commands.
//!
//! Provides `config show`, `config init` and `config path`.

use std::path::Path;

use clap::Subcommand;
use flightlog::config::ConfigFile;

use super::{load_config, resolve_config_path};
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as INI
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config: Option<&Path>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Init { force } => run_init(config, force),
        ConfigCommands::Path => run_path(config),
    }
}

fn run_show(config: Option<&Path>) -> Result<(), CliError> {
    let loaded = load_config(config)?;
    print!("{}", loaded.to_ini_string());
    Ok(())
}

fn run_init(config: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = resolve_config_path(config);
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "Configuration file already exists at {}. Use --force to overwrite it.",
            path.display()
        )));
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn run_path(config: Option<&Path>) -> Result<(), CliError> {
    println!("{}", resolve_config_path(config).display());
    Ok(())
}
