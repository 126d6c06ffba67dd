//! CLI command definitions and dispatch.

pub mod compare;
pub mod config;
pub mod run;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::output::OutputFormat;
use overbook_core::config::AppConfig;
use overbook_core::error::AppError;

/// Overbook: concurrent seat allocation under three synchronization strategies
#[derive(Debug, Parser)]
#[command(name = "overbook", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one concurrent booking scenario
    Run(run::RunArgs),
    /// Compare all strategies over repeated trials
    Compare(compare::CompareArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let name = self.command.name();
        info!(command = name, config = %self.config, "Executing command");

        let result = match &self.command {
            Commands::Run(args) => run::execute(args, &self.config, self.format).await,
            Commands::Compare(args) => compare::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        };

        match &result {
            Ok(()) => info!(command = name, "Command finished"),
            Err(e) => debug!(command = name, error = %e, "Command failed"),
        }
        result
    }
}

impl Commands {
    /// Subcommand name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Run(_) => "run",
            Commands::Compare(_) => "compare",
            Commands::Config(_) => "config",
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path)
}

/// Helper: apply the seat and delay overrides shared by several commands
pub fn apply_overrides(
    config: &mut AppConfig,
    seats: Option<u32>,
    no_delay: bool,
) -> Result<(), AppError> {
    if let Some(seats) = seats {
        config.inventory.total_seats = seats;
    }
    if no_delay {
        config.delay.mode = overbook_core::config::delay::DelayMode::None;
    }
    config.validate()
}
