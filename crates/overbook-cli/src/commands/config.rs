//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use overbook_core::error::AppError;
use overbook_core::types::BookingRequest;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show effective configuration
    Show,
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("Total Seats", &config.inventory.total_seats.to_string());
                    output::print_kv("Delay Mode", &config.delay.mode.to_string());
                    output::print_kv(
                        "Delay Range",
                        &format!("{}-{} ms", config.delay.min_ms, config.delay.max_ms),
                    );
                    output::print_kv("Fixed Delay", &format!("{} ms", config.delay.fixed_ms));
                    output::print_kv("Trials", &config.demo.trials.to_string());
                    output::print_kv("Log Level", &config.logging.level);
                    output::print_kv("Log Format", &config.logging.format);
                    let rows: Vec<PassengerRow> =
                        config.demo.passengers.iter().map(PassengerRow::from).collect();
                    output::print_list(&rows, format);
                }
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", config_path));
                println!("  Seats: {}", config.inventory.total_seats);
                println!("  Passengers: {}", config.demo.passengers.len());
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}

/// Configured caller
#[derive(Debug, Serialize, Tabled)]
struct PassengerRow {
    #[tabled(rename = "Passenger")]
    passenger: String,
    #[tabled(rename = "Seats")]
    seats: u32,
}

impl From<&BookingRequest> for PassengerRow {
    fn from(request: &BookingRequest) -> Self {
        Self {
            passenger: request.passenger.clone(),
            seats: request.seats,
        }
    }
}
