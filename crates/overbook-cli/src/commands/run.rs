//! Single scenario run.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use overbook_alloc::{AllocatorDispatch, ScenarioReport, run_scenario};
use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, BookingRequest};

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Allocation strategy: unsync, locked, or counting
    /// (aliases: unsafe, mutex, semaphore)
    #[arg(short, long, default_value = "unsync")]
    pub strategy: AllocationStrategy,

    /// Override total seats
    #[arg(long)]
    pub seats: Option<u32>,

    /// Booking request as `name:seats`; repeat for more callers
    #[arg(short = 'r', long = "request")]
    pub requests: Vec<BookingRequest>,

    /// Disable injected latency
    #[arg(long)]
    pub no_delay: bool,
}

/// One row per caller
#[derive(Debug, Serialize, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Passenger")]
    passenger: String,
    #[tabled(rename = "Seats")]
    seats: u32,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Booking")]
    booking: String,
}

/// Execute the run command
pub async fn execute(
    args: &RunArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    super::apply_overrides(&mut config, args.seats, args.no_delay)?;

    let requests = if args.requests.is_empty() {
        config.demo.passengers.clone()
    } else {
        args.requests.clone()
    };

    let allocator: Arc<dyn SeatAllocator> =
        Arc::new(AllocatorDispatch::from_config(args.strategy, &config)?);
    let report = run_scenario(allocator, &requests).await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_list(&outcome_rows(&report), format);
            print_summary(&report);
        }
    }

    Ok(())
}

fn outcome_rows(report: &ScenarioReport) -> Vec<OutcomeRow> {
    let bookings = &report.status.bookings;
    let mut claimed = vec![false; bookings.len()];

    report
        .outcomes
        .iter()
        .map(|outcome| {
            let result = match (&outcome.error, outcome.confirmed) {
                (Some(error), _) => format!("INVALID: {error}"),
                (None, true) => "CONFIRMED".to_string(),
                (None, false) => "DENIED".to_string(),
            };
            // Passenger names are not unique; take the first unclaimed match.
            let matched = outcome
                .confirmed
                .then(|| {
                    bookings.iter().enumerate().position(|(i, b)| {
                        !claimed[i] && b.passenger == outcome.passenger && b.seats == outcome.seats
                    })
                })
                .flatten();
            let booking = match matched {
                Some(i) => {
                    claimed[i] = true;
                    format!("#{}", bookings[i].id)
                }
                None => "-".to_string(),
            };
            OutcomeRow {
                passenger: outcome.passenger.clone(),
                seats: outcome.seats,
                result,
                booking,
            }
        })
        .collect()
}

fn print_summary(report: &ScenarioReport) {
    let status = &report.status;
    println!();
    output::print_kv("Run", &report.run_id.to_string());
    output::print_kv("Strategy", &status.strategy.to_string());
    output::print_kv("Total Seats", &status.total_seats.to_string());
    output::print_kv("Available Seats", &status.available_seats.to_string());
    if let Some(permits) = status.admission_permits {
        output::print_kv("Free Permits", &permits.to_string());
    }
    output::print_kv("Seats Sold", &status.seats_sold().to_string());

    if status.is_oversold() {
        output::print_warning(&format!("Oversold by {} seat(s)", status.oversold()));
    } else {
        output::print_success("No overbooking");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overbook_alloc::DelayHook;

    #[tokio::test]
    async fn test_outcome_rows_mark_results() {
        let allocator: Arc<dyn SeatAllocator> = Arc::new(
            AllocatorDispatch::new(AllocationStrategy::Locked, 3, DelayHook::none()).unwrap(),
        );
        let requests = vec![
            BookingRequest::new("Alice", 2),
            BookingRequest::new("Bob", 5),
            BookingRequest::new("Carol", 0),
        ];
        let report = run_scenario(allocator, &requests).await.unwrap();
        let rows = outcome_rows(&report);

        assert_eq!(rows[0].result, "CONFIRMED");
        assert_eq!(rows[0].booking, "#1");
        assert_eq!(rows[1].result, "DENIED");
        assert_eq!(rows[1].booking, "-");
        assert!(rows[2].result.starts_with("INVALID"));
    }
}
