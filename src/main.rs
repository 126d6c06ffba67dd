//! Overbook demo: the overbooking incident replayed under each strategy.
//!
//! Loads configuration, then runs the configured passengers concurrently
//! against an unsynchronized, a mutex-guarded, and a semaphore-admitted
//! allocator in turn, printing the resulting inventory for each.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use overbook_alloc::{AllocatorDispatch, ScenarioReport, run_scenario};
use overbook_core::config::AppConfig;
use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::AllocationStrategy;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `OVERBOOK_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("OVERBOOK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
    }
}

/// Run one scenario per strategy and print the outcome of each.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        total_seats = config.inventory.total_seats,
        passengers = config.demo.passengers.len(),
        delay = %config.delay.mode,
        "Starting Overbook demo v{}",
        env!("CARGO_PKG_VERSION")
    );

    let rule = "=".repeat(72);
    println!("{rule}");
    println!("AIRLINE BOOKING: CRITICAL SECTION DEMONSTRATION");
    println!("{rule}");

    let mut reports = Vec::with_capacity(AllocationStrategy::ALL.len());
    for (index, strategy) in AllocationStrategy::ALL.into_iter().enumerate() {
        println!("\nDEMONSTRATION {}: {}", index + 1, headline(strategy));
        let allocator: Arc<dyn SeatAllocator> =
            Arc::new(AllocatorDispatch::from_config(strategy, &config)?);
        let report = run_scenario(allocator, &config.demo.passengers).await?;
        print_status(&report);
        reports.push(report);
    }

    println!("\n{rule}");
    println!("SUMMARY");
    println!("{rule}");
    for report in &reports {
        let verdict = if report.status.is_oversold() {
            format!("OVERSOLD by {} seat(s)", report.status.oversold())
        } else {
            "no overbooking".to_string()
        };
        println!(
            "{:<10} {} of {} seats sold, {}",
            report.strategy,
            report.status.seats_sold(),
            report.status.total_seats,
            verdict
        );
    }
    println!("{rule}");

    Ok(())
}

fn headline(strategy: AllocationStrategy) -> &'static str {
    match strategy {
        AllocationStrategy::Unsync => "UNSAFE SYSTEM (race condition)",
        AllocationStrategy::Locked => "SAFE SYSTEM (mutex protection)",
        AllocationStrategy::Counting => "SEMAPHORE SYSTEM",
    }
}

fn print_status(report: &ScenarioReport) {
    let status = &report.status;
    println!("  Strategy:        {}", status.strategy);
    println!("  Total seats:     {}", status.total_seats);
    println!("  Available seats: {}", status.available_seats);
    if let Some(permits) = status.admission_permits {
        println!("  Free permits:    {}", permits);
    }
    println!("  Bookings:        {}", status.booking_count());
    println!("  Seats sold:      {}", status.seats_sold());
    if status.is_oversold() {
        println!("  Overbooking:     {} seat(s)", status.oversold());
    } else {
        println!("  No overbooking");
    }
    for booking in &status.bookings {
        println!(
            "    #{:<3} {:<16} {} seat(s)  {}",
            booking.id, booking.passenger, booking.seats, booking.status
        );
    }
    for outcome in report.outcomes.iter().filter(|o| !o.confirmed) {
        match &outcome.error {
            Some(error) => println!("    x   {:<16} invalid: {}", outcome.passenger, error),
            None => println!("    x   {:<16} denied {} seat(s)", outcome.passenger, outcome.seats),
        }
    }
}
