//! Concurrent booking scenarios.
//!
//! A scenario spawns one task per [`BookingRequest`] on the current tokio
//! runtime, all against one shared allocator, waits for every task, and
//! then reads the allocator's status.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{Instrument, info, info_span, warn};

use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, BookingRequest, InventoryStatus, RunId};

/// What happened to one caller.
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    /// Passenger name.
    pub passenger: String,
    /// Seats requested.
    pub seats: u32,
    /// Whether the booking was confirmed.
    pub confirmed: bool,
    /// Validation error, if the request was rejected as invalid.
    pub error: Option<String>,
}

/// Result of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Run identifier, also attached to the run's tracing span.
    pub run_id: RunId,
    /// Strategy of the allocator under test.
    pub strategy: AllocationStrategy,
    /// One outcome per request, in request order.
    pub outcomes: Vec<BookingOutcome>,
    /// Allocator status after every caller finished.
    pub status: InventoryStatus,
}

impl ScenarioReport {
    /// Number of confirmed requests.
    pub fn confirmed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.confirmed).count()
    }

    /// Number of valid requests that were denied.
    pub fn denied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.confirmed && o.error.is_none())
            .count()
    }

    /// Seats requested by confirmed outcomes.
    pub fn confirmed_seats(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|o| o.confirmed)
            .map(|o| u64::from(o.seats))
            .sum()
    }
}

/// Aggregate of repeated scenario runs on fresh allocators.
#[derive(Debug, Clone, Serialize)]
pub struct TrialSummary {
    /// Strategy under test.
    pub strategy: AllocationStrategy,
    /// Capacity of every allocator.
    pub total_seats: u32,
    /// Number of runs.
    pub trials: u32,
    /// Runs that ended with more seats sold than exist.
    pub oversold_trials: u32,
    /// Largest oversell seen in any run.
    pub worst_oversell: u64,
    /// Largest number of seats sold in any run.
    pub max_seats_sold: u64,
}

impl TrialSummary {
    /// Fraction of runs that oversold, in `[0, 1]`.
    pub fn oversell_rate(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.oversold_trials) / f64::from(self.trials)
    }
}

/// Runs every request concurrently against `allocator`.
///
/// Invalid requests are recorded in their outcome and do not abort the run.
/// A panicking booking task is reported as an internal error.
pub async fn run_scenario(
    allocator: Arc<dyn SeatAllocator>,
    requests: &[BookingRequest],
) -> Result<ScenarioReport, AppError> {
    let run_id = RunId::new();
    let strategy = allocator.strategy();
    let span = info_span!("scenario", run_id = %run_id, strategy = %strategy);

    async move {
        info!(
            callers = requests.len(),
            total_seats = allocator.total_seats(),
            "Starting concurrent bookings"
        );

        let handles: Vec<_> = requests
            .iter()
            .cloned()
            .map(|request| {
                let allocator = Arc::clone(&allocator);
                tokio::spawn(
                    async move {
                        let result = allocator.book(&request.passenger, request.seats).await;
                        (request, result)
                    }
                    .in_current_span(),
                )
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for joined in join_all(handles).await {
            let (request, result) = joined?;
            let outcome = match result {
                Ok(confirmed) => BookingOutcome {
                    passenger: request.passenger,
                    seats: request.seats,
                    confirmed,
                    error: None,
                },
                Err(err) if err.is_validation() => {
                    warn!(passenger = %request.passenger, error = %err, "Invalid booking request");
                    BookingOutcome {
                        passenger: request.passenger,
                        seats: request.seats,
                        confirmed: false,
                        error: Some(err.message),
                    }
                }
                Err(err) => return Err(err),
            };
            outcomes.push(outcome);
        }

        let status = allocator.status().await?;
        if status.is_oversold() {
            warn!(
                seats_sold = status.seats_sold(),
                total_seats = status.total_seats,
                oversold = status.oversold(),
                "Inventory oversold"
            );
        } else {
            info!(
                seats_sold = status.seats_sold(),
                available = status.available_seats,
                "All bookings settled"
            );
        }

        Ok::<_, AppError>(ScenarioReport {
            run_id,
            strategy,
            outcomes,
            status,
        })
    }
    .instrument(span)
    .await
}

/// Runs the same requests `trials` times, each on a fresh allocator from
/// `make_allocator`, and summarizes how often capacity was exceeded.
pub async fn run_trials<F>(
    make_allocator: F,
    requests: &[BookingRequest],
    trials: u32,
) -> Result<TrialSummary, AppError>
where
    F: Fn() -> Result<Arc<dyn SeatAllocator>, AppError>,
{
    let mut summary: Option<TrialSummary> = None;

    for _ in 0..trials {
        let allocator = make_allocator()?;
        let report = run_scenario(allocator, requests).await?;
        let status = &report.status;

        let entry = summary.get_or_insert_with(|| TrialSummary {
            strategy: report.strategy,
            total_seats: status.total_seats,
            trials: 0,
            oversold_trials: 0,
            worst_oversell: 0,
            max_seats_sold: 0,
        });
        entry.trials += 1;
        if status.is_oversold() {
            entry.oversold_trials += 1;
        }
        entry.worst_oversell = entry.worst_oversell.max(status.oversold());
        entry.max_seats_sold = entry.max_seats_sold.max(status.seats_sold());
    }

    match summary {
        Some(summary) => Ok(summary),
        None => {
            let allocator = make_allocator()?;
            Ok(TrialSummary {
                strategy: allocator.strategy(),
                total_seats: allocator.total_seats(),
                trials: 0,
                oversold_trials: 0,
                worst_oversell: 0,
                max_seats_sold: 0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::DelayHook;
    use crate::dispatch::AllocatorDispatch;

    fn allocator(strategy: AllocationStrategy, seats: u32) -> Arc<dyn SeatAllocator> {
        Arc::new(AllocatorDispatch::new(strategy, seats, DelayHook::none()).unwrap())
    }

    #[tokio::test]
    async fn test_report_counts() {
        let requests = vec![
            BookingRequest::new("Passenger_A", 3),
            BookingRequest::new("Passenger_B", 0),
            BookingRequest::new("Passenger_C", 9),
        ];
        let report = run_scenario(allocator(AllocationStrategy::Locked, 5), &requests)
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.confirmed_count(), 1);
        assert_eq!(report.denied_count(), 1);
        assert_eq!(report.confirmed_seats(), 3);
        assert!(report.outcomes[1].error.is_some());
        assert_eq!(report.status.seats_sold(), 3);
    }

    #[tokio::test]
    async fn test_outcomes_follow_request_order() {
        let requests = BookingRequest::incident_passengers();
        let report = run_scenario(allocator(AllocationStrategy::Counting, 10), &requests)
            .await
            .unwrap();
        let names: Vec<_> = report.outcomes.iter().map(|o| o.passenger.as_str()).collect();
        assert_eq!(
            names,
            [
                "Passenger_A",
                "Passenger_B",
                "Passenger_C",
                "Passenger_D",
                "Passenger_E",
                "Passenger_F",
            ]
        );
    }

    #[tokio::test]
    async fn test_trials_summary_for_locked() {
        let requests = BookingRequest::incident_passengers();
        let summary = run_trials(
            || Ok(allocator(AllocationStrategy::Locked, 10)),
            &requests,
            5,
        )
        .await
        .unwrap();

        assert_eq!(summary.trials, 5);
        assert_eq!(summary.oversold_trials, 0);
        assert_eq!(summary.worst_oversell, 0);
        assert!(summary.max_seats_sold <= 10);
        assert_eq!(summary.oversell_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_zero_trials() {
        let summary = run_trials(|| Ok(allocator(AllocationStrategy::Unsync, 4)), &[], 0)
            .await
            .unwrap();
        assert_eq!(summary.trials, 0);
        assert_eq!(summary.strategy, AllocationStrategy::Unsync);
        assert_eq!(summary.total_seats, 4);
    }
}
