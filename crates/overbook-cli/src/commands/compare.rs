//! Strategy comparison over repeated trials.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::output::{self, OutputFormat};
use overbook_alloc::{AllocatorDispatch, TrialSummary, run_trials};
use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::AllocationStrategy;

/// Arguments for the compare command
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Trials per strategy (defaults to `demo.trials`)
    #[arg(short, long)]
    pub trials: Option<u32>,

    /// Override total seats
    #[arg(long)]
    pub seats: Option<u32>,

    /// Disable injected latency
    #[arg(long)]
    pub no_delay: bool,
}

/// One row per strategy
#[derive(Debug, Serialize, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Trials")]
    trials: u32,
    #[tabled(rename = "Oversold Trials")]
    oversold_trials: u32,
    #[tabled(rename = "Oversell Rate")]
    oversell_rate: String,
    #[tabled(rename = "Worst Oversell")]
    worst_oversell: u64,
    #[tabled(rename = "Max Sold")]
    max_seats_sold: u64,
    #[tabled(rename = "Capacity")]
    total_seats: u32,
}

impl From<&TrialSummary> for SummaryRow {
    fn from(summary: &TrialSummary) -> Self {
        Self {
            strategy: summary.strategy.to_string(),
            trials: summary.trials,
            oversold_trials: summary.oversold_trials,
            oversell_rate: format!("{:.0}%", summary.oversell_rate() * 100.0),
            worst_oversell: summary.worst_oversell,
            max_seats_sold: summary.max_seats_sold,
            total_seats: summary.total_seats,
        }
    }
}

/// Execute the compare command
pub async fn execute(
    args: &CompareArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    super::apply_overrides(&mut config, args.seats, args.no_delay)?;
    let trials = args.trials.unwrap_or(config.demo.trials);

    let mut summaries = Vec::with_capacity(AllocationStrategy::ALL.len());
    for strategy in AllocationStrategy::ALL {
        info!(strategy = %strategy, trials, "Running trials");
        let summary = run_trials(
            || {
                let allocator: Arc<dyn SeatAllocator> =
                    Arc::new(AllocatorDispatch::from_config(strategy, &config)?);
                Ok(allocator)
            },
            &config.demo.passengers,
            trials,
        )
        .await?;

        if !strategy.prevents_oversell() && summary.oversold_trials == 0 && trials > 0 {
            output::print_warning(&format!(
                "{strategy} never oversold in {trials} trial(s); try more trials or a wider delay"
            ));
        }
        if strategy.prevents_oversell() && summary.oversold_trials > 0 {
            output::print_error(&format!("{strategy} oversold, which must never happen"));
            return Err(AppError::internal(format!(
                "{strategy} oversold in {} trial(s)",
                summary.oversold_trials
            )));
        }
        summaries.push(summary);
    }

    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_row_shows_oversell_rate() {
        let summary = TrialSummary {
            strategy: AllocationStrategy::Unsync,
            total_seats: 10,
            trials: 20,
            oversold_trials: 5,
            worst_oversell: 4,
            max_seats_sold: 14,
        };
        let row = SummaryRow::from(&summary);
        assert_eq!(row.strategy, "unsync");
        assert_eq!(row.oversell_rate, "25%");
        assert_eq!(row.worst_oversell, 4);
    }
}
