//! Demonstration scenario configuration.

use serde::{Deserialize, Serialize};

use crate::types::BookingRequest;

/// Callers wired against one allocator by the demo binary and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Concurrent booking requests, one task each.
    #[serde(default = "BookingRequest::incident_passengers")]
    pub passengers: Vec<BookingRequest>,
    /// Number of trials for strategy comparisons.
    #[serde(default = "default_trials")]
    pub trials: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            passengers: BookingRequest::incident_passengers(),
            trials: default_trials(),
        }
    }
}

fn default_trials() -> u32 {
    20
}
