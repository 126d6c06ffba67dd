//! Inventory configuration.

use serde::{Deserialize, Serialize};

/// Capacity of the flight being booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Total seats on the flight. Must be positive.
    #[serde(default = "default_total_seats")]
    pub total_seats: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            total_seats: default_total_seats(),
        }
    }
}

fn default_total_seats() -> u32 {
    10
}
