//! Injected latency configuration.

use serde::{Deserialize, Serialize};

/// How the allocators' delay points behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayMode {
    /// Delay points return immediately.
    None,
    /// Every delay point sleeps for `fixed_ms`.
    Fixed,
    /// Every delay point sleeps for a uniform random duration in
    /// `[min_ms, max_ms]`.
    Random,
}

impl Default for DelayMode {
    fn default() -> Self {
        Self::Random
    }
}

impl std::fmt::Display for DelayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelayMode::None => write!(f, "none"),
            DelayMode::Fixed => write!(f, "fixed"),
            DelayMode::Random => write!(f, "random"),
        }
    }
}

/// Latency injected at the allocators' delay points to widen race windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayConfig {
    /// Delay mode.
    #[serde(default)]
    pub mode: DelayMode,
    /// Lower bound for random delays, in milliseconds.
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,
    /// Upper bound for random delays, in milliseconds.
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
    /// Duration of fixed delays, in milliseconds.
    #[serde(default = "default_fixed_ms")]
    pub fixed_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            mode: DelayMode::default(),
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
            fixed_ms: default_fixed_ms(),
        }
    }
}

fn default_min_ms() -> u64 {
    10
}

fn default_max_ms() -> u64 {
    100
}

fn default_fixed_ms() -> u64 {
    50
}
