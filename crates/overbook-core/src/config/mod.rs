//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Every section has defaults, so a missing file yields the
//! incident demo: 10 seats, six passengers, random 10-100 ms delays.

pub mod delay;
pub mod demo;
pub mod inventory;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::delay::DelayConfig;
use self::demo::DemoConfig;
use self::inventory::InventoryConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Flight capacity.
    #[serde(default)]
    pub inventory: InventoryConfig,
    /// Latency injected at delay points.
    #[serde(default)]
    pub delay: DelayConfig,
    /// Demo callers.
    #[serde(default)]
    pub demo: DemoConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for an environment.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// `config/{env}.toml` and environment variables prefixed with
    /// `OVERBOOK__`. Missing files are skipped.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, plus `OVERBOOK__` variables.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("OVERBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        app.validate()?;
        Ok(app)
    }

    /// Check cross-field constraints the schema cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.inventory.total_seats == 0 {
            return Err(AppError::configuration(
                "inventory.total_seats must be positive",
            ));
        }
        if self.delay.min_ms > self.delay.max_ms {
            return Err(AppError::configuration(format!(
                "delay.min_ms ({}) exceeds delay.max_ms ({})",
                self.delay.min_ms, self.delay.max_ms
            )));
        }
        if let Some(blank) = self
            .demo
            .passengers
            .iter()
            .position(|p| p.passenger.trim().is_empty())
        {
            return Err(AppError::configuration(format!(
                "demo.passengers[{blank}] has an empty passenger name"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::delay::DelayMode;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults_match_incident_demo() {
        let config = AppConfig::default();
        assert_eq!(config.inventory.total_seats, 10);
        assert_eq!(config.delay.mode, DelayMode::Random);
        assert_eq!(config.demo.passengers.len(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_seats_rejected() {
        let mut config = AppConfig::default();
        config.inventory.total_seats = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let mut config = AppConfig::default();
        config.delay.min_ms = 200;
        config.delay.max_ms = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_passenger_rejected() {
        let mut config = AppConfig::default();
        config.demo.passengers[2].passenger = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("passengers[2]"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let source = r#"
            [inventory]
            total_seats = 4

            [delay]
            mode = "none"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.inventory.total_seats, 4);
        assert_eq!(config.delay.mode, DelayMode::None);
        assert_eq!(config.delay.max_ms, 100);
        assert_eq!(config.logging.level, "info");
    }
}
