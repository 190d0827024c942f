//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `SUPPORT_TRIAGE_` prefix and nested values use double
//! underscores as separators. The intake question sequence itself lives in
//! a YAML file referenced from the environment config.
//!
//! # Example
//!
//! ```no_run
//! use support_triage::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let questions = config.intake.load_questions().expect("Bad questions file");
//! ```

mod error;
mod intake;
mod retrieval;

pub use error::{ConfigError, ValidationError};
pub use intake::{parse_questions, IntakeConfig};
pub use retrieval::RetrievalConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Intake flow configuration (questions file, session TTL, sweep cadence)
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Retrieval configuration (passages pulled per query)
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `SUPPORT_TRIAGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SUPPORT_TRIAGE__INTAKE__SESSION_TTL_SECS=900` -> `intake.session_ttl_secs = 900`
    /// - `SUPPORT_TRIAGE__RETRIEVAL__TOP_K=3` -> `retrieval.top_k = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUPPORT_TRIAGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.intake.validate()?;
        self.retrieval.validate()?;
        Ok(())
    }
}
