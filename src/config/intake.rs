//! Intake flow configuration

use serde::Deserialize;
use std::path::Path;

use crate::domain::intake::{Question, QuestionSet};

use super::error::{ConfigError, ValidationError};

/// Intake flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// YAML file holding the ordered question sequence
    #[serde(default = "default_questions_file")]
    pub questions_file: String,

    /// Seconds before a session is treated as gone
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// Seconds between background expiry sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl IntakeConfig {
    /// Session TTL as a chrono duration for the engine
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs as i64)
    }

    /// Sweep interval as a std duration for the sweeper task
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }

    /// Loads and validates the question sequence from the configured file
    pub fn load_questions(&self) -> Result<QuestionSet, ConfigError> {
        let raw = std::fs::read_to_string(Path::new(&self.questions_file))?;
        parse_questions(&raw)
    }

    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.questions_file.trim().is_empty() {
            return Err(ValidationError::EmptyQuestionsFile);
        }
        if self.session_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            questions_file: default_questions_file(),
            session_ttl_secs: default_session_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Parses a YAML question list into a validated sequence
pub fn parse_questions(raw: &str) -> Result<QuestionSet, ConfigError> {
    let questions: Vec<Question> = serde_yaml::from_str(raw)?;
    Ok(QuestionSet::new(questions)?)
}

fn default_questions_file() -> String {
    "config/questions.yaml".to_string()
}

fn default_session_ttl() -> u64 {
    30 * 60
}

fn default_sweep_interval() -> u64 {
    5 * 60
}
