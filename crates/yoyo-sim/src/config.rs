//! Session configuration.
//!
//! Defaults come from `yoyo_core::constants`; a JSON file may override any
//! subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use yoyo_core::constants::*;

use crate::error::ConfigError;

/// Spring and retraction tuning for the tether physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetherTuning {
    pub thrown_stiffness: f64,
    pub return_stiffness: f64,
    /// Fraction of velocity removed per tick, in (0, 1].
    pub damping: f64,
    pub max_speed: f64,
    pub throw_speed: f64,
    pub thrown_reach: f64,
    pub return_epsilon: f64,
    pub return_timeout_ticks: u64,
}

impl Default for TetherTuning {
    fn default() -> Self {
        Self {
            thrown_stiffness: THROWN_STIFFNESS,
            return_stiffness: RETURN_STIFFNESS,
            damping: DAMPING,
            max_speed: MAX_SPEED,
            throw_speed: THROW_SPEED,
            thrown_reach: THROWN_REACH,
            return_epsilon: RETURN_EPSILON,
            return_timeout_ticks: RETURN_TIMEOUT_TICKS,
        }
    }
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed = same drop scatter.
    pub seed: u64,
    pub tuning: TetherTuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: TetherTuning::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        if !(t.damping > 0.0 && t.damping <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "damping must be in (0, 1], got {}",
                t.damping
            )));
        }
        if t.thrown_stiffness <= 0.0 || t.return_stiffness <= 0.0 {
            return Err(ConfigError::Invalid("stiffness must be positive".into()));
        }
        if t.max_speed <= 0.0 || t.return_epsilon <= 0.0 {
            return Err(ConfigError::Invalid(
                "max_speed and return_epsilon must be positive".into(),
            ));
        }
        if !(t.thrown_reach > 0.0 && t.thrown_reach < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "thrown_reach must be in (0, 1), got {}",
                t.thrown_reach
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SessionConfig::from_json_str(r#"{ "seed": 7, "tuning": { "max_speed": 2.0 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.tuning.max_speed, 2.0);
        assert_eq!(config.tuning.damping, DAMPING);
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = SessionConfig::from_json_str(r#"{ "tuning": { "damping": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SessionConfig::from_json_str("{ seed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SessionConfig::load(Path::new("/nonexistent/yoyo.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
