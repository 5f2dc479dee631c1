//! Configuration for repair runs
//!
//! Provides the per-run `RepairConfig` plus loading of repository-level
//! defaults from `mend.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::{MendError, Result};

/// Smallest allowed attempt budget
pub const MIN_ATTEMPT_BUDGET: usize = 1;
/// Largest allowed attempt budget
pub const MAX_ATTEMPT_BUDGET: usize = 10;
/// Default attempt budget
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Configuration for a single repair run
///
/// Loaded from `mend.toml` in the working directory when present, with
/// individual fields overridable by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfig {
    /// Maximum number of correction cycles before giving up.
    ///
    /// The budget counts corrections, not raw executions: each logged
    /// attempt may run the executor twice (the probe, then the corrected
    /// code). A budget of 1 still gets one correction-and-retry.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Run code locally; when false the oracle is asked for a single
    /// rewrite and nothing is executed
    #[serde(default = "default_execute_locally")]
    pub execute_locally: bool,

    /// Language name embedded in oracle prompts
    #[serde(default = "default_language")]
    pub language: String,

    /// Interpreter the executor invokes with `-c <code>`
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Wall-clock execution timeout in seconds; must be positive
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value providers
fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

fn default_execute_locally() -> bool {
    true
}

fn default_language() -> String {
    "Python".to_string()
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            execute_locally: default_execute_locally(),
            language: default_language(),
            interpreter: default_interpreter(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RepairConfig {
    /// Load configuration from `mend.toml` under `dir`, or use defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let config_path = dir.join("mend.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)
                .map_err(|e| MendError::Config(format!("failed to parse mend.toml: {}", e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to `mend.toml` under `dir`
    pub fn write_default(dir: &Path) -> Result<()> {
        let config_path = dir.join("mend.toml");
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| MendError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Check bounds before a run starts.
    ///
    /// Out-of-range budgets and a zero timeout are configuration mistakes,
    /// surfaced synchronously rather than mid-loop.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts < MIN_ATTEMPT_BUDGET || self.max_attempts > MAX_ATTEMPT_BUDGET {
            return Err(MendError::Config(format!(
                "max_attempts must be between {} and {}, got {}",
                MIN_ATTEMPT_BUDGET, MAX_ATTEMPT_BUDGET, self.max_attempts
            )));
        }
        if self.timeout_secs == 0 {
            return Err(MendError::Config(
                "timeout_secs must be a positive number of seconds".to_string(),
            ));
        }
        Ok(())
    }

    /// The execution timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RepairConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert!(config.execute_locally);
        assert_eq!(config.language, "Python");
        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds() {
        let mut config = RepairConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.max_attempts = 11;
        assert!(config.validate().is_err());

        config.max_attempts = 10;
        assert!(config.validate().is_ok());

        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RepairConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        RepairConfig::write_default(dir.path()).unwrap();

        let config = RepairConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.interpreter, "python3");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mend.toml"), "max_attempts = 5\n").unwrap();

        let config = RepairConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.language, "Python");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mend.toml"), "max_attempts = \"three\"\n").unwrap();

        let result = RepairConfig::load_or_default(dir.path());
        assert!(matches!(result, Err(MendError::Config(_))));
    }
}
