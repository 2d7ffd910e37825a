//! TOML configuration for the store and its collaborators.
//!
//! Every section is optional; missing values fall back to the defaults below.
//!
//! ```toml
//! [score]
//! initial = 85
//! vital_logged = 2
//! dose_taken = 1
//!
//! [api]
//! base_url = "http://localhost:5000/api"
//!
//! [insights]
//! recent_window = 20
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vitalis_contracts::{
    endpoint::DEFAULT_API_BASE_URL,
    error::{VitalisError, VitalisResult},
};

use crate::score::HealthScore;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "VITALIS_API_URL";

/// How the health score starts and how much each action raises it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreRules {
    pub initial: u8,
    pub vital_logged: u8,
    pub dose_taken: u8,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            initial: 85,
            vital_logged: 2,
            dose_taken: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsightSettings {
    /// How many of the newest vitals feed the AI insight prompt.
    pub recent_window: usize,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self { recent_window: 20 }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VitalisConfig {
    pub score: ScoreRules,
    pub api: ApiSettings,
    pub insights: InsightSettings,
}

impl VitalisConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `VitalisError::ConfigError` if the TOML is malformed, has
    /// unknown keys, or carries out-of-range values.
    pub fn from_toml_str(s: &str) -> VitalisResult<Self> {
        let config: VitalisConfig = toml::from_str(s).map_err(|e| VitalisError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> VitalisResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VitalisError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply `VITALIS_API_URL` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                debug!(base_url = %url, "api base url overridden from environment");
                self.api.base_url = url;
            }
        }
        self
    }

    fn validate(&self) -> VitalisResult<()> {
        if self.score.initial > HealthScore::MAX {
            return Err(VitalisError::ConfigError {
                reason: format!(
                    "score.initial {} exceeds the maximum of {}",
                    self.score.initial,
                    HealthScore::MAX
                ),
            });
        }
        if self.api.base_url.trim().is_empty() {
            return Err(VitalisError::ConfigError {
                reason: "api.base_url must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use vitalis_contracts::error::VitalisError;

    use super::{VitalisConfig, API_URL_ENV};

    #[test]
    fn empty_document_yields_defaults() {
        let config = VitalisConfig::from_toml_str("").unwrap();
        assert_eq!(config, VitalisConfig::default());
        assert_eq!(config.score.initial, 85);
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.insights.recent_window, 20);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = VitalisConfig::from_toml_str(
            r#"
            [score]
            initial = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.score.initial, 50);
        assert_eq!(config.score.vital_logged, 2);
        assert_eq!(config.score.dose_taken, 1);
    }

    #[test]
    fn initial_score_above_max_is_rejected() {
        let result = VitalisConfig::from_toml_str(
            r#"
            [score]
            initial = 120
            "#,
        );
        match result {
            Err(VitalisError::ConfigError { reason }) => assert!(reason.contains("score.initial")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = VitalisConfig::from_toml_str(
            r#"
            [score]
            decay = 3
            "#,
        );
        assert!(matches!(result, Err(VitalisError::ConfigError { .. })));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        match VitalisConfig::from_toml_str("this is not ][ toml") {
            Err(VitalisError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse config TOML"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// The only test that touches `VITALIS_API_URL`, so the cases run in
    /// sequence rather than racing on the process environment.
    #[test]
    fn env_override_applies_only_when_non_blank() {
        std::env::set_var(API_URL_ENV, "https://records.example.org/api");
        let config = VitalisConfig::default().with_env_overrides();
        assert_eq!(config.api.base_url, "https://records.example.org/api");

        std::env::set_var(API_URL_ENV, "   ");
        let config = VitalisConfig::default().with_env_overrides();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");

        std::env::remove_var(API_URL_ENV);
        let config = VitalisConfig::default().with_env_overrides();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
    }
}
