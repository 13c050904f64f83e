//! Optimizer configuration — estimation ratios and per-strategy settings.
//!
//! The per-strategy `enabled`/`weight` pair is carried for callers and for
//! forward compatibility; the set of strategies that actually runs is
//! derived from the reduction tier on every call, so these settings are
//! informational rather than authoritative.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};
use crate::estimator::{DEFAULT_CHARS_PER_TOKEN, DEFAULT_CODE_CHARS_PER_TOKEN, TokenEstimator};
use crate::strategies::STRATEGY_NAMES;

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Per-strategy settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategySettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_weight() -> f64 {
    1.0
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 1.0,
        }
    }
}

/// Root configuration for the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Chars-per-token ratio for prose.
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: f64,

    /// Chars-per-token ratio for code spans.
    #[serde(default = "default_code_chars_per_token")]
    pub code_chars_per_token: f64,

    /// Settings per strategy name (see `STRATEGY_NAMES`).
    #[serde(default)]
    pub strategies: HashMap<String, StrategySettings>,
}

fn default_chars_per_token() -> f64 {
    DEFAULT_CHARS_PER_TOKEN
}

fn default_code_chars_per_token() -> f64 {
    DEFAULT_CODE_CHARS_PER_TOKEN
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        let strategies = STRATEGY_NAMES
            .iter()
            .map(|name| (name.to_string(), StrategySettings::default()))
            .collect();
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            code_chars_per_token: DEFAULT_CODE_CHARS_PER_TOKEN,
            strategies,
        }
    }
}

impl OptimizerConfig {
    /// Reject ratios an estimator can't divide by.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("chars_per_token", self.chars_per_token),
            ("code_chars_per_token", self.code_chars_per_token),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OptimizerError::Config(format!(
                    "{} must be a positive number, got {}",
                    label, value
                )));
            }
        }
        Ok(())
    }

    /// Build the estimator this config describes.
    pub fn estimator(&self) -> TokenEstimator {
        TokenEstimator::new(self.chars_per_token, self.code_chars_per_token)
    }

    /// Merge partial overrides into this config, then re-validate.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(ratio) = overrides.chars_per_token {
            self.chars_per_token = ratio;
        }
        if let Some(ratio) = overrides.code_chars_per_token {
            self.code_chars_per_token = ratio;
        }
        if let Some(strategies) = overrides.strategies {
            for (name, patch) in strategies {
                let entry = self.strategies.entry(name).or_default();
                if let Some(enabled) = patch.enabled {
                    entry.enabled = enabled;
                }
                if let Some(weight) = patch.weight {
                    entry.weight = weight;
                }
            }
        }
        self.validate()
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Partial strategy settings, as callers send them.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StrategyOverride {
    pub enabled: Option<bool>,
    pub weight: Option<f64>,
}

/// Partial configuration, typically parsed from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub chars_per_token: Option<f64>,
    pub code_chars_per_token: Option<f64>,
    pub strategies: Option<HashMap<String, StrategyOverride>>,
}

impl ConfigOverrides {
    /// Parse overrides from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_knows_all_strategies() {
        let config = OptimizerConfig::default();
        for name in STRATEGY_NAMES {
            let settings = config.strategies.get(name).expect("strategy present");
            assert!(settings.enabled);
            assert_eq!(settings.weight, 1.0);
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(OptimizerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_ratio_is_rejected() {
        let config = OptimizerConfig {
            chars_per_token: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_merge_ratios() {
        let mut config = OptimizerConfig::default();
        config
            .apply_overrides(ConfigOverrides {
                chars_per_token: Some(3.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.chars_per_token, 3.0);
        assert_eq!(config.code_chars_per_token, DEFAULT_CODE_CHARS_PER_TOKEN);
    }

    #[test]
    fn overrides_merge_strategy_settings() {
        let mut config = OptimizerConfig::default();
        let overrides = ConfigOverrides::from_json(
            r#"{"strategies": {"trim_comments": {"weight": 2.5, "enabled": false}}}"#,
        )
        .unwrap();
        config.apply_overrides(overrides).unwrap();
        let settings = config.strategies.get("trim_comments").unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.weight, 2.5);
        // Untouched strategies keep their defaults.
        assert!(config.strategies.get("shorten_paths").unwrap().enabled);
    }

    #[test]
    fn invalid_override_ratio_is_rejected() {
        let mut config = OptimizerConfig::default();
        let result = config.apply_overrides(ConfigOverrides {
            code_chars_per_token: Some(-1.0),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn json_overrides_use_camel_case_ratio_keys() {
        let overrides =
            ConfigOverrides::from_json(r#"{"charsPerToken": 5.0, "codeCharsPerToken": 4.0}"#)
                .unwrap();
        assert_eq!(overrides.chars_per_token, Some(5.0));
        assert_eq!(overrides.code_chars_per_token, Some(4.0));
    }
}
