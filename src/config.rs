use std::{fs, path::Path};

use serde::Deserialize;

use crate::{Result, rules::RulePolicy};

/// Number of undoable commands kept when the config does not say otherwise.
const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// maximum number of undoable commands, 0 keeps everything, defaults to 100
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// rules config
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// outcome when no replace rule gives a definite answer
    #[serde(default)]
    pub default_policy: RulePolicy,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            rules: RulesConfig::default(),
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use crate::{Config, MorphError, RulePolicy};

    #[test]
    fn test_config_deserialize() {
        let toml_str = r#"
        history_limit = 10
        [rules]
        default_policy = "deny"
        "#;
        let config = Config::load_from_str(toml_str).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.rules.default_policy, RulePolicy::Deny);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.rules.default_policy, RulePolicy::Allow);
    }

    #[test]
    fn test_config_invalid_policy() {
        let toml_str = r#"
        [rules]
        default_policy = "maybe"
        "#;
        let err = Config::load_from_str(toml_str).unwrap_err();
        assert!(matches!(err, MorphError::Config(_)));
    }

    #[test]
    fn test_config_missing_file() {
        let err = Config::create("/nonexistent/flowmorph.toml").unwrap_err();
        assert!(matches!(err, MorphError::IoError(_)));
    }
}
