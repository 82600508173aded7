//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied after parsing and before validation,
/// so a file can be deployed with placeholders and completed via env.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: BridgeConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides.
pub fn from_env() -> Result<BridgeConfig, ConfigError> {
    let mut config = BridgeConfig::default();
    apply_env(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply process-environment overrides onto a parsed configuration.
pub fn apply_env(config: &mut BridgeConfig) {
    apply_env_from(config, |name| std::env::var(name).ok());
}

/// Environment overlay with an injectable lookup.
///
/// The `CHATLING_*` family feeds the upstream section. Values are trimmed.
/// A non-numeric `CHATLING_MODEL_ID` degrades to unset so the webhook falls
/// back instead of refusing to start. `PORT` is not handled here: port
/// resolution is per launch variant and owned by the launcher.
pub fn apply_env_from<F>(config: &mut BridgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("CHATLING_API_KEY") {
        config.upstream.api_key = key.trim().to_string();
    }

    if let Some(url) = lookup("CHATLING_URL") {
        let url = url.trim();
        if !url.is_empty() {
            config.upstream.url = url.to_string();
        }
    }

    if let Some(model_id) = lookup("CHATLING_MODEL_ID") {
        config.upstream.model_id = model_id.trim().parse::<u64>().ok();
    }

    if let Some(timeout) = lookup("CHATLING_TIMEOUT") {
        if let Ok(secs) = timeout.trim().parse::<f64>() {
            config.upstream.timeout_secs = secs;
        }
    }

    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn env_overrides_upstream_section() {
        let mut config = BridgeConfig::default();
        apply_env_from(
            &mut config,
            lookup(&[
                ("CHATLING_API_KEY", "  secret  "),
                ("CHATLING_URL", "https://example.com/chat"),
                ("CHATLING_MODEL_ID", "42"),
                ("CHATLING_TIMEOUT", "3.5"),
            ]),
        );
        assert_eq!(config.upstream.api_key, "secret");
        assert_eq!(config.upstream.url, "https://example.com/chat");
        assert_eq!(config.upstream.model_id, Some(42));
        assert!((config.upstream.timeout_secs - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn bad_model_id_degrades_to_unset() {
        let mut config = BridgeConfig::default();
        config.upstream.model_id = Some(7);
        apply_env_from(&mut config, lookup(&[("CHATLING_MODEL_ID", "not-a-number")]));
        assert_eq!(config.upstream.model_id, None);
    }

    #[test]
    fn empty_url_override_is_ignored() {
        let mut config = BridgeConfig::default();
        let original = config.upstream.url.clone();
        apply_env_from(&mut config, lookup(&[("CHATLING_URL", "   ")]));
        assert_eq!(config.upstream.url, original);
    }

}
