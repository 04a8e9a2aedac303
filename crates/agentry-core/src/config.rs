//! # Runtime Configuration
//!
//! Settings for the agent registry and tool catalog. Values can come from
//! defaults, a TOML document or environment variables.
//!
//! ## Environment Variables
//!
//! - `AGENTRY_ENABLED` - Master switch for the runtime (default: true)
//! - `AGENTRY_MAX_AGENTS` - Registry capacity (default: 100)
//! - `AGENTRY_AGENT_TIMEOUT_MS` - Advisory per-message timeout in ms (default: 30000)
//! - `AGENTRY_MONITORING` - Enable periodic statistics logging (default: true)
//! - `AGENTRY_TOOLS_ENABLED` - Build the tool catalog (default: true)
//! - `AGENTRY_TOOL_SCAN_NAMESPACE` - Namespace the composition layer takes tools from

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_MAX_AGENTS: usize = 100;
pub const DEFAULT_AGENT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_TOOL_NAMESPACE: &str = "agentry_tools::builtin";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Tool catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub enabled: bool,
    pub scan_namespace: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scan_namespace: DEFAULT_TOOL_NAMESPACE.to_string(),
        }
    }
}

/// Settings consumed by the registry and composition root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub enabled: bool,
    pub max_agents: usize,
    /// Advisory only; dispatch does not enforce it.
    pub agent_timeout_ms: u64,
    pub monitoring: bool,
    pub tools: ToolsConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_agents: DEFAULT_MAX_AGENTS,
            agent_timeout_ms: DEFAULT_AGENT_TIMEOUT_MS,
            monitoring: true,
            tools: ToolsConfig::default(),
        }
    }
}

impl RuntimeConfig {
    #[must_use]
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_millis(self.agent_timeout_ms)
    }

    /// Load configuration from environment variables over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable has an invalid value or the
    /// result fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RuntimeConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = RuntimeConfigBuilder::default();

        if let Some(enabled) = parse_bool(&lookup, "AGENTRY_ENABLED")? {
            builder = builder.enabled(enabled);
        }
        if let Some(max) = parse_number::<usize, _>(&lookup, "AGENTRY_MAX_AGENTS")? {
            builder = builder.max_agents(max);
        }
        if let Some(ms) = parse_number::<u64, _>(&lookup, "AGENTRY_AGENT_TIMEOUT_MS")? {
            builder = builder.agent_timeout_ms(ms);
        }
        if let Some(monitoring) = parse_bool(&lookup, "AGENTRY_MONITORING")? {
            builder = builder.monitoring(monitoring);
        }
        if let Some(enabled) = parse_bool(&lookup, "AGENTRY_TOOLS_ENABLED")? {
            builder = builder.tools_enabled(enabled);
        }
        if let Some(namespace) = lookup("AGENTRY_TOOL_SCAN_NAMESPACE") {
            builder = builder.tool_scan_namespace(namespace);
        }

        builder.build()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    ///
    /// ```toml
    /// max_agents = 20
    /// agent_timeout_ms = 5000
    ///
    /// [tools]
    /// enabled = false
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_agents == 0 {
            return Err(ConfigError::ValidationError(
                "max_agents must be greater than 0".to_string(),
            ));
        }
        if self.agent_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "agent_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for `RuntimeConfig`
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfigBuilder {
    config: RuntimeConfig,
}

impl RuntimeConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    pub fn max_agents(mut self, max_agents: usize) -> Self {
        self.config.max_agents = max_agents;
        self
    }

    pub fn agent_timeout_ms(mut self, millis: u64) -> Self {
        self.config.agent_timeout_ms = millis;
        self
    }

    pub fn monitoring(mut self, monitoring: bool) -> Self {
        self.config.monitoring = monitoring;
        self
    }

    pub fn tools_enabled(mut self, enabled: bool) -> Self {
        self.config.tools.enabled = enabled;
        self
    }

    pub fn tool_scan_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.tools.scan_namespace = namespace.into();
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn build(self) -> Result<RuntimeConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!(
                    "invalid boolean value '{val}', expected true/false/1/0/yes/no/on/off"
                ),
            }),
        },
        None => Ok(None),
    }
}

fn parse_number<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid numeric value '{val}': {e}"),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.max_agents, 100);
        assert_eq!(config.agent_timeout(), Duration::from_secs(30));
        assert!(config.enabled);
        assert!(config.tools.enabled);
    }

    #[test]
    fn env_overrides() {
        let config = RuntimeConfig::from_lookup(vars(&[
            ("AGENTRY_MAX_AGENTS", "5"),
            ("AGENTRY_AGENT_TIMEOUT_MS", "1500"),
            ("AGENTRY_MONITORING", "off"),
            ("AGENTRY_TOOLS_ENABLED", "0"),
            ("AGENTRY_TOOL_SCAN_NAMESPACE", "custom::tools"),
        ]))
        .unwrap();

        assert_eq!(config.max_agents, 5);
        assert_eq!(config.agent_timeout_ms, 1500);
        assert!(!config.monitoring);
        assert!(!config.tools.enabled);
        assert_eq!(config.tools.scan_namespace, "custom::tools");
    }

    #[test]
    fn env_rejects_garbage() {
        let err = RuntimeConfig::from_lookup(vars(&[("AGENTRY_MAX_AGENTS", "many")])).unwrap_err();
        assert!(err.to_string().contains("AGENTRY_MAX_AGENTS"));

        let err = RuntimeConfig::from_lookup(vars(&[("AGENTRY_ENABLED", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }

    #[test]
    fn zero_capacity_fails_validation() {
        let err = RuntimeConfig::builder().max_agents(0).build().unwrap_err();
        assert!(err.to_string().contains("max_agents must be greater than 0"));
    }

    #[test]
    fn toml_partial_document() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            max_agents = 20

            [tools]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.max_agents, 20);
        assert_eq!(config.agent_timeout_ms, DEFAULT_AGENT_TIMEOUT_MS);
        assert!(!config.tools.enabled);
        assert_eq!(config.tools.scan_namespace, DEFAULT_TOOL_NAMESPACE);
    }

    #[test]
    fn toml_errors_surface() {
        assert!(matches!(
            RuntimeConfig::from_toml_str("max_agents = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RuntimeConfig::from_toml_str("agent_timeout_ms = 0"),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
