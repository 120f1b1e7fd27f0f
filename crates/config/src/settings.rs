//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{knowledge, ENV_PREFIX};
use crate::{ConfigError, EngineConfig};

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - a missing knowledge document is only a warning
    #[default]
    Development,
    Staging,
    /// Production mode - a knowledge source must be configured
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Chat engine tuning
    #[serde(default)]
    pub engine: EngineConfig,

    /// Where the knowledge document comes from
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Knowledge document source
///
/// When both are set, `url` is tried first and `path` is the fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Local JSON/YAML file
    #[serde(default = "default_knowledge_path")]
    pub path: Option<String>,

    /// HTTP(S) location of a JSON knowledge document
    #[serde(default)]
    pub url: Option<String>,

    /// Timeout for the HTTP fetch
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_knowledge_path() -> Option<String> {
    Some(knowledge::DEFAULT_PATH.to_string())
}
fn default_fetch_timeout_ms() -> u64 {
    5000
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            url: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.validate_knowledge()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_knowledge(&self) -> Result<(), ConfigError> {
        let knowledge = &self.knowledge;

        if let Some(url) = &knowledge.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: "knowledge.url".to_string(),
                    message: format!("Must be an http(s) URL, got {}", url),
                });
            }
        }

        if knowledge.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "knowledge.fetch_timeout_ms".to_string(),
                message: "Timeout must be positive".to_string(),
            });
        }

        if self.environment.is_production() && knowledge.path.is_none() && knowledge.url.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "knowledge".to_string(),
                message: "Production requires a knowledge path or url".to_string(),
            });
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !matches!(
            level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown log level: {}", self.observability.log_level),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/` and the environment
///
/// Entry point for a host process started from the workspace root, where
/// the shipped `config/default.yaml` lives. `config/` is resolved against
/// the working directory.
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_file = dir.join("default");
    builder = builder.add_source(File::with_name(&default_file.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_file = dir.join(env_name);
        builder =
            builder.add_source(File::with_name(&env_file.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        dir = %dir.display(),
        env = env.unwrap_or("default"),
        "Loaded settings"
    );

    Ok(settings)
}
