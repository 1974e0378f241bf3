use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::survey::ValidationPolicy;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5501/submit";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub submit: SubmitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Where and how completed surveys are sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// URL the answers are POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for logs and other runtime state, relative to cwd unless
    /// absolute
    #[serde(default = "default_state_dir")]
    pub state: String,
}

fn default_state_dir() -> String {
    ".survey-wizard".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval; also paces the highlight fade
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Require the identity fields and check email/phone format
    #[serde(default)]
    pub identity_fields: bool,
}

impl Config {
    /// Project-local config file, picked up from the working directory
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("survey-wizard.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Embedded defaults so the wizard runs without any config file
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/survey-wizard/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("survey-wizard").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables, e.g. SURVEY__SUBMIT__ENDPOINT
        builder = builder.add_source(
            config::Environment::with_prefix("SURVEY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            identity_fields: self.validation.identity_fields,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submit: SubmitConfig::default(),
            logging: LoggingConfig::default(),
            paths: PathsConfig::default(),
            ui: UiConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}
