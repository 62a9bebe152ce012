use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::presenter::{default_steps, Step};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub presenter: PresenterConfig,
    pub demo: DemoConfig,
    pub ui: UiConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Ordered steps shown on the status card
    #[serde(default = "default_steps")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    /// Delay between consecutive step reveals in milliseconds (default: 180)
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
}

fn default_stagger_ms() -> u64 {
    180
}

/// Scripted progression used by the dashboard and `watch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Milliseconds between step advances (default: 2000)
    #[serde(default = "default_step_interval")]
    pub step_interval_ms: u64,
    /// Milliseconds on the last step before completion (default: 1200)
    #[serde(default = "default_completion_delay")]
    pub completion_delay_ms: u64,
    pub agent_name: String,
    pub agent_id: String,
    /// Link shown on the success card
    #[serde(default)]
    pub view_href: String,
}

fn default_step_interval() -> u64 {
    2000
}

fn default_completion_delay() -> u64 {
    1200
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
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

impl Config {
    /// Project-local config file, relative to the working directory
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("stepwise.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so stepwise works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/stepwise/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("stepwise").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with STEPWISE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("STEPWISE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.presenter.stagger_ms)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.demo.step_interval_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.demo.completion_delay_ms)
    }

    pub fn refresh_rate(&self) -> Duration {
        Duration::from_millis(self.ui.refresh_rate_ms)
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
}

impl Default for Config {
    fn default() -> Self {
        Self {
            presenter: PresenterConfig {
                stagger_ms: default_stagger_ms(),
            },
            demo: DemoConfig {
                step_interval_ms: default_step_interval(),
                completion_delay_ms: default_completion_delay(),
                agent_name: "data-pipeline-agent".to_string(),
                agent_id: "AGT-7F3A2B".to_string(),
                view_href: "#".to_string(),
            },
            ui: UiConfig {
                refresh_rate_ms: 50,
            },
            paths: PathsConfig {
                state: ".stepwise".to_string(),
            },
            logging: LoggingConfig::default(),
            steps: default_steps(),
        }
    }
}
