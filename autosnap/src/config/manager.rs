// File: autosnap/src/config/manager.rs
use super::Config;
use anyhow::Result;
use std::sync::Arc;
use tokio::fs;
use toml::{Table, Value};
use tracing::{debug, info, warn};

use crate::constants::defaults::ENV_PREFIX;
use crate::errors::ConfigError;

/// Config keys that may be overridden by `AUTOSNAP_<KEY>` environment variables
const STRING_KEYS: &[&str] = &[
    "region",
    "endpoint",
    "proxy_host",
    "api_key",
    "tag_name",
    "notification_channel",
    "notification_webhook_url",
    "log_file",
    "instance_selection",
    "schedule",
];

const INTEGER_KEYS: &[&str] = &["proxy_port", "keep_snapshots", "default_frequency_hours"];

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load `config_path`, apply environment overrides and validate
    pub async fn new(config_path: String) -> Result<Self> {
        let config = Self::load_configuration(&config_path).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_path: &str) -> Result<Config> {
        let content = match fs::read_to_string(config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Config file {} not found, relying on {}* environment variables",
                    config_path, ENV_PREFIX
                );
                String::new()
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: config_path.to_string(),
                    reason: e.to_string(),
                }
                .into())
            }
        };

        let config = Self::load_from_str(&content, |key| std::env::var(key).ok())?;

        info!(
            "Configuration loaded from {}: region {}, tag '{}', dry run {}",
            config_path, config.region, config.tag_name, config.dry_run
        );

        Ok(config)
    }

    /// Parse config text, overlay values from `env` and validate.
    ///
    /// `env` maps a full variable name (e.g. `AUTOSNAP_REGION`) to its value.
    pub fn load_from_str<F>(content: &str, env: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut table: Table = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;

        Self::apply_env_overrides(&mut table, env)?;

        let config: Config = Value::Table(table)
            .try_into()
            .map_err(|e| ConfigError::ParseError {
                reason: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides<F>(table: &mut Table, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in STRING_KEYS {
            if let Some(value) = env(&env_name(key)) {
                debug!("Config key '{}' overridden from environment", key);
                table.insert(key.to_string(), Value::String(value));
            }
        }

        for key in INTEGER_KEYS {
            if let Some(value) = env(&env_name(key)) {
                let parsed: i64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    field: env_name(key),
                    reason: format!("expected an integer, got '{}'", value),
                })?;
                debug!("Config key '{}' overridden from environment", key);
                table.insert(key.to_string(), Value::Integer(parsed));
            }
        }

        // Presence of the variable enables dry run unless it is explicitly falsy
        if let Some(value) = env(&env_name("dry_run")) {
            let normalized = value.trim().to_ascii_lowercase();
            let enabled = !matches!(normalized.as_str(), "" | "0" | "false" | "no" | "off");
            table.insert("dry_run".to_string(), Value::Boolean(enabled));
        }

        Ok(())
    }

    fn validate(config: &Config) -> Result<()> {
        anyhow::ensure!(!config.region.trim().is_empty(), "region must be non-empty");
        anyhow::ensure!(!config.endpoint.trim().is_empty(), "endpoint must be non-empty");
        anyhow::ensure!(!config.tag_name.trim().is_empty(), "tag_name must be non-empty");
        if let Some(keep) = config.keep_snapshots {
            anyhow::ensure!(keep >= 1, "keep_snapshots must be >= 1, got {}", keep);
        }
        if config.notifications_enabled() {
            anyhow::ensure!(
                config
                    .notification_webhook_url
                    .as_deref()
                    .map(|u| !u.is_empty())
                    .unwrap_or(false),
                "notification_webhook_url is required when notification_channel is set"
            );
        }
        if let Some(schedule) = &config.schedule {
            let fields = schedule.split_whitespace().count();
            anyhow::ensure!(
                fields == 6,
                "schedule must be a 6-field cron expression (sec min hour day month dow), got {} fields in '{}'",
                fields,
                schedule
            );
        }
        Ok(())
    }
}

fn env_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_ascii_uppercase())
}
