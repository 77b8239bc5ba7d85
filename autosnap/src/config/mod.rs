// File: autosnap/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
pub use manager::ConfigManager;

use crate::constants::tags;
use crate::inventory::ManagementMarker;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub region: String,
    /// Base URL of the inventory/snapshot API
    pub endpoint: String,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub api_key: Option<String>,
    /// Frequency tag key on instances/volumes, also the management marker value
    #[serde(default = "default_tag_name")]
    pub tag_name: String,
    /// Global default retention count
    pub keep_snapshots: Option<u32>,
    /// Bottom of the frequency chain; unset means untagged volumes are skipped
    pub default_frequency_hours: Option<u64>,
    #[serde(default)]
    pub dry_run: bool,
    pub notification_channel: Option<String>,
    pub notification_webhook_url: Option<String>,
    pub log_file: Option<String>,
    #[serde(default)]
    pub instance_selection: InstanceSelection,
    /// 6-field cron expression; unset means a single run
    pub schedule: Option<String>,
    #[serde(default)]
    pub tags: TagConfig,
}

fn default_tag_name() -> String {
    tags::DEFAULT_TAG_NAME.to_string()
}

/// Which instances the run iterates over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceSelection {
    /// Every instance; volumes without a resolvable frequency are skipped
    #[default]
    All,
    /// Only instances carrying the frequency tag
    Tagged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagConfig {
    #[serde(default = "default_management_key")]
    pub management_key: String,
    #[serde(default = "default_retention_key")]
    pub retention_key: String,
    #[serde(default = "default_ignore_key")]
    pub ignore_key: String,
    #[serde(default = "default_name_key")]
    pub name_key: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            management_key: default_management_key(),
            retention_key: default_retention_key(),
            ignore_key: default_ignore_key(),
            name_key: default_name_key(),
        }
    }
}

fn default_management_key() -> String {
    tags::MANAGEMENT_KEY.to_string()
}

fn default_retention_key() -> String {
    tags::RETENTION_KEY.to_string()
}

fn default_ignore_key() -> String {
    tags::IGNORE_KEY.to_string()
}

fn default_name_key() -> String {
    tags::NAME_KEY.to_string()
}

impl Config {
    pub fn management_marker(&self) -> ManagementMarker {
        ManagementMarker::new(self.tags.management_key.clone(), self.tag_name.clone())
    }

    /// `http://host:port` when a proxy host is configured
    pub fn proxy_url(&self) -> Option<String> {
        let host = self.proxy_host.as_deref().filter(|h| !h.is_empty())?;
        let with_scheme = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        Some(match self.proxy_port {
            Some(port) => format!("{}:{}", with_scheme, port),
            None => with_scheme,
        })
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notification_channel
            .as_deref()
            .map(|c| !c.is_empty())
            .unwrap_or(false)
    }
}
