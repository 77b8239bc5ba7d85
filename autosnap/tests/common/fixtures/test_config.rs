//! Test configuration builder for creating test configs programmatically

use autosnap::config::{Config, ConfigManager};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
#[derive(Clone)]
pub struct TestConfigBuilder {
    region: String,
    endpoint: String,
    keep_snapshots: Option<u32>,
    default_frequency_hours: Option<u64>,
    dry_run: bool,
    instance_selection: Option<String>,
    notification: Option<(String, String)>,
    api_key: Option<String>,
    schedule: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            region: "eu-west-1".to_string(),
            endpoint: "http://localhost:9999".to_string(),
            keep_snapshots: Some(3),
            default_frequency_hours: None,
            dry_run: false,
            instance_selection: None,
            notification: None,
            api_key: None,
            schedule: None,
        }
    }

    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn keep_snapshots(mut self, keep: Option<u32>) -> Self {
        self.keep_snapshots = keep;
        self
    }

    pub fn default_frequency(mut self, hours: u64) -> Self {
        self.default_frequency_hours = Some(hours);
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    pub fn tagged_instances_only(mut self) -> Self {
        self.instance_selection = Some("tagged".to_string());
        self
    }

    pub fn notification(mut self, channel: &str, webhook_url: &str) -> Self {
        self.notification = Some((channel.to_string(), webhook_url.to_string()));
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn schedule(mut self, schedule: &str) -> Self {
        self.schedule = Some(schedule.to_string());
        self
    }

    pub fn to_toml(&self) -> String {
        let mut toml = format!(
            "region = \"{}\"\nendpoint = \"{}\"\ndry_run = {}\n",
            self.region, self.endpoint, self.dry_run
        );
        if let Some(keep) = self.keep_snapshots {
            toml.push_str(&format!("keep_snapshots = {}\n", keep));
        }
        if let Some(hours) = self.default_frequency_hours {
            toml.push_str(&format!("default_frequency_hours = {}\n", hours));
        }
        if let Some(selection) = &self.instance_selection {
            toml.push_str(&format!("instance_selection = \"{}\"\n", selection));
        }
        if let Some((channel, url)) = &self.notification {
            toml.push_str(&format!(
                "notification_channel = \"{}\"\nnotification_webhook_url = \"{}\"\n",
                channel, url
            ));
        }
        if let Some(key) = &self.api_key {
            toml.push_str(&format!("api_key = \"{}\"\n", key));
        }
        if let Some(schedule) = &self.schedule {
            toml.push_str(&format!("schedule = \"{}\"\n", schedule));
        }
        toml
    }

    /// Parse the generated TOML without consulting the environment
    pub fn build(&self) -> Config {
        ConfigManager::load_from_str(&self.to_toml(), |_| None).expect("Failed to build test config")
    }

    /// Write the generated TOML into a temp directory
    pub fn write(&self) -> TestConfigFile {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("autosnap.toml");
        fs::write(&path, self.to_toml()).expect("Failed to write autosnap.toml");
        TestConfigFile {
            _temp_dir: temp_dir,
            path,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Config file on disk; removed when dropped
pub struct TestConfigFile {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestConfigFile {
    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}
