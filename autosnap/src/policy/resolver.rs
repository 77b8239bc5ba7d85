// File: autosnap/src/policy/resolver.rs
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::PolicyError;
use crate::inventory::{Instance, TagSet, Volume};

/// Global fallbacks at the bottom of each resolution chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyDefaults {
    pub frequency_hours: Option<u64>,
    pub retention_count: Option<u32>,
}

/// Effective per-volume policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePolicy {
    pub frequency_hours: u64,
    pub retention_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Ignore tag present on the volume
    Ignore,
    /// No usable frequency anywhere in the chain, or it resolved to 0
    Exclude,
    Apply(VolumePolicy),
}

/// Resolves frequency and retention through volume → instance → global
/// chains. The two chains are independent of each other.
#[derive(Debug, Clone)]
pub struct PolicyResolver {
    frequency_key: String,
    retention_key: String,
    ignore_key: String,
    defaults: PolicyDefaults,
}

impl PolicyResolver {
    pub fn new(
        frequency_key: impl Into<String>,
        retention_key: impl Into<String>,
        ignore_key: impl Into<String>,
        defaults: PolicyDefaults,
    ) -> Self {
        Self {
            frequency_key: frequency_key.into(),
            retention_key: retention_key.into(),
            ignore_key: ignore_key.into(),
            defaults,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tag_name.clone(),
            config.tags.retention_key.clone(),
            config.tags.ignore_key.clone(),
            PolicyDefaults {
                frequency_hours: config.default_frequency_hours,
                retention_count: config.keep_snapshots,
            },
        )
    }

    pub fn frequency_key(&self) -> &str {
        &self.frequency_key
    }

    /// Decide how a volume is handled.
    ///
    /// The ignore tag wins over everything else, then a missing frequency
    /// excludes the volume. Only volumes that would otherwise be processed
    /// can fail with [`PolicyError::NoRetention`].
    pub fn resolve(&self, instance: &Instance, volume: &Volume) -> Result<PolicyDecision, PolicyError> {
        if volume.tags.contains(&self.ignore_key) {
            return Ok(PolicyDecision::Ignore);
        }

        let frequency_hours = match self.resolve_frequency(&instance.tags, &volume.tags) {
            Some(hours) if hours > 0 => hours,
            _ => return Ok(PolicyDecision::Exclude),
        };

        let retention_count = self
            .resolve_retention(&instance.tags, &volume.tags)
            .ok_or_else(|| PolicyError::NoRetention {
                volume_id: volume.id.clone(),
            })?;

        Ok(PolicyDecision::Apply(VolumePolicy {
            frequency_hours,
            retention_count,
        }))
    }

    /// First parsable value wins; an explicit `0` is returned as-is so the
    /// caller can exclude the volume
    pub fn resolve_frequency(&self, instance_tags: &TagSet, volume_tags: &TagSet) -> Option<u64> {
        volume_tags
            .parse::<u64>(&self.frequency_key)
            .or_else(|| instance_tags.parse::<u64>(&self.frequency_key))
            .or(self.defaults.frequency_hours)
    }

    /// First positive value wins; zero or malformed values fall through
    pub fn resolve_retention(&self, instance_tags: &TagSet, volume_tags: &TagSet) -> Option<u32> {
        let positive = |tags: &TagSet| tags.parse::<u32>(&self.retention_key).filter(|n| *n > 0);

        positive(volume_tags)
            .or_else(|| positive(instance_tags))
            .or(self.defaults.retention_count.filter(|n| *n > 0))
    }
}
