// File: autosnap/src/inventory/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Key/value tags attached to an instance, volume or snapshot.
///
/// Lookups return `Option` so an absent or malformed tag is an ordinary
/// branch for the caller rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(HashMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Parse a tag value, treating unparsable values the same as missing ones
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse::<T>().ok())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Tag key/value pair identifying snapshots owned by this job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementMarker {
    pub key: String,
    pub value: String,
}

impl ManagementMarker {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, tags: &TagSet) -> bool {
        tags.get(&self.key) == Some(self.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    #[serde(default)]
    pub tags: TagSet,
}

impl Instance {
    /// `Name` tag when present, otherwise the instance id
    pub fn display_name(&self, name_key: &str) -> String {
        self.tags
            .get(name_key)
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    pub instance_id: String,
    /// Device the volume is attached as, e.g. `/dev/sda1`
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub tags: TagSet,
}

impl Volume {
    pub fn display_name(&self, name_key: &str) -> String {
        self.tags
            .get(name_key)
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn mount_point(&self) -> &str {
        self.device.as_deref().unwrap_or("unknown")
    }
}

/// Point-in-time backup of a volume as reported by the snapshot provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub volume_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: TagSet,
}

impl Snapshot {
    pub fn is_managed(&self, marker: &ManagementMarker) -> bool {
        marker.matches(&self.tags)
    }
}
