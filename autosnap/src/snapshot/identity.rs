// File: autosnap/src/snapshot/identity.rs
use chrono::{DateTime, Local};

use crate::config::TagConfig;
use crate::constants::tags;
use crate::inventory::{Instance, ManagementMarker, TagSet, Volume};

/// `"<instance name> - <volume name>"`, each falling back to its id
pub fn snapshot_name(instance: &Instance, volume: &Volume, name_key: &str) -> String {
    format!(
        "{} - {}",
        instance.display_name(name_key),
        volume.display_name(name_key)
    )
}

pub fn snapshot_description(name: &str, mount_point: &str, at: DateTime<Local>) -> String {
    format!(
        "AUTOSNAP: {} ({}) at {}",
        name,
        mount_point,
        at.format("%d-%m-%Y %H:%M:%S")
    )
}

/// Tags assigned once to a freshly created snapshot
pub fn identity_tags(
    name: &str,
    marker: &ManagementMarker,
    tag_config: &TagConfig,
    instance: &Instance,
    volume: &Volume,
    frequency_hours: Option<u64>,
) -> TagSet {
    let frequency = frequency_hours
        .map(|h| h.to_string())
        .unwrap_or_else(|| tags::NULL_VALUE.to_string());

    TagSet::new()
        .with(tag_config.name_key.clone(), name)
        .with(marker.key.clone(), marker.value.clone())
        .with(tags::INSTANCE_ID_KEY, instance.id.clone())
        .with(tags::VOLUME_ID_KEY, volume.id.clone())
        .with(tags::MOUNT_POINT_KEY, volume.mount_point())
        .with(tags::FREQUENCY_KEY, frequency)
}
