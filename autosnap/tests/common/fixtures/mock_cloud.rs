//! In-memory inventory and snapshot provider
//!
//! Records every call so tests can assert exactly which side effects a run
//! produced. Failures can be injected per volume or per snapshot.
//! `list_snapshots` deliberately ignores the marker filter, so callers'
//! own filtering is exercised.

use async_trait::async_trait;
use autosnap::errors::ProviderError;
use autosnap::inventory::{
    Instance, InventoryProvider, ManagementMarker, Snapshot, SnapshotProvider, TagSet, Volume,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudCall {
    ListInstances(Option<String>),
    ListVolumes(String),
    ListSnapshots(String),
    CreateSnapshot { volume_id: String, description: String },
    DeleteSnapshot(String),
    TagResource { resource_id: String, tags: TagSet },
}

impl CloudCall {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            CloudCall::CreateSnapshot { .. } | CloudCall::DeleteSnapshot(_) | CloudCall::TagResource { .. }
        )
    }
}

#[derive(Default)]
struct CloudState {
    instances: Vec<Instance>,
    volumes: Vec<Volume>,
    snapshots: Vec<Snapshot>,
    calls: Vec<CloudCall>,
    fail_create: HashSet<String>,
    fail_delete: HashSet<String>,
    fail_list: HashSet<String>,
    fail_tag: bool,
    fail_instances: bool,
    fail_volumes: HashSet<String>,
    next_id: u32,
    clock: Option<DateTime<Utc>>,
}

pub struct MockCloud {
    state: Mutex<CloudState>,
}

impl MockCloud {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CloudState::default()),
        }
    }

    /// Timestamp given to snapshots created through the provider
    pub fn with_clock(self, now: DateTime<Utc>) -> Self {
        self.state.lock().unwrap().clock = Some(now);
        self
    }

    pub fn with_instance(self, id: &str, tags: TagSet) -> Self {
        self.state.lock().unwrap().instances.push(Instance {
            id: id.to_string(),
            tags,
        });
        self
    }

    pub fn with_volume(self, instance_id: &str, volume_id: &str, tags: TagSet) -> Self {
        self.state.lock().unwrap().volumes.push(Volume {
            id: volume_id.to_string(),
            instance_id: instance_id.to_string(),
            device: Some("/dev/sda1".to_string()),
            tags,
        });
        self
    }

    pub fn with_snapshot(self, volume_id: &str, snapshot_id: &str, created_at: DateTime<Utc>, tags: TagSet) -> Self {
        self.state.lock().unwrap().snapshots.push(Snapshot {
            id: snapshot_id.to_string(),
            volume_id: volume_id.to_string(),
            created_at,
            tags,
        });
        self
    }

    pub fn failing_create_for(self, volume_id: &str) -> Self {
        self.state.lock().unwrap().fail_create.insert(volume_id.to_string());
        self
    }

    pub fn failing_delete_for(self, snapshot_id: &str) -> Self {
        self.state.lock().unwrap().fail_delete.insert(snapshot_id.to_string());
        self
    }

    pub fn failing_list_for(self, volume_id: &str) -> Self {
        self.state.lock().unwrap().fail_list.insert(volume_id.to_string());
        self
    }

    pub fn failing_volumes_for(self, instance_id: &str) -> Self {
        self.state.lock().unwrap().fail_volumes.insert(instance_id.to_string());
        self
    }

    pub fn failing_tags(self) -> Self {
        self.state.lock().unwrap().fail_tag = true;
        self
    }

    pub fn failing_instances(self) -> Self {
        self.state.lock().unwrap().fail_instances = true;
        self
    }

    pub fn calls(&self) -> Vec<CloudCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<CloudCall> {
        self.calls().into_iter().filter(CloudCall::is_mutating).collect()
    }

    pub fn created_volumes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                CloudCall::CreateSnapshot { volume_id, .. } => Some(volume_id),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                CloudCall::DeleteSnapshot(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn snapshot_ids_for(&self, volume_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .snapshots
            .iter()
            .filter(|s| s.volume_id == volume_id)
            .map(|s| s.id.clone())
            .collect()
    }

    fn record(&self, call: CloudCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl Default for MockCloud {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(operation: &str, target: &str) -> ProviderError {
    ProviderError::Rejected {
        operation: operation.to_string(),
        status: 500,
        message: format!("injected failure for {}", target),
    }
}

#[async_trait]
impl InventoryProvider for MockCloud {
    async fn list_instances(&self, tag_filter: Option<&str>) -> Result<Vec<Instance>, ProviderError> {
        self.record(CloudCall::ListInstances(tag_filter.map(str::to_string)));
        let state = self.state.lock().unwrap();
        if state.fail_instances {
            return Err(injected("list_instances", "inventory"));
        }
        Ok(state
            .instances
            .iter()
            .filter(|i| tag_filter.map(|t| i.tags.contains(t)).unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn list_volumes(&self, instance_id: &str) -> Result<Vec<Volume>, ProviderError> {
        self.record(CloudCall::ListVolumes(instance_id.to_string()));
        let state = self.state.lock().unwrap();
        if state.fail_volumes.contains(instance_id) {
            return Err(injected("list_volumes", instance_id));
        }
        Ok(state
            .volumes
            .iter()
            .filter(|v| v.instance_id == instance_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SnapshotProvider for MockCloud {
    async fn list_snapshots(
        &self,
        volume_id: &str,
        _marker: &ManagementMarker,
    ) -> Result<Vec<Snapshot>, ProviderError> {
        self.record(CloudCall::ListSnapshots(volume_id.to_string()));
        let state = self.state.lock().unwrap();
        if state.fail_list.contains(volume_id) {
            return Err(injected("list_snapshots", volume_id));
        }
        Ok(state
            .snapshots
            .iter()
            .filter(|s| s.volume_id == volume_id)
            .cloned()
            .collect())
    }

    async fn create_snapshot(&self, volume_id: &str, description: &str) -> Result<Snapshot, ProviderError> {
        self.record(CloudCall::CreateSnapshot {
            volume_id: volume_id.to_string(),
            description: description.to_string(),
        });
        let mut state = self.state.lock().unwrap();
        if state.fail_create.contains(volume_id) {
            return Err(injected("create_snapshot", volume_id));
        }
        state.next_id += 1;
        let snapshot = Snapshot {
            id: format!("snap-new-{}", state.next_id),
            volume_id: volume_id.to_string(),
            created_at: state.clock.unwrap_or_else(Utc::now),
            tags: TagSet::new(),
        };
        state.snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), ProviderError> {
        self.record(CloudCall::DeleteSnapshot(snapshot_id.to_string()));
        let mut state = self.state.lock().unwrap();
        if state.fail_delete.contains(snapshot_id) {
            return Err(injected("delete_snapshot", snapshot_id));
        }
        state.snapshots.retain(|s| s.id != snapshot_id);
        Ok(())
    }

    async fn tag_resource(&self, resource_id: &str, tags: &TagSet) -> Result<(), ProviderError> {
        self.record(CloudCall::TagResource {
            resource_id: resource_id.to_string(),
            tags: tags.clone(),
        });
        let mut state = self.state.lock().unwrap();
        if state.fail_tag {
            return Err(injected("tag_resource", resource_id));
        }
        if let Some(snapshot) = state.snapshots.iter_mut().find(|s| s.id == resource_id) {
            for (key, value) in tags.iter() {
                snapshot.tags.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }
}
