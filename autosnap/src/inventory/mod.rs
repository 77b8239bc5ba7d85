//! Inventory model and provider contracts
//!
//! The run only ever sees immutable values (`Instance`, `Volume`,
//! `Snapshot`) handed out by the providers below. Re-querying after a
//! state change is the orchestrator's job.
//!
//! # Providers
//!
//! - [`InventoryProvider`]: instances and their attached volumes
//! - [`SnapshotProvider`]: list, create, delete and tag snapshots
//!
//! [`crate::http::HttpCloudClient`] implements both against a REST endpoint.

pub mod types;

pub use types::{Instance, ManagementMarker, Snapshot, TagSet, Volume};

use async_trait::async_trait;

use crate::errors::ProviderError;

#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// List instances, optionally restricted to those carrying `tag_filter`
    async fn list_instances(&self, tag_filter: Option<&str>) -> Result<Vec<Instance>, ProviderError>;

    /// List volumes attached to an instance
    async fn list_volumes(&self, instance_id: &str) -> Result<Vec<Volume>, ProviderError>;
}

#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// List snapshots of a volume carrying the management marker.
    ///
    /// Implementations may filter server-side; callers filter again.
    async fn list_snapshots(
        &self,
        volume_id: &str,
        marker: &ManagementMarker,
    ) -> Result<Vec<Snapshot>, ProviderError>;

    async fn create_snapshot(&self, volume_id: &str, description: &str) -> Result<Snapshot, ProviderError>;

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), ProviderError>;

    async fn tag_resource(&self, resource_id: &str, tags: &TagSet) -> Result<(), ProviderError>;
}
