// File: autosnap/src/snapshot/mod.rs

//! Snapshot scheduling and retention decisions
//!
//! Pure functions over immutable [`Snapshot`] values. Nothing here talks to
//! the provider; the orchestrator fetches, decides with these helpers, then
//! performs the side effects.
//!
//! # Key Rules
//!
//! - **Managed only**: only snapshots carrying the management marker are
//!   considered. Manual or foreign snapshots on the same volume are never
//!   counted and never deleted.
//! - **Due check**: a volume is due when it has no managed snapshot, or the
//!   newest one is older than `frequency_hours * 3600 - 300` seconds.
//! - **Retention**: the `retention_count` newest snapshots are kept, the rest
//!   are deleted oldest first.

pub mod identity;
pub mod retention;
pub mod schedule;

pub use identity::{identity_tags, snapshot_description, snapshot_name};
pub use retention::select_for_deletion;
pub use schedule::is_due;

use crate::inventory::{ManagementMarker, Snapshot};

/// Drop every snapshot not carrying the management marker
pub fn managed_only(snapshots: Vec<Snapshot>, marker: &ManagementMarker) -> Vec<Snapshot> {
    snapshots.into_iter().filter(|s| s.is_managed(marker)).collect()
}
