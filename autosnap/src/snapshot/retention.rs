// File: autosnap/src/snapshot/retention.rs
use crate::inventory::Snapshot;

/// Snapshots to delete so that at most `retention_count` remain.
///
/// Returns the oldest snapshots first. The sort is stable, so snapshots
/// sharing a timestamp keep their input order. `snapshots` must already be
/// restricted to managed snapshots; anything else passed in is treated as
/// managed.
pub fn select_for_deletion(snapshots: &[Snapshot], retention_count: u32) -> Vec<Snapshot> {
    let keep = retention_count as usize;
    if snapshots.len() <= keep {
        return Vec::new();
    }

    let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
    ordered.sort_by_key(|s| s.created_at);

    let excess = snapshots.len() - keep;
    ordered.into_iter().take(excess).cloned().collect()
}
