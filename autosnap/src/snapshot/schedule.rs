// File: autosnap/src/snapshot/schedule.rs
use chrono::{DateTime, Utc};

use crate::constants::schedule::{EARLY_RUN_BUFFER_SECONDS, SECONDS_PER_HOUR};
use crate::inventory::Snapshot;

/// Whether a volume needs a new snapshot at `now`.
///
/// `snapshots` must already be restricted to managed snapshots of the
/// volume. With no history the first snapshot is always due. Otherwise the
/// newest snapshot must be older than the frequency window minus
/// [`EARLY_RUN_BUFFER_SECONDS`].
pub fn is_due(snapshots: &[Snapshot], frequency_hours: u64, now: DateTime<Utc>) -> bool {
    let Some(latest) = snapshots.iter().max_by_key(|s| s.created_at) else {
        return true;
    };

    let elapsed = (now - latest.created_at).num_seconds();
    elapsed > due_threshold_seconds(frequency_hours)
}

/// Seconds that must have passed since the last snapshot
pub fn due_threshold_seconds(frequency_hours: u64) -> i64 {
    i64::try_from(frequency_hours)
        .unwrap_or(i64::MAX)
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_sub(EARLY_RUN_BUFFER_SECONDS)
}
