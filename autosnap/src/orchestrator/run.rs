// File: autosnap/src/orchestrator/run.rs
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::summary::{PruneResult, RunSummary, VolumeDisposition, VolumeOutcome};
use crate::config::{Config, InstanceSelection, TagConfig};
use crate::inventory::{
    Instance, InventoryProvider, ManagementMarker, Snapshot, SnapshotProvider, TagSet, Volume,
};
use crate::policy::{PolicyDecision, PolicyResolver, VolumePolicy};
use crate::services::{notification_subjects, NotificationSink};
use crate::snapshot::{
    identity_tags, is_due, managed_only, select_for_deletion, snapshot_description, snapshot_name,
};

/// Walks instances and volumes one at a time, applying the policy of each
/// volume. Failures are contained per volume; a run always completes.
pub struct RunOrchestrator {
    inventory: Arc<dyn InventoryProvider>,
    snapshots: Arc<dyn SnapshotProvider>,
    notifier: Option<(Arc<dyn NotificationSink>, String)>,
    resolver: PolicyResolver,
    marker: ManagementMarker,
    tag_config: TagConfig,
    selection: InstanceSelection,
    dry_run: bool,
}

/// Identifies a volume in log lines
struct VolumeContext<'a> {
    instance: &'a Instance,
    volume: &'a Volume,
    name: String,
}

impl VolumeContext<'_> {
    fn prefix(&self) -> String {
        format!("{}/{}", self.instance.id, self.volume.id)
    }

    fn prefix_with(&self, snapshot_id: &str) -> String {
        format!("{}/{}/{}", self.instance.id, self.volume.id, snapshot_id)
    }

    fn label(&self) -> String {
        format!("{} on {}", self.volume.mount_point(), self.name)
    }
}

impl RunOrchestrator {
    pub fn new(
        config: &Config,
        inventory: Arc<dyn InventoryProvider>,
        snapshots: Arc<dyn SnapshotProvider>,
    ) -> Self {
        Self {
            inventory,
            snapshots,
            notifier: None,
            resolver: PolicyResolver::from_config(config),
            marker: config.management_marker(),
            tag_config: config.tags.clone(),
            selection: config.instance_selection,
            dry_run: config.dry_run,
        }
    }

    pub fn with_notifier(mut self, sink: Arc<dyn NotificationSink>, channel_id: String) -> Self {
        self.notifier = Some((sink, channel_id));
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Perform one full pass. `now` drives every due-for-snapshot check.
    pub async fn run(&self, now: DateTime<Utc>) -> RunSummary {
        let run_id = Uuid::new_v4();
        self.run_all(now)
            .instrument(info_span!("snapshot_run", %run_id))
            .await
    }

    async fn run_all(&self, now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary::default();
        if self.dry_run {
            note(&mut summary, "Initializing snapshot dry run".to_string());
        } else {
            note(&mut summary, "Initializing snapshot process".to_string());
        }

        let tag_filter = match self.selection {
            InstanceSelection::All => None,
            InstanceSelection::Tagged => Some(self.resolver.frequency_key()),
        };

        let instances = match self.inventory.list_instances(tag_filter).await {
            Ok(instances) => instances,
            Err(e) => {
                fail(&mut summary, format!("Error listing instances: {}", e));
                Vec::new()
            }
        };
        debug!("Found {} instances", instances.len());

        for instance in &instances {
            let volumes = match self.inventory.list_volumes(&instance.id).await {
                Ok(volumes) => volumes,
                Err(e) => {
                    fail(
                        &mut summary,
                        format!("{}: Error listing volumes for instance: {}", instance.id, e),
                    );
                    continue;
                }
            };

            for volume in &volumes {
                let outcome = self.process_volume(instance, volume, now, &mut summary).await;
                summary.absorb(&outcome);
            }
        }

        for line in summary.summary_lines() {
            note(&mut summary, line);
        }

        self.notify(&mut summary).await;
        summary
    }

    async fn process_volume(
        &self,
        instance: &Instance,
        volume: &Volume,
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> VolumeOutcome {
        let ctx = VolumeContext {
            instance,
            volume,
            name: snapshot_name(instance, volume, &self.tag_config.name_key),
        };

        let policy = match self.resolver.resolve(instance, volume) {
            Ok(PolicyDecision::Apply(policy)) => policy,
            Ok(PolicyDecision::Ignore) => {
                note(
                    summary,
                    format!(
                        "{}: Ignoring volume, '{}' tag present ({})",
                        ctx.prefix(),
                        self.tag_config.ignore_key,
                        ctx.label()
                    ),
                );
                return VolumeOutcome::without_prune(VolumeDisposition::Ignored);
            }
            Ok(PolicyDecision::Exclude) => {
                debug!(
                    "{}: Skipping volume, no snapshot frequency ({})",
                    ctx.prefix(),
                    ctx.label()
                );
                return VolumeOutcome::without_prune(VolumeDisposition::SkippedNoPolicy);
            }
            Err(e) => {
                fail(summary, format!("{}: {}", ctx.prefix(), e));
                return VolumeOutcome::without_prune(VolumeDisposition::Misconfigured);
            }
        };

        let disposition = match self.snapshots.list_snapshots(&volume.id, &self.marker).await {
            Ok(existing) => {
                let existing = managed_only(existing, &self.marker);
                if is_due(&existing, policy.frequency_hours, now) {
                    self.create_snapshot(&ctx, &policy, now, summary).await
                } else {
                    note(
                        summary,
                        format!(
                            "{}: Skipping volume, last snapshot not old enough ({})",
                            ctx.prefix(),
                            ctx.label()
                        ),
                    );
                    VolumeDisposition::SkippedNotDue
                }
            }
            Err(e) => {
                fail(
                    summary,
                    format!("{}: Error creating snapshot for volume: {}", ctx.prefix(), e),
                );
                VolumeDisposition::CreateFailed
            }
        };

        // A dry-run creation still occupies a retention slot
        let planned_at = (self.dry_run && disposition == VolumeDisposition::Created).then_some(now);

        let prune = self.prune_snapshots(&ctx, &policy, planned_at, summary).await;
        if prune.failed {
            warn!(
                "{}: Pruning incomplete, {} snapshot(s) deleted ({})",
                ctx.prefix(),
                prune.deleted,
                ctx.label()
            );
        }

        VolumeOutcome { disposition, prune }
    }

    async fn create_snapshot(
        &self,
        ctx: &VolumeContext<'_>,
        policy: &VolumePolicy,
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> VolumeDisposition {
        if self.dry_run {
            note(
                summary,
                format!("{}: [dry run] Creating snapshot ({})", ctx.prefix(), ctx.label()),
            );
            return VolumeDisposition::Created;
        }

        let description =
            snapshot_description(&ctx.name, ctx.volume.mount_point(), now.with_timezone(&Local));

        let snapshot = match self
            .snapshots
            .create_snapshot(&ctx.volume.id, &description)
            .await
        {
            Ok(snapshot) => snapshot,
            Err(e) => {
                fail(
                    summary,
                    format!("{}: Error creating snapshot for volume: {}", ctx.prefix(), e),
                );
                return VolumeDisposition::CreateFailed;
            }
        };

        note(
            summary,
            format!(
                "{}: Creating snapshot ({})",
                ctx.prefix_with(&snapshot.id),
                ctx.label()
            ),
        );

        let tags = identity_tags(
            &ctx.name,
            &self.marker,
            &self.tag_config,
            ctx.instance,
            ctx.volume,
            Some(policy.frequency_hours),
        );
        if let Err(e) = self.snapshots.tag_resource(&snapshot.id, &tags).await {
            fail(
                summary,
                format!("{}: Error tagging snapshot: {}", ctx.prefix_with(&snapshot.id), e),
            );
        }

        VolumeDisposition::Created
    }

    /// Re-reads the managed snapshots, so a snapshot created moments ago
    /// counts toward retention. `planned_at` stands in for the snapshot a
    /// dry run would have created; it is counted, never deleted.
    async fn prune_snapshots(
        &self,
        ctx: &VolumeContext<'_>,
        policy: &VolumePolicy,
        planned_at: Option<DateTime<Utc>>,
        summary: &mut RunSummary,
    ) -> PruneResult {
        let mut result = PruneResult::default();

        let mut current = match self.snapshots.list_snapshots(&ctx.volume.id, &self.marker).await {
            Ok(snapshots) => managed_only(snapshots, &self.marker),
            Err(e) => {
                fail(
                    summary,
                    format!("{}: Error cleaning old snapshots for volume: {}", ctx.prefix(), e),
                );
                result.failed = true;
                return result;
            }
        };

        if let Some(created_at) = planned_at {
            current.push(planned_snapshot(&ctx.volume.id, &self.marker, created_at));
        }

        for snapshot in select_for_deletion(&current, policy.retention_count) {
            if self.dry_run {
                note(
                    summary,
                    format!(
                        "{}: [dry run] Deleting snapshot ({})",
                        ctx.prefix_with(&snapshot.id),
                        ctx.label()
                    ),
                );
                result.deleted += 1;
                continue;
            }

            note(
                summary,
                format!(
                    "{}: Deleting snapshot ({})",
                    ctx.prefix_with(&snapshot.id),
                    ctx.label()
                ),
            );
            match self.snapshots.delete_snapshot(&snapshot.id).await {
                Ok(()) => result.deleted += 1,
                Err(e) => {
                    fail(
                        summary,
                        format!(
                            "{}: Error deleting snapshot: {}",
                            ctx.prefix_with(&snapshot.id),
                            e
                        ),
                    );
                    result.failed = true;
                }
            }
        }

        result
    }

    async fn notify(&self, summary: &mut RunSummary) {
        let Some((sink, channel_id)) = &self.notifier else {
            return;
        };

        let body = summary.report_text();
        for subject in notification_subjects(summary, self.dry_run) {
            match sink.publish(channel_id, &body, subject).await {
                Ok(()) => summary.notifications_sent += 1,
                Err(e) => warn!("Failed to publish '{}' notification: {}", subject, e),
            }
        }
    }
}

/// Placeholder for the snapshot a dry run skipped creating
fn planned_snapshot(volume_id: &str, marker: &ManagementMarker, created_at: DateTime<Utc>) -> Snapshot {
    Snapshot {
        id: "(planned)".to_string(),
        volume_id: volume_id.to_string(),
        created_at,
        tags: TagSet::new().with(marker.key.clone(), marker.value.clone()),
    }
}

fn note(summary: &mut RunSummary, line: String) {
    info!("{}", line);
    summary.note(line);
}

fn fail(summary: &mut RunSummary, line: String) {
    error!("{}", line);
    summary.record_error(line);
}
