// File: autosnap/src/scheduler/runner.rs
use anyhow::{anyhow, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, instrument, warn};

use crate::orchestrator::RunOrchestrator;

pub struct SnapshotScheduler {
    orchestrator: Arc<RunOrchestrator>,
    scheduler: JobScheduler,
    in_progress: Arc<Mutex<()>>,
}

impl SnapshotScheduler {
    pub async fn new(orchestrator: Arc<RunOrchestrator>) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            orchestrator,
            scheduler,
            in_progress: Arc::new(Mutex::new(())),
        })
    }

    #[instrument(skip(self))]
    pub async fn start(&self, schedule: &str) -> Result<()> {
        validate_6_field_cron(schedule)
            .map_err(|e| anyhow!("Invalid 6-field cron schedule '{}': {}", schedule, e))?;

        let orchestrator = self.orchestrator.clone();
        let in_progress = self.in_progress.clone();

        let job = Job::new_async(schedule, move |_uuid, _scheduler| {
            let orchestrator = orchestrator.clone();
            let in_progress = in_progress.clone();

            Box::pin(async move {
                let Ok(_guard) = in_progress.try_lock_owned() else {
                    warn!("Previous snapshot run still in progress, skipping this tick");
                    return;
                };

                info!(
                    "Executing scheduled snapshot run (dry run: {})",
                    orchestrator.is_dry_run()
                );
                let summary = orchestrator.run(Utc::now()).await;
                info!(
                    "Scheduled snapshot run finished: {} created, {} deleted, {} errors",
                    summary.created, summary.deleted, summary.errors
                );
            })
        })
        .map_err(|e| anyhow!("Failed to create snapshot job for '{}': {}", schedule, e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to add snapshot job to scheduler: {}", e))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| anyhow!("Failed to start scheduler: {}", e))?;

        info!("Snapshot scheduler started with schedule '{}'", schedule);
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<()> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| anyhow!("Failed to stop scheduler: {}", e))?;
        info!("Snapshot scheduler stopped");
        Ok(())
    }
}

pub fn validate_6_field_cron(schedule: &str) -> Result<()> {
    let parts: Vec<&str> = schedule.split_whitespace().collect();

    if parts.len() != 6 {
        return Err(anyhow!(
            "tokio-cron-scheduler requires exactly 6 fields: second minute hour day month dayofweek. Got {} fields: '{}'",
            parts.len(),
            schedule
        ));
    }

    validate_cron_field(parts[0], "second", 0, 59)?;
    validate_cron_field(parts[1], "minute", 0, 59)?;
    validate_cron_field(parts[2], "hour", 0, 23)?;
    validate_cron_field(parts[3], "day", 1, 31)?;
    validate_cron_field(parts[4], "month", 1, 12)?;
    validate_cron_field(parts[5], "dayofweek", 0, 7)?;

    Ok(())
}

fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<()> {
    if field == "*" || field == "?" {
        return Ok(());
    }

    if let Some(step_str) = field.strip_prefix("*/") {
        let step = step_str
            .parse::<u32>()
            .map_err(|_| anyhow!("Invalid {} step value: {}", name, step_str))?;
        if step == 0 {
            return Err(anyhow!("{} step value cannot be 0", name));
        }
        return Ok(());
    }

    for part in field.split(',') {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_in_range(start, name, min, max)?;
                let end = parse_in_range(end, name, min, max)?;
                if start > end {
                    return Err(anyhow!("{} range {}-{} is reversed", name, start, end));
                }
            }
            None => {
                parse_in_range(part, name, min, max)?;
            }
        }
    }

    Ok(())
}

fn parse_in_range(value: &str, name: &str, min: u32, max: u32) -> Result<u32> {
    let parsed = value
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))?;
    if parsed < min || parsed > max {
        return Err(anyhow!(
            "{} value {} is outside valid range {}-{}",
            name,
            parsed,
            min,
            max
        ));
    }
    Ok(parsed)
}
