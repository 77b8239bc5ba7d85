// File: autosnap/src/orchestrator/summary.rs
use serde::{Deserialize, Serialize};

/// What happened to one volume before pruning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeDisposition {
    Ignored,
    SkippedNoPolicy,
    /// Frequency resolved but no retention count could be found
    Misconfigured,
    Created,
    SkippedNotDue,
    CreateFailed,
}

impl VolumeDisposition {
    /// Volumes that reached the due check
    pub fn is_processed(&self) -> bool {
        matches!(
            self,
            VolumeDisposition::Created | VolumeDisposition::SkippedNotDue | VolumeDisposition::CreateFailed
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneResult {
    pub deleted: u32,
    /// Listing or at least one deletion failed
    pub failed: bool,
}

/// Per-volume record, folded into the [`RunSummary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeOutcome {
    pub disposition: VolumeDisposition,
    pub prune: PruneResult,
}

impl VolumeOutcome {
    pub fn without_prune(disposition: VolumeDisposition) -> Self {
        Self {
            disposition,
            prune: PruneResult::default(),
        }
    }
}

/// Counters and report text for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub processed: u32,
    pub ignored: u32,
    pub skipped_policy: u32,
    pub skipped_frequency: u32,
    /// Volumes whose pruning did not complete
    pub prune_failures: u32,
    pub created: u32,
    pub deleted: u32,
    pub errors: u32,
    pub error_details: Vec<String>,
    /// Every line the run logged, in order; used as the notification body
    pub report: Vec<String>,
    pub notifications_sent: u32,
}

impl RunSummary {
    pub fn absorb(&mut self, outcome: &VolumeOutcome) {
        if outcome.disposition.is_processed() {
            self.processed += 1;
        }
        match outcome.disposition {
            VolumeDisposition::Ignored => self.ignored += 1,
            VolumeDisposition::SkippedNoPolicy => self.skipped_policy += 1,
            VolumeDisposition::SkippedNotDue => self.skipped_frequency += 1,
            VolumeDisposition::Created => self.created += 1,
            VolumeDisposition::Misconfigured | VolumeDisposition::CreateFailed => {}
        }
        self.deleted += outcome.prune.deleted;
        if outcome.prune.failed {
            self.prune_failures += 1;
        }
    }

    pub fn note(&mut self, line: String) {
        self.report.push(line);
    }

    pub fn record_error(&mut self, line: String) {
        self.errors += 1;
        self.error_details.push(line.clone());
        self.report.push(line);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Snapshots created plus snapshots deleted
    pub fn changes(&self) -> u32 {
        self.created + self.deleted
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            "Finished processing snapshots".to_string(),
            format!("Volumes processed: {}", self.processed),
            format!("Volumes ignored: {}", self.ignored),
            format!("Volumes skipped (frequency): {}", self.skipped_frequency),
            format!("Volumes skipped (missing tag): {}", self.skipped_policy),
            format!("Snapshots created: {}", self.created),
            format!("Snapshots deleted: {}", self.deleted),
            format!("Errors: {}", self.errors),
        ]
    }

    pub fn report_text(&self) -> String {
        let mut text = self.report.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}
