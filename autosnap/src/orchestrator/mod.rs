//! Run orchestration
//!
//! One run walks every selected instance and each of its volumes in turn:
//!
//! ```text
//! resolve policy ─┬─ ignore tag      → Ignored
//!                 ├─ no frequency    → SkippedNoPolicy
//!                 ├─ no retention    → Misconfigured (error)
//!                 └─ policy ─ due? ─┬─ yes → create + tag → Created | CreateFailed
//!                                   └─ no  → SkippedNotDue
//!                                         ↓
//!                          re-list managed snapshots → prune oldest
//! ```
//!
//! Each volume yields a [`VolumeOutcome`] which is folded into the run's
//! [`RunSummary`]. At the end the summary decides which notifications go out.

pub mod run;
pub mod summary;

pub use run::RunOrchestrator;
pub use summary::{PruneResult, RunSummary, VolumeDisposition, VolumeOutcome};
