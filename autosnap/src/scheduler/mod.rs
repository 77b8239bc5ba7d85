//! Cron-based repetition of snapshot runs
//!
//! Without a `schedule` the binary performs a single run and exits, which
//! suits an external cron or systemd timer. With a schedule the process
//! stays up and runs on every tick.
//!
//! # Configuration
//!
//! ```toml
//! schedule = "0 0 * * * *"  # Every hour, on the hour
//! ```
//!
//! Uses 6-field cron expressions (sec min hour day month dow). A tick that
//! fires while the previous run is still in progress is skipped.

pub mod runner;

pub use runner::{validate_6_field_cron, SnapshotScheduler};
