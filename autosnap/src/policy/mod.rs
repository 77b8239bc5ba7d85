//! Per-volume snapshot policy resolution
//!
//! Frequency and retention are read from tags, most specific first:
//!
//! ```text
//! volume tag  →  instance tag  →  global default
//! ```
//!
//! A volume carrying the ignore tag is never touched, whatever else it is
//! tagged with. A volume with no frequency (or frequency `0`) is skipped.

pub mod resolver;

pub use resolver::{PolicyDecision, PolicyDefaults, PolicyResolver, VolumePolicy};
