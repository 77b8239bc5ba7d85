// File: autosnap/src/http/mod.rs
//! HTTP communication with the regional inventory/snapshot API
//!
//! # Routes
//!
//! ```text
//! GET    /instances[?tag=<key>]                          → [Instance]
//! GET    /instances/{id}/volumes                         → [Volume]
//! GET    /volumes/{id}/snapshots?tag_key=..&tag_value=.. → [Snapshot]
//! POST   /volumes/{id}/snapshots  {"description": ..}    → Snapshot
//! DELETE /snapshots/{id}
//! POST   /resources/{id}/tags     {"tags": {..}}
//! ```
//!
//! Every request carries the configured region in `X-Region` and, when an
//! API key is configured, a bearer token. Failed calls are not retried.

pub mod cloud_client;

pub use cloud_client::HttpCloudClient;
