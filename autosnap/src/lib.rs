pub mod config;
pub mod constants;
pub mod errors;
pub mod http;
pub mod inventory;
pub mod logging;
pub mod orchestrator;
pub mod policy;
pub mod scheduler;
pub mod services;
pub mod snapshot;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use http::HttpCloudClient;
pub use orchestrator::{RunOrchestrator, RunSummary};
pub use policy::PolicyResolver;
pub use services::{NotificationSink, WebhookNotifier};
