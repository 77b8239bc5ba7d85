//! This module provides reusable test utilities:
//! - In-memory cloud provider and notification sink
//! - Mock HTTP servers (inventory API, webhook)
//! - Test configuration builders
//! - Common test data

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_cloud;
pub mod mock_webhook;
pub mod test_config;

// Re-export commonly used items
pub use mock_api::MockApiServer;
pub use mock_cloud::{CloudCall, MockCloud};
pub use mock_webhook::MockWebhookServer;
pub use recording_notifier::{PublishedNotification, RecordingNotifier};
pub use test_config::{TestConfigBuilder, TestConfigFile};
pub use test_data::*;
