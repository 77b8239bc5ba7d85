//! Application-wide constants for tag names, timing buffers and client limits
//!
//! This module organizes constants by category so the decision engine,
//! the HTTP clients and the configuration defaults share one source of truth.

use std::time::Duration;

/// Scheduling constants used by the due-for-snapshot check
pub mod schedule {
    /// Seconds subtracted from the frequency window so a slightly early run
    /// still takes its snapshot instead of slipping a whole cycle
    pub const EARLY_RUN_BUFFER_SECONDS: i64 = 300;

    /// Seconds per hour of configured frequency
    pub const SECONDS_PER_HOUR: i64 = 3600;
}

/// Default tag keys read from instances and volumes, and written to snapshots
pub mod tags {
    /// Frequency tag key and management marker value
    pub const DEFAULT_TAG_NAME: &str = "autosnap";

    /// Key of the management marker on snapshots created by this job
    pub const MANAGEMENT_KEY: &str = "snapshot_type";

    /// Retention override on an instance or volume
    pub const RETENTION_KEY: &str = "autosnap_retention";

    /// Presence on a volume suppresses all processing
    pub const IGNORE_KEY: &str = "autosnap_ignore";

    /// Human-readable name tag
    pub const NAME_KEY: &str = "Name";

    pub const INSTANCE_ID_KEY: &str = "instance_id";
    pub const VOLUME_ID_KEY: &str = "volume_id";
    pub const MOUNT_POINT_KEY: &str = "mount_point";
    pub const FREQUENCY_KEY: &str = "snapshot_frequency";

    /// Written to the frequency tag when no frequency was resolved
    pub const NULL_VALUE: &str = "null";
}

/// HTTP client constants
pub mod http {
    use super::Duration;

    /// Timeout for inventory and snapshot API requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Header carrying the configured region identity
    pub const REGION_HEADER: &str = "X-Region";
}

/// Notification constants
pub mod notifications {
    /// Webhook request timeout
    pub const WEBHOOK_TIMEOUT_SECONDS: u64 = 10;

    pub const ERROR_SUBJECT: &str = "Error with snapshot run";
    pub const FINISHED_SUBJECT: &str = "Finished snapshotting";
}

/// Default configuration values
pub mod defaults {
    /// Config file read when `AUTOSNAP_CONFIG` is not set
    pub const CONFIG_PATH: &str = "config/autosnap.toml";

    /// Prefix of environment variables overriding config keys
    pub const ENV_PREFIX: &str = "AUTOSNAP_";

    /// Default log filter directive
    pub const LOG_DIRECTIVE: &str = "autosnap=info";
}
