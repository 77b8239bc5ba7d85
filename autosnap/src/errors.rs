//! Custom error types for the snapshot job
//!
//! Provides structured error handling with context for the failure
//! scenarios a run has to tell apart: bad configuration, failed provider
//! calls and volumes whose policy cannot be resolved.

use std::fmt;

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// Provider call error variants
#[derive(Debug)]
pub enum ProviderError {
    /// Request could not be sent or no response arrived
    RequestFailed { operation: String, reason: String },

    /// Provider answered with a non-success status
    Rejected {
        operation: String,
        status: u16,
        message: String,
    },

    /// Response body did not match the expected shape
    InvalidResponse { operation: String, reason: String },
}

/// Policy resolution error variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// No positive retention count on the volume, the instance or the global default
    NoRetention { volume_id: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::RequestFailed { operation, reason } => {
                write!(f, "{} request failed: {}", operation, reason)
            }
            ProviderError::Rejected {
                operation,
                status,
                message,
            } => {
                write!(f, "{} rejected with status {}: {}", operation, status, message)
            }
            ProviderError::InvalidResponse { operation, reason } => {
                write!(f, "Invalid response for {}: {}", operation, reason)
            }
        }
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::NoRetention { volume_id } => {
                write!(
                    f,
                    "No valid retention count for volume '{}' (volume tag, instance tag and global default all missing or invalid)",
                    volume_id
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for ProviderError {}
impl std::error::Error for PolicyError {}
