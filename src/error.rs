//! Error types for telemetry processing.
//!
//! All errors implement the `std::error::Error` trait and carry enough
//! structured context to tell a layout/decode problem apart from a liveness
//! problem or a protocol desynchronization.
//!
//! ## Error Categories
//!
//! - **Decode Errors**: a region buffer did not match the frozen byte layout
//! - **Unknown Enum Values**: an enumerated field held an unrecognized integer
//! - **Liveness Errors**: the game has not initialized its shared memory
//! - **Protocol Errors**: the reader/consumer exchange lost its ordering
//! - **Windows API Errors**: platform-specific mapping failures

use std::time::Duration;
use thiserror::Error;

use crate::schema::Region;

#[cfg(windows)]
use windows_core as core;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("Decode error in {region} region at field '{field}': {details}")]
    Decode { region: Region, field: &'static str, details: String },

    #[error("Unrecognized value {value} for enum field '{field}' in {region} region")]
    UnknownEnumValue { region: Region, field: &'static str, value: i32 },

    #[error("Shared memory is not live: the game has not initialized its pages")]
    NotLive,

    #[error("Protocol desynchronization: expected {expected}, received {received}")]
    Protocol { expected: &'static str, received: String },

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Handoff channel failure: {context}")]
    Handoff { context: String },

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },

    #[error("Windows API error: {operation}")]
    #[cfg(windows)]
    WindowsApi {
        operation: String,
        #[source]
        source: core::Error,
    },
}

impl TelemetryError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::Decode { .. } => true,
            TelemetryError::UnknownEnumValue { .. } => true,
            TelemetryError::NotLive => true,
            TelemetryError::Timeout { .. } => true,
            TelemetryError::Protocol { .. } => false,
            TelemetryError::Handoff { .. } => false,
            TelemetryError::UnsupportedPlatform { .. } => false,
            #[cfg(windows)]
            TelemetryError::WindowsApi { .. } => true,
        }
    }

    /// Helper constructor for decode errors with region and field context.
    pub fn decode(region: Region, field: &'static str, details: impl Into<String>) -> Self {
        TelemetryError::Decode { region, field, details: details.into() }
    }

    /// Helper constructor for unrecognized enum values.
    pub fn unknown_enum(region: Region, field: &'static str, value: i32) -> Self {
        TelemetryError::UnknownEnumValue { region, field, value }
    }

    /// Helper constructor for protocol desynchronization errors.
    pub fn protocol(expected: &'static str, received: impl Into<String>) -> Self {
        TelemetryError::Protocol { expected, received: received.into() }
    }

    /// Helper constructor for handoff channel failures.
    pub fn handoff(context: impl Into<String>) -> Self {
        TelemetryError::Handoff { context: context.into() }
    }

    /// Helper constructor for Windows API errors.
    #[cfg(windows)]
    pub fn windows_api_error(operation: impl Into<String>, source: core::Error) -> Self {
        TelemetryError::WindowsApi { operation: operation.into(), source }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        TelemetryError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}
