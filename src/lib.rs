//! Type-safe Rust library for Assetto Corsa Competizione shared memory
//! telemetry.
//!
//! Apexlink maps the game's three shared memory regions (physics, graphics,
//! static), decodes their frozen binary layouts into typed records, and runs
//! a background reader that detects frame changes and serves deep-copied
//! snapshots over a small command protocol.
//!
//! # Features
//!
//! - **Live Telemetry**: direct shared memory access on Windows
//! - **Type Safety**: every field decoded into a typed record, unknown
//!   enumeration values rejected before anything is published
//! - **Change Detection**: packet-identifier gating plus a duplicate-frame
//!   guard, so consumers only see genuinely new frames
//! - **Clean Shutdown**: a bounded termination handshake that releases the
//!   memory handles and cannot deadlock on undelivered data
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use apexlink::{Apexlink, Liveness};
//!
//! #[tokio::main]
//! async fn main() -> apexlink::Result<()> {
//!     let mut client = Apexlink::connect()?;
//!     if client.probe_and_start().await? == Liveness::Live {
//!         if let Some(snapshot) = client.request_snapshot().await? {
//!             println!("{} km/h", snapshot.physics.speed_kmh);
//!         }
//!     }
//!     client.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! Any [`RegionSource`] can stand in for the live mapping, so everything
//! above the platform seam runs and tests on any OS.

// Core types and error handling
mod error;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Decoding and change detection
pub mod detector;
pub mod schema;

// Reader task and its consumer handle
pub mod client;
pub mod reader;

// Region sources
mod source;
pub mod sources;

// Platform-specific modules
#[cfg(windows)]
pub mod windows;

// Core exports
pub use error::*;
pub use types::*;

pub use client::{DEFAULT_REQUEST_TIMEOUT, Liveness, TelemetryClient};
pub use detector::ChangeDetector;
pub use reader::{Command, Response};
pub use schema::Region;
pub use source::RegionSource;

#[cfg(windows)]
pub use sources::LiveSource;
#[cfg(windows)]
pub use windows::Connection as WindowsConnection;

/// Unified entry point for telemetry connections.
///
/// ```rust,no_run
/// use apexlink::Apexlink;
///
/// #[tokio::main]
/// async fn main() -> apexlink::Result<()> {
///     let mut client = Apexlink::connect()?;
///     client.probe_and_start().await?;
///     // Use client...
///     client.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Apexlink;

impl Apexlink {
    /// Connect to the game's live shared memory and spawn the reader task.
    ///
    /// # Platform
    ///
    /// The game only runs on Windows; on other platforms this returns an
    /// `UnsupportedPlatform` error. Custom [`RegionSource`] implementations
    /// work everywhere via [`TelemetryClient::spawn`].
    #[cfg(windows)]
    pub fn connect() -> Result<TelemetryClient> {
        let source = sources::LiveSource::open()?;
        Ok(TelemetryClient::spawn(source))
    }

    #[cfg(not(windows))]
    pub fn connect() -> Result<TelemetryClient> {
        Err(TelemetryError::unsupported_platform("Live shared memory telemetry", "Windows"))
    }
}
