//! Seam between the change detector and the platform memory mapping.

use crate::error::Result;

/// Provider of raw region bytes.
///
/// Implementations copy region contents into caller-owned buffers; nothing
/// downstream ever holds a reference into the live mapping the game is
/// rewriting. The only other requirement is a cheap read of the physics
/// packet identifier so the poll loop can skip full copies when nothing
/// changed.
///
/// Reads are memcpy-scale, so the trait is synchronous; the reader task calls
/// it between cooperative await points.
pub trait RegionSource: Send + 'static {
    /// Read just the leading packet identifier of the physics region.
    fn physics_packet_id(&mut self) -> Result<i32>;

    /// Copy the full physics region into `buf` (must be the region's size).
    fn read_physics(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Copy the full graphics region into `buf` (must be the region's size).
    fn read_graphics(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Copy the full static region into `buf` (must be the region's size).
    fn read_static(&mut self, buf: &mut [u8]) -> Result<()>;
}
