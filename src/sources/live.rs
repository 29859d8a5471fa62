//! Live region source over the Windows shared memory mapping.

use crate::error::Result;
use crate::source::RegionSource;
use crate::windows::Connection;

/// [`RegionSource`] backed by the game's live memory mappings.
pub struct LiveSource {
    connection: Connection,
}

impl LiveSource {
    /// Map all three regions and wrap them as a source.
    pub fn open() -> Result<Self> {
        Ok(Self { connection: Connection::open()? })
    }
}

impl RegionSource for LiveSource {
    fn physics_packet_id(&mut self) -> Result<i32> {
        Ok(self.connection.physics_packet_id())
    }

    fn read_physics(&mut self, buf: &mut [u8]) -> Result<()> {
        self.connection.read_physics(buf)
    }

    fn read_graphics(&mut self, buf: &mut [u8]) -> Result<()> {
        self.connection.read_graphics(buf)
    }

    fn read_static(&mut self, buf: &mut [u8]) -> Result<()> {
        self.connection.read_static(buf)
    }
}
