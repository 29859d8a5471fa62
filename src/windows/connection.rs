//! Game shared memory connection.
//!
//! Maps the game's three named page-file-backed regions. The mappings are
//! created if they do not exist yet (the game does the same from its side,
//! so whoever starts first owns creation); an all-zero region therefore
//! means the game has not begun writing, which the reader's liveness probe
//! detects.

use std::ptr::NonNull;

use tracing::{debug, trace};
use windows::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE};
use windows::Win32::System::Memory::{
    CreateFileMappingW, FILE_MAP_READ, MEMORY_MAPPED_VIEW_ADDRESS, MapViewOfFile, PAGE_READWRITE,
    UnmapViewOfFile,
};
use windows::core::PCWSTR;

use crate::error::{Result, TelemetryError};
use crate::schema::Region;

/// One mapped region view.
struct MappedRegion {
    mapping: HANDLE,
    base: NonNull<u8>,
    region: Region,
}

impl MappedRegion {
    fn open(region: Region) -> Result<Self> {
        let name = region.mapping_name();
        trace!(%region, name, "Mapping shared memory region");

        // Page-file backed, create-or-open. Open succeeds with the existing
        // mapping when the game created it first.
        let mapping = unsafe {
            let wide_name = wide_string(name);
            CreateFileMappingW(
                INVALID_HANDLE_VALUE,
                None,
                PAGE_READWRITE,
                0,
                region.size() as u32,
                PCWSTR::from_raw(wide_name.as_ptr()),
            )
            .map_err(|e| TelemetryError::windows_api_error("CreateFileMappingW", e))?
        };

        let base = unsafe {
            let view = MapViewOfFile(mapping, FILE_MAP_READ, 0, 0, 0);
            match NonNull::new(view.Value as *mut u8) {
                Some(base) => base,
                None => {
                    let win_err = windows::core::Error::from_thread();
                    let _ = CloseHandle(mapping);
                    return Err(TelemetryError::windows_api_error("MapViewOfFile", win_err));
                }
            }
        };

        Ok(Self { mapping, base, region })
    }

    /// Copy the whole region out of the live view.
    ///
    /// The game rewrites the view in place with no synchronization, so a
    /// copy can be torn; the change detector's duplicate guard deals with
    /// that downstream. Nothing downstream holds a pointer into the view.
    fn read_into(&self, buf: &mut [u8]) -> Result<()> {
        let len = self.region.size();
        if buf.len() < len {
            return Err(TelemetryError::decode(
                self.region,
                "<buffer>",
                format!("destination buffer holds {} bytes, region needs {len}", buf.len()),
            ));
        }
        unsafe {
            std::ptr::copy_nonoverlapping(self.base.as_ptr(), buf.as_mut_ptr(), len);
        }
        Ok(())
    }

    /// Read just the leading packet identifier without copying the region.
    fn peek_i32(&self) -> i32 {
        // The view is page aligned, so the leading i32 is aligned too
        unsafe { std::ptr::read_volatile(self.base.as_ptr() as *const i32) }
    }
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        unsafe {
            let addr = MEMORY_MAPPED_VIEW_ADDRESS { Value: self.base.as_ptr() as *mut _ };
            let _ = UnmapViewOfFile(addr);
            let _ = CloseHandle(self.mapping);
        }
    }
}

// SAFETY: The struct only holds a mapping handle and a view pointer used for
// read-only copies; both are safe to move across threads
unsafe impl Send for MappedRegion {}

/// Connection to all three of the game's shared memory regions.
pub struct Connection {
    physics: MappedRegion,
    graphics: MappedRegion,
    statics: MappedRegion,
}

impl Connection {
    /// Map all three regions. Fails if any mapping cannot be established.
    pub fn open() -> Result<Self> {
        let connection = Self {
            physics: MappedRegion::open(Region::Physics)?,
            graphics: MappedRegion::open(Region::Graphics)?,
            statics: MappedRegion::open(Region::Static)?,
        };
        debug!("Mapped all shared memory regions");
        Ok(connection)
    }

    pub fn physics_packet_id(&self) -> i32 {
        self.physics.peek_i32()
    }

    pub fn read_physics(&self, buf: &mut [u8]) -> Result<()> {
        self.physics.read_into(buf)
    }

    pub fn read_graphics(&self, buf: &mut [u8]) -> Result<()> {
        self.graphics.read_into(buf)
    }

    pub fn read_static(&self, buf: &mut [u8]) -> Result<()> {
        self.statics.read_into(buf)
    }
}

/// Convert string to null-terminated wide string for Windows APIs
fn wide_string(s: &str) -> Vec<u16> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;

    #[test]
    fn mapping_names_are_the_game_contract() {
        assert_eq!(Region::Physics.mapping_name(), "Local\\acpmf_physics");
        assert_eq!(Region::Graphics.mapping_name(), "Local\\acpmf_graphics");
        assert_eq!(Region::Static.mapping_name(), "Local\\acpmf_static");
    }

    #[test]
    fn maps_and_reads_regions() {
        // Create-or-open semantics: this passes with or without the game
        // running, reading zeros in the latter case
        let connection = Connection::open().expect("mapping should always succeed");
        let mut buf = vec![0u8; Region::Physics.size()];
        connection.read_physics(&mut buf).unwrap();
        let _ = connection.physics_packet_id();
    }

    #[test]
    fn rejects_undersized_destination() {
        let connection = Connection::open().expect("mapping should always succeed");
        let mut buf = vec![0u8; Region::Physics.size() - 1];
        assert!(connection.read_physics(&mut buf).is_err());
    }
}
