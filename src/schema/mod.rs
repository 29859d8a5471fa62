//! Byte layout of the three shared memory regions.
//!
//! The game defines a frozen, versioned layout per region: field order,
//! widths and padding are a strict compatibility contract. A mismatch here
//! silently corrupts every later field rather than failing loudly, so the
//! decoders walk every field in order, including reserved ones the game
//! never populates, and consume them to keep offsets aligned.

mod cursor;
mod graphics;
mod physics;
mod statics;

pub use cursor::RegionCursor;
pub use graphics::decode_graphics;
pub use physics::decode_physics;
pub use statics::decode_static;

use serde::{Deserialize, Serialize};

/// Byte size of the physics region (`Local\acpmf_physics`).
pub const PHYSICS_REGION_SIZE: usize = 800;
/// Byte size of the graphics region (`Local\acpmf_graphics`).
pub const GRAPHICS_REGION_SIZE: usize = 1588;
/// Byte size of the static region (`Local\acpmf_static`).
///
/// The game's own headers declare the mapping as 784 bytes, but the field
/// walk covers 820; readers only get away with 784 because mappings round up
/// to page size. We require the full layout.
pub const STATIC_REGION_SIZE: usize = 820;

/// One of the three named shared memory regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Physics,
    Graphics,
    Static,
}

impl Region {
    /// The Windows file-mapping name the game publishes this region under.
    pub const fn mapping_name(&self) -> &'static str {
        match self {
            Region::Physics => "Local\\acpmf_physics",
            Region::Graphics => "Local\\acpmf_graphics",
            Region::Static => "Local\\acpmf_static",
        }
    }

    /// Frozen byte size of this region's layout.
    pub const fn size(&self) -> usize {
        match self {
            Region::Physics => PHYSICS_REGION_SIZE,
            Region::Graphics => GRAPHICS_REGION_SIZE,
            Region::Static => STATIC_REGION_SIZE,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Physics => write!(f, "physics"),
            Region::Graphics => write!(f, "graphics"),
            Region::Static => write!(f, "static"),
        }
    }
}
