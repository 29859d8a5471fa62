//! Little-endian cursor over a region buffer.
//!
//! Every read is bounds-checked and advances the cursor by the field's exact
//! width, so a decoder that walks the layout table in order cannot drift out
//! of alignment without producing an error. The cursor borrows the buffer;
//! decoded records never retain a reference into it.

use crate::error::{Result, TelemetryError};
use crate::types::{CarDamage, ContactGeometry, Vector3, WheelSet};

use super::Region;

/// Sequential field reader for one region buffer.
#[derive(Debug)]
pub struct RegionCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    region: Region,
}

impl<'a> RegionCursor<'a> {
    /// Create a cursor, verifying the buffer covers the region's frozen size.
    pub fn new(region: Region, buf: &'a [u8]) -> Result<Self> {
        if buf.len() < region.size() {
            return Err(TelemetryError::decode(
                region,
                "<buffer>",
                format!("buffer is {} bytes, layout requires {}", buf.len(), region.size()),
            ));
        }
        Ok(Self { buf, pos: 0, region })
    }

    /// Current byte offset, used for layout assertions in tests.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, field: &'static str, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or_else(|| {
            TelemetryError::decode(self.region, field, "offset arithmetic overflowed")
        })?;
        if end > self.buf.len() {
            return Err(TelemetryError::decode(
                self.region,
                field,
                format!("read of {len} bytes at offset {} exceeds buffer", self.pos),
            ));
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        let bytes = self.take(field, 4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_f32(&mut self, field: &'static str) -> Result<f32> {
        let bytes = self.take(field, 4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// The game writes booleans as 4-byte integers; any nonzero value is true.
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        Ok(self.read_i32(field)? != 0)
    }

    pub fn read_vector3(&mut self, field: &'static str) -> Result<Vector3> {
        Ok(Vector3::new(self.read_f32(field)?, self.read_f32(field)?, self.read_f32(field)?))
    }

    /// Four consecutive floats in FL, FR, RL, RR order.
    pub fn read_wheels(&mut self, field: &'static str) -> Result<WheelSet> {
        Ok(WheelSet::new(
            self.read_f32(field)?,
            self.read_f32(field)?,
            self.read_f32(field)?,
            self.read_f32(field)?,
        ))
    }

    /// Four groups of three floats, group order FL, FR, RL, RR.
    pub fn read_wheel_vectors(&mut self, field: &'static str) -> Result<ContactGeometry> {
        Ok(ContactGeometry {
            front_left: self.read_vector3(field)?,
            front_right: self.read_vector3(field)?,
            rear_left: self.read_vector3(field)?,
            rear_right: self.read_vector3(field)?,
        })
    }

    /// Five consecutive floats: front, rear, left, right, centre.
    pub fn read_damage(&mut self, field: &'static str) -> Result<CarDamage> {
        Ok(CarDamage {
            front: self.read_f32(field)?,
            rear: self.read_f32(field)?,
            left: self.read_f32(field)?,
            right: self.read_f32(field)?,
            centre: self.read_f32(field)?,
        })
    }

    /// Fixed-width UTF-16LE text of `chars` code units plus `padding` bytes.
    ///
    /// Decoded lossily (malformed code units become replacement characters,
    /// matching the game's own tolerance for garbage in these fields) and
    /// truncated at the first NUL. Padding bytes are consumed and discarded.
    pub fn read_utf16(
        &mut self,
        field: &'static str,
        chars: usize,
        padding: usize,
    ) -> Result<String> {
        let bytes = self.take(field, 2 * chars)?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .take_while(|&unit| unit != 0)
            .collect();
        self.skip(field, padding)?;
        Ok(String::from_utf16_lossy(&units))
    }

    /// Consume `len` reserved bytes without interpreting them.
    pub fn skip(&mut self, field: &'static str, len: usize) -> Result<()> {
        self.take(field, len)?;
        Ok(())
    }

    /// Consume one reserved 4-byte scalar.
    pub fn skip_scalar(&mut self, field: &'static str) -> Result<()> {
        self.skip(field, 4)
    }

    /// Consume a reserved array of `count` 4-byte scalars.
    pub fn skip_array(&mut self, field: &'static str, count: usize) -> Result<()> {
        self.skip(field, 4 * count)
    }
}
