//! Per-poll change detection over the region source.
//!
//! The game rewrites each region in place at a high rate; most polls find
//! nothing new. The detector keeps full decoding off that hot path by
//! peeking at the physics packet identifier first, and guards against
//! duplicate or torn reads with a bit-identity check on the suspension
//! travel values (there is always some oscillation in a live car, so two
//! genuinely distinct frames never share those bits).

use tracing::{debug, trace};

use crate::error::Result;
use crate::schema::{self, Region};
use crate::source::RegionSource;
use crate::types::{GraphicsMap, PhysicsFrame, StaticInfo, TelemetrySnapshot};

/// Decides, per poll, whether the regions hold new data worth publishing.
pub struct ChangeDetector {
    last_physics_id: Option<i32>,
    last_physics: Option<PhysicsFrame>,
    last_graphics_id: Option<i32>,
    graphics: Option<GraphicsMap>,
    statics: Option<StaticInfo>,
    physics_buf: Vec<u8>,
    graphics_buf: Vec<u8>,
    static_buf: Vec<u8>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self {
            last_physics_id: None,
            last_physics: None,
            last_graphics_id: None,
            graphics: None,
            statics: None,
            physics_buf: vec![0u8; Region::Physics.size()],
            graphics_buf: vec![0u8; Region::Graphics.size()],
            static_buf: vec![0u8; Region::Static.size()],
        }
    }

    /// Poll the source once.
    ///
    /// Returns `Ok(None)` when physics did not advance (unchanged packet
    /// identifier, or the duplicate-frame guard fired), `Ok(Some(..))` with a
    /// fresh deep-copied snapshot when it did. On a decode failure the
    /// previous cache is retained and the error is returned; nothing
    /// partially decoded is ever published.
    pub fn poll<S: RegionSource>(&mut self, source: &mut S) -> Result<Option<TelemetrySnapshot>> {
        // Cheap gate: just the leading identifier, no full copy or decode
        let physics_id = source.physics_packet_id()?;
        if self.last_physics_id == Some(physics_id) {
            trace!(physics_id, "No new data (same packet identifier)");
            return Ok(None);
        }

        source.read_physics(&mut self.physics_buf)?;
        let physics = schema::decode_physics(&self.physics_buf)?;
        self.last_physics_id = Some(physics.packet_id);

        // Identifiers repeat across pause/resume and session resets, and a
        // torn read can pair a new identifier with stale payload. Suspension
        // travel always oscillates on a live car, so bit-identical values
        // mean this is not a new frame. Best effort, not a tear proof.
        if let Some(previous) = &self.last_physics {
            if previous.suspension_travel.bits_eq(&physics.suspension_travel) {
                debug!(
                    physics_id = physics.packet_id,
                    "Suppressing duplicate frame (suspension travel unchanged)"
                );
                return Ok(None);
            }
        }

        // Graphics advances independently; static is refreshed only in
        // lock-step with graphics so it always describes the same session.
        source.read_graphics(&mut self.graphics_buf)?;
        let graphics_id = peek_packet_id(&self.graphics_buf);
        if self.last_graphics_id != Some(graphics_id) || self.graphics.is_none() {
            let graphics = schema::decode_graphics(&self.graphics_buf)?;
            source.read_static(&mut self.static_buf)?;
            let statics = schema::decode_static(&self.static_buf)?;
            debug!(graphics_id, "Refreshed graphics and static records");
            self.last_graphics_id = Some(graphics_id);
            self.graphics = Some(graphics);
            self.statics = Some(statics);
        }

        let (graphics, statics) = match (&self.graphics, &self.statics) {
            (Some(g), Some(s)) => (g.clone(), s.clone()),
            // Unreachable in practice: the branch above fills both on the
            // first accepted poll. Kept as an error, not a panic.
            _ => {
                return Err(crate::error::TelemetryError::decode(
                    Region::Graphics,
                    "<cache>",
                    "graphics/static cache empty after refresh",
                ));
            }
        };

        trace!(physics_id = physics.packet_id, "Publishing new snapshot");
        self.last_physics = Some(physics.clone());
        Ok(Some(TelemetrySnapshot { physics, graphics, statics }))
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn peek_packet_id(buf: &[u8]) -> i32 {
    i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}
