//! Test utilities: region byte builders and a scripted in-memory source.
//!
//! The builders write fields at the frozen layout offsets so decode tests can
//! plant sentinel values without walking the whole layout themselves. The
//! offsets are the layout contract; if one of these drifts from the decoder,
//! the offset tests catch it.

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::schema::Region;
use crate::source::RegionSource;
use crate::types::{FlagType, RainIntensity, SessionType, SharedMemoryStatus, TrackGripStatus};

/// Install a fmt subscriber that routes reader diagnostics through the test
/// harness. Honors `RUST_LOG`; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_utf16(buf: &mut [u8], offset: usize, text: &str) {
    let mut pos = offset;
    for unit in text.encode_utf16() {
        buf[pos..pos + 2].copy_from_slice(&unit.to_le_bytes());
        pos += 2;
    }
}

/// Builder for physics region buffers.
pub struct PhysicsBuilder {
    buf: Vec<u8>,
}

impl PhysicsBuilder {
    pub const PACKET_ID: usize = 0;
    pub const GAS: usize = 4;
    pub const BRAKE: usize = 8;
    pub const FUEL: usize = 12;
    pub const GEAR: usize = 16;
    pub const RPM: usize = 20;
    pub const STEER_ANGLE: usize = 24;
    pub const SPEED_KMH: usize = 28;
    pub const WHEEL_SLIP: usize = 56;
    pub const SUSPENSION_TRAVEL: usize = 184;
    pub const PIT_LIMITER_ON: usize = 248;
    pub const TYRE_CONTACT_POINT: usize = 420;
    pub const WATER_TEMP: usize = 712;
    pub const PAD_LIFE: usize = 740;
    pub const IGNITION_ON: usize = 772;

    pub fn new() -> Self {
        Self { buf: vec![0u8; Region::Physics.size()] }
    }

    pub fn packet_id(self, id: i32) -> Self {
        self.i32_at(Self::PACKET_ID, id)
    }

    pub fn i32_at(mut self, offset: usize, value: i32) -> Self {
        put_i32(&mut self.buf, offset, value);
        self
    }

    pub fn f32_at(mut self, offset: usize, value: f32) -> Self {
        put_f32(&mut self.buf, offset, value);
        self
    }

    pub fn wheels_at(mut self, offset: usize, values: [f32; 4]) -> Self {
        for (i, v) in values.iter().enumerate() {
            put_f32(&mut self.buf, offset + i * 4, *v);
        }
        self
    }

    pub fn suspension_travel(self, values: [f32; 4]) -> Self {
        self.wheels_at(Self::SUSPENSION_TRAVEL, values)
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for PhysicsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for graphics region buffers.
pub struct GraphicsBuilder {
    buf: Vec<u8>,
}

impl GraphicsBuilder {
    pub const PACKET_ID: usize = 0;
    pub const STATUS: usize = 4;
    pub const SESSION_TYPE: usize = 8;
    pub const CURRENT_TIME: usize = 12;
    pub const COMPLETED_LAPS: usize = 132;
    pub const POSITION: usize = 136;
    pub const I_CURRENT_TIME: usize = 140;
    pub const I_LAST_TIME: usize = 144;
    pub const I_BEST_TIME: usize = 148;
    pub const CAR_COORDINATES: usize = 256;
    pub const CAR_IDS: usize = 976;
    pub const PLAYER_CAR_ID: usize = 1216;
    pub const FLAG: usize = 1224;
    pub const PENALTY: usize = 1228;
    pub const TRACK_GRIP_STATUS: usize = 1556;
    pub const RAIN_INTENSITY: usize = 1560;

    pub fn new() -> Self {
        Self { buf: vec![0u8; Region::Graphics.size()] }
    }

    pub fn packet_id(self, id: i32) -> Self {
        self.i32_at(Self::PACKET_ID, id)
    }

    pub fn status(self, status: SharedMemoryStatus) -> Self {
        self.i32_at(Self::STATUS, status as i32)
    }

    pub fn session_type(self, session: SessionType) -> Self {
        // Raw values start at -1 for Unknown
        self.session_type_raw(session as i32 - 1)
    }

    pub fn session_type_raw(self, raw: i32) -> Self {
        self.i32_at(Self::SESSION_TYPE, raw)
    }

    pub fn current_time(mut self, text: &str) -> Self {
        put_utf16(&mut self.buf, Self::CURRENT_TIME, text);
        self
    }

    pub fn flag(self, flag: FlagType) -> Self {
        self.flag_raw(flag as i32)
    }

    pub fn flag_raw(self, raw: i32) -> Self {
        self.i32_at(Self::FLAG, raw)
    }

    pub fn penalty_raw(self, raw: i32) -> Self {
        self.i32_at(Self::PENALTY, raw)
    }

    pub fn grip(self, grip: TrackGripStatus) -> Self {
        self.i32_at(Self::TRACK_GRIP_STATUS, grip as i32)
    }

    pub fn rain(self, rain: RainIntensity) -> Self {
        self.i32_at(Self::RAIN_INTENSITY, rain as i32)
    }

    pub fn car_coordinate(mut self, slot: usize, x: f32, y: f32, z: f32) -> Self {
        let offset = Self::CAR_COORDINATES + slot * 12;
        put_f32(&mut self.buf, offset, x);
        put_f32(&mut self.buf, offset + 4, y);
        put_f32(&mut self.buf, offset + 8, z);
        self
    }

    pub fn car_id(self, slot: usize, id: i32) -> Self {
        self.i32_at(Self::CAR_IDS + slot * 4, id)
    }

    pub fn i32_at(mut self, offset: usize, value: i32) -> Self {
        put_i32(&mut self.buf, offset, value);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for GraphicsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for static region buffers.
pub struct StaticBuilder {
    buf: Vec<u8>,
}

impl StaticBuilder {
    pub const SM_VERSION: usize = 0;
    pub const AC_VERSION: usize = 30;
    pub const CAR_MODEL: usize = 68;
    pub const TRACK: usize = 134;
    pub const PLAYER_NAME: usize = 200;
    pub const MAX_RPM: usize = 412;
    pub const MAX_FUEL: usize = 416;
    pub const PIT_WINDOW_START: usize = 676;
    pub const PIT_WINDOW_END: usize = 680;
    pub const IS_ONLINE: usize = 684;
    pub const DRY_TYRES_NAME: usize = 688;
    pub const WET_TYRES_NAME: usize = 754;

    pub fn new() -> Self {
        Self { buf: vec![0u8; Region::Static.size()] }
    }

    pub fn sm_version(mut self, text: &str) -> Self {
        put_utf16(&mut self.buf, Self::SM_VERSION, text);
        self
    }

    pub fn car_model(mut self, text: &str) -> Self {
        put_utf16(&mut self.buf, Self::CAR_MODEL, text);
        self
    }

    pub fn track(mut self, text: &str) -> Self {
        put_utf16(&mut self.buf, Self::TRACK, text);
        self
    }

    pub fn player_name(mut self, text: &str) -> Self {
        put_utf16(&mut self.buf, Self::PLAYER_NAME, text);
        self
    }

    pub fn dry_tyres_name(mut self, text: &str) -> Self {
        put_utf16(&mut self.buf, Self::DRY_TYRES_NAME, text);
        self
    }

    pub fn i32_at(mut self, offset: usize, value: i32) -> Self {
        put_i32(&mut self.buf, offset, value);
        self
    }

    pub fn f32_at(mut self, offset: usize, value: f32) -> Self {
        put_f32(&mut self.buf, offset, value);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for StaticBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared mutable region contents backing a [`ScriptedSource`].
#[derive(Debug)]
pub struct ScriptedRegions {
    pub physics: Vec<u8>,
    pub graphics: Vec<u8>,
    pub statics: Vec<u8>,
}

/// In-memory [`RegionSource`] whose contents tests mutate mid-run.
///
/// Stands in for the live mapping the same way the replay provider stands in
/// for the live provider: identical seam, deterministic bytes.
#[derive(Clone)]
pub struct ScriptedSource {
    regions: Arc<Mutex<ScriptedRegions>>,
}

impl ScriptedSource {
    pub fn new(physics: Vec<u8>, graphics: Vec<u8>, statics: Vec<u8>) -> Self {
        Self { regions: Arc::new(Mutex::new(ScriptedRegions { physics, graphics, statics })) }
    }

    /// All regions zeroed: the state before the game initializes its pages.
    pub fn uninitialized() -> Self {
        Self::new(
            vec![0u8; Region::Physics.size()],
            vec![0u8; Region::Graphics.size()],
            vec![0u8; Region::Static.size()],
        )
    }

    /// Handle for mutating the backing regions from the test body.
    pub fn regions(&self) -> Arc<Mutex<ScriptedRegions>> {
        Arc::clone(&self.regions)
    }

    pub fn set_physics(&self, buf: Vec<u8>) {
        self.regions.lock().unwrap().physics = buf;
    }

    pub fn set_graphics(&self, buf: Vec<u8>) {
        self.regions.lock().unwrap().graphics = buf;
    }

    pub fn set_static(&self, buf: Vec<u8>) {
        self.regions.lock().unwrap().statics = buf;
    }
}

impl RegionSource for ScriptedSource {
    fn physics_packet_id(&mut self) -> Result<i32> {
        let regions = self.regions.lock().unwrap();
        let bytes = &regions.physics[0..4];
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_physics(&mut self, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(&self.regions.lock().unwrap().physics);
        Ok(())
    }

    fn read_graphics(&mut self, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(&self.regions.lock().unwrap().graphics);
        Ok(())
    }

    fn read_static(&mut self, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(&self.regions.lock().unwrap().statics);
        Ok(())
    }
}
