//! Decoded physics region record.

use serde::{Deserialize, Serialize};

use super::{CarDamage, ContactGeometry, Vector3, WheelSet};

/// One complete decoded snapshot of the physics region.
///
/// Updated by the game at physics rate; immutable once constructed. Reserved
/// fields the game never populates (DRS, KERS/ERS, ride height and friends)
/// are consumed during decode to keep offsets aligned but are not exposed
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsFrame {
    /// Monotonically increasing packet identifier, wraps at `i32::MAX`.
    pub packet_id: i32,

    pub gas: f32,
    pub brake: f32,
    pub fuel: f32,
    pub gear: i32,
    pub rpm: i32,
    pub steer_angle: f32,
    pub speed_kmh: f32,
    pub velocity: Vector3,
    pub g_force: Vector3,

    pub wheel_slip: WheelSet,
    pub wheel_pressure: WheelSet,
    pub wheel_angular_speed: WheelSet,
    pub tyre_core_temp: WheelSet,
    pub suspension_travel: WheelSet,

    pub tc: f32,
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
    pub car_damage: CarDamage,
    pub pit_limiter_on: bool,
    pub abs: f32,
    pub autoshifter_on: bool,
    pub turbo_boost: f32,

    pub air_temp: f32,
    pub road_temp: f32,
    pub local_angular_velocity: Vector3,
    pub final_ff: f32,

    pub brake_temp: WheelSet,
    pub clutch: f32,
    pub is_ai_controlled: bool,

    pub tyre_contact_point: ContactGeometry,
    pub tyre_contact_normal: ContactGeometry,
    pub tyre_contact_heading: ContactGeometry,

    pub brake_bias: f32,
    pub local_velocity: Vector3,

    pub slip_ratio: WheelSet,
    pub slip_angle: WheelSet,

    pub suspension_damage: WheelSet,
    pub water_temp: f32,

    pub brake_pressure: WheelSet,
    pub front_brake_compound: i32,
    pub rear_brake_compound: i32,
    pub pad_life: WheelSet,
    pub disc_life: WheelSet,

    pub ignition_on: bool,
    pub starter_engine_on: bool,
    pub is_engine_running: bool,

    pub kerb_vibration: f32,
    pub slip_vibration: f32,
    pub g_vibration: f32,
    pub abs_vibration: f32,
}
