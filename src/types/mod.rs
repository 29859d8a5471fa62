//! Strongly typed telemetry records and value types.

mod enums;
mod graphics;
mod physics;
mod snapshot;
mod statics;

pub use enums::{FlagType, Penalty, RainIntensity, SessionType, SharedMemoryStatus, TrackGripStatus};
pub use graphics::{CAR_SLOTS, GraphicsMap};
pub use physics::PhysicsFrame;
pub use snapshot::TelemetrySnapshot;
pub use statics::StaticInfo;

use serde::{Deserialize, Serialize};

/// Three-component vector. Plain value type, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One value per wheel in fixed FL, FR, RL, RR order.
///
/// Consumers may rely on this positional ordering; it mirrors the order the
/// game writes per-wheel arrays in every region.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelSet {
    pub front_left: f32,
    pub front_right: f32,
    pub rear_left: f32,
    pub rear_right: f32,
}

impl WheelSet {
    pub const fn new(front_left: f32, front_right: f32, rear_left: f32, rear_right: f32) -> Self {
        Self { front_left, front_right, rear_left, rear_right }
    }

    /// Values in wheel order as a fixed array.
    pub const fn as_array(&self) -> [f32; 4] {
        [self.front_left, self.front_right, self.rear_left, self.rear_right]
    }

    /// Bit-exact comparison, unlike `PartialEq` which follows float semantics.
    ///
    /// Used by the change detector's duplicate-frame guard, where NaN payloads
    /// and negative zero must compare by representation, not by value.
    pub fn bits_eq(&self, other: &WheelSet) -> bool {
        self.front_left.to_bits() == other.front_left.to_bits()
            && self.front_right.to_bits() == other.front_right.to_bits()
            && self.rear_left.to_bits() == other.rear_left.to_bits()
            && self.rear_right.to_bits() == other.rear_right.to_bits()
    }
}

/// One contact vector per wheel, same FL, FR, RL, RR ordering as [`WheelSet`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactGeometry {
    pub front_left: Vector3,
    pub front_right: Vector3,
    pub rear_left: Vector3,
    pub rear_right: Vector3,
}

/// Car body damage levels.
///
/// `centre` is written by the game as an aggregate of the other four zones and
/// is not independently meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarDamage {
    pub front: f32,
    pub rear: f32,
    pub left: f32,
    pub right: f32,
    pub centre: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_set_preserves_positional_order() {
        let wheels = WheelSet::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(wheels.as_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(wheels.front_left, 1.0);
        assert_eq!(wheels.rear_right, 4.0);
    }

    #[test]
    fn bits_eq_distinguishes_nan_payloads() {
        let a = WheelSet::new(f32::NAN, 0.0, 0.0, 0.0);
        let b = WheelSet::new(f32::NAN, 0.0, 0.0, 0.0);
        // PartialEq says NaN != NaN, but the duplicate guard needs bit identity
        assert_ne!(a, b);
        assert!(a.bits_eq(&b));

        let c = WheelSet::new(0.0, 0.0, 0.0, 0.0);
        let d = WheelSet::new(-0.0, 0.0, 0.0, 0.0);
        assert_eq!(c, d);
        assert!(!c.bits_eq(&d));
    }
}
