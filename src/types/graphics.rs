//! Decoded graphics region record.

use serde::{Deserialize, Serialize};

use super::{
    FlagType, Penalty, RainIntensity, SessionType, SharedMemoryStatus, TrackGripStatus, Vector3,
    WheelSet,
};

/// Number of car slots in the graphics region's coordinate and id arrays.
pub const CAR_SLOTS: usize = 60;

/// One complete decoded snapshot of the graphics region.
///
/// Session, timing and HUD state updated at render rate. Lap times come both
/// as the formatted strings the game renders and as integer milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsMap {
    /// Monotonically increasing packet identifier, wraps at `i32::MAX`.
    pub packet_id: i32,
    pub status: SharedMemoryStatus,
    pub session_type: SessionType,

    pub current_time_str: String,
    pub last_time_str: String,
    pub best_time_str: String,
    pub split_str: String,

    pub completed_laps: i32,
    pub position: i32,
    pub current_time_ms: i32,
    pub last_time_ms: i32,
    pub best_time_ms: i32,
    pub session_time_left: f32,
    pub distance_traveled: f32,
    pub is_in_pit: bool,
    pub current_sector_index: i32,
    pub last_sector_time_ms: i32,
    pub number_of_laps: i32,
    pub tyre_compound: String,
    pub normalized_car_position: f32,

    pub active_cars: i32,
    pub car_coordinates: Vec<Vector3>,
    pub car_ids: Vec<i32>,
    pub player_car_id: i32,

    pub penalty_time: f32,
    pub flag: FlagType,
    pub penalty: Penalty,
    pub ideal_line_on: bool,
    pub is_in_pit_lane: bool,
    pub mandatory_pit_done: bool,

    pub wind_speed: f32,
    pub wind_direction: f32,

    pub is_setup_menu_visible: bool,
    pub main_display_index: i32,
    pub secondary_display_index: i32,
    pub tc_level: i32,
    pub tc_cut_level: i32,
    pub engine_map: i32,
    pub abs_level: i32,
    pub fuel_per_lap: f32,
    pub rain_light_on: bool,
    pub flashing_light_on: bool,
    pub light_stage: i32,
    pub exhaust_temp: f32,
    pub wiper_stage: i32,
    pub driver_stint_total_time_left_ms: i32,
    pub driver_stint_time_left_ms: i32,
    pub rain_tyres: bool,
    pub session_index: i32,
    pub used_fuel: f32,

    pub delta_lap_time_str: String,
    pub delta_lap_time_ms: i32,
    pub estimated_lap_time_str: String,
    pub estimated_lap_time_ms: i32,
    pub is_delta_positive: bool,
    pub is_valid_lap: bool,
    pub fuel_estimated_laps: f32,
    pub track_status: String,
    pub missing_mandatory_pits: i32,
    pub clock: f32,

    pub direction_light_left: bool,
    pub direction_light_right: bool,
    pub global_yellow: bool,
    pub global_yellow_s1: bool,
    pub global_yellow_s2: bool,
    pub global_yellow_s3: bool,
    pub global_white: bool,
    pub global_green: bool,
    pub global_chequered: bool,
    pub global_red: bool,

    pub mfd_tyre_set: i32,
    pub mfd_fuel_to_add: f32,
    pub mfd_tyre_pressure: WheelSet,

    pub track_grip_status: TrackGripStatus,
    pub rain_intensity: RainIntensity,
    pub rain_intensity_in_10min: RainIntensity,
    pub rain_intensity_in_30min: RainIntensity,

    pub current_tyre_set: i32,
    pub strategy_tyre_set: i32,
    pub gap_ahead_ms: i32,
    pub gap_behind_ms: i32,
}
