//! Decoded static region record.

use serde::{Deserialize, Serialize};

/// Session configuration that only changes between sessions, never within one.
///
/// Refreshed in lock-step with the graphics region so it always describes the
/// session the graphics data belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticInfo {
    pub shared_memory_version: String,
    pub game_version: String,
    pub number_of_sessions: i32,
    pub num_cars: i32,
    pub car_model: String,
    pub track: String,
    pub player_name: String,
    pub player_surname: String,
    pub player_nick: String,
    pub sector_count: i32,
    pub max_rpm: i32,
    pub max_fuel: f32,
    pub penalties_enabled: bool,
    pub aid_fuel_rate: f32,
    pub aid_tyre_rate: f32,
    pub aid_mechanical_damage: f32,
    pub aid_stability: f32,
    pub aid_auto_clutch: bool,
    pub pit_window_start: i32,
    pub pit_window_end: i32,
    pub is_online: bool,
    pub dry_tyres_name: String,
    pub wet_tyres_name: String,
}
