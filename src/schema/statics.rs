//! Static region decoder.

use tracing::trace;

use crate::error::Result;
use crate::types::StaticInfo;

use super::{Region, RegionCursor};

/// Decode the static region into a [`StaticInfo`].
///
/// Reserved fields carried over from the engine's older titles (torque/power
/// figures, DRS/ERS/KERS capabilities, car skin and friends) are consumed to
/// keep offsets aligned but not exposed.
pub fn decode_static(buf: &[u8]) -> Result<StaticInfo> {
    let mut c = RegionCursor::new(Region::Static, buf)?;

    let shared_memory_version = c.read_utf16("smVersion", 15, 0)?;
    let game_version = c.read_utf16("acVersion", 15, 0)?;
    let number_of_sessions = c.read_i32("numberOfSessions")?;
    let num_cars = c.read_i32("numCars")?;
    let car_model = c.read_utf16("carModel", 33, 0)?;
    let track = c.read_utf16("track", 33, 0)?;
    let player_name = c.read_utf16("playerName", 33, 0)?;
    let player_surname = c.read_utf16("playerSurname", 33, 0)?;
    let player_nick = c.read_utf16("playerNick", 33, 2)?;
    let sector_count = c.read_i32("sectorCount")?;

    c.skip_scalar("maxTorque")?; // not populated by the game
    c.skip_scalar("maxPower")?;
    let max_rpm = c.read_i32("maxRpm")?;
    let max_fuel = c.read_f32("maxFuel")?;
    c.skip_array("suspensionMaxTravel", 4)?;
    c.skip_array("tyreRadius", 4)?;
    c.skip_scalar("maxTurboBoost")?;
    c.skip_scalar("deprecated1")?;
    c.skip_scalar("deprecated2")?;
    let penalties_enabled = c.read_bool("penaltiesEnabled")?;
    let aid_fuel_rate = c.read_f32("aidFuelRate")?;
    let aid_tyre_rate = c.read_f32("aidTireRate")?;
    let aid_mechanical_damage = c.read_f32("aidMechanicalDamage")?;
    c.skip_scalar("allowTyreBlankets")?;
    let aid_stability = c.read_f32("aidStability")?;
    let aid_auto_clutch = c.read_bool("aidAutoClutch")?;
    c.skip_scalar("aidAutoBlip")?;

    c.skip_scalar("hasDRS")?;
    c.skip_scalar("hasERS")?;
    c.skip_scalar("hasKERS")?;
    c.skip_scalar("kersMaxJ")?;
    c.skip_scalar("engineBrakeSettingsCount")?;
    c.skip_scalar("ersPowerControllerCount")?;
    c.skip_scalar("trackSplineLength")?;
    c.skip("trackConfiguration", 33 * 2 + 2)?;
    c.skip_scalar("ersMaxJ")?;
    c.skip_scalar("isTimedRace")?;
    c.skip_scalar("hasExtraLap")?;
    c.skip("carSkin", 33 * 2 + 2)?;
    c.skip_scalar("reversedGridPositions")?;

    let pit_window_start = c.read_i32("pitWindowStart")?;
    let pit_window_end = c.read_i32("pitWindowEnd")?;
    let is_online = c.read_bool("isOnline")?;
    let dry_tyres_name = c.read_utf16("dryTyresName", 33, 0)?;
    let wet_tyres_name = c.read_utf16("wetTyresName", 33, 0)?;

    debug_assert_eq!(c.position(), Region::Static.size());
    trace!(%track, %car_model, "Decoded static info");

    Ok(StaticInfo {
        shared_memory_version,
        game_version,
        number_of_sessions,
        num_cars,
        car_model,
        track,
        player_name,
        player_surname,
        player_nick,
        sector_count,
        max_rpm,
        max_fuel,
        penalties_enabled,
        aid_fuel_rate,
        aid_tyre_rate,
        aid_mechanical_damage,
        aid_stability,
        aid_auto_clutch,
        pit_window_start,
        pit_window_end,
        is_online,
        dry_tyres_name,
        wet_tyres_name,
    })
}
