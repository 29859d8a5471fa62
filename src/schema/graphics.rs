//! Graphics region decoder.

use tracing::trace;

use crate::error::Result;
use crate::types::{
    CAR_SLOTS, FlagType, GraphicsMap, Penalty, RainIntensity, SessionType, SharedMemoryStatus,
    TrackGripStatus, WheelSet,
};

use super::{Region, RegionCursor};

/// Decode the graphics region into a [`GraphicsMap`].
///
/// All-or-nothing: an unrecognized value in any enumerated field fails the
/// decode, except the penalty code which degrades to
/// [`Penalty::Unrecognized`].
pub fn decode_graphics(buf: &[u8]) -> Result<GraphicsMap> {
    let mut c = RegionCursor::new(Region::Graphics, buf)?;

    let packet_id = c.read_i32("packetId")?;
    let status = SharedMemoryStatus::from_raw(c.read_i32("status")?)?;
    let session_type = SessionType::from_raw(c.read_i32("sessionType")?)?;

    let current_time_str = c.read_utf16("currentTime", 15, 0)?;
    let last_time_str = c.read_utf16("lastTime", 15, 0)?;
    let best_time_str = c.read_utf16("bestTime", 15, 0)?;
    let split_str = c.read_utf16("split", 15, 0)?;

    let completed_laps = c.read_i32("completedLaps")?;
    let position = c.read_i32("position")?;
    let current_time_ms = c.read_i32("iCurrentTime")?;
    let last_time_ms = c.read_i32("iLastTime")?;
    let best_time_ms = c.read_i32("iBestTime")?;
    let session_time_left = c.read_f32("sessionTimeLeft")?;
    let distance_traveled = c.read_f32("distanceTraveled")?;
    let is_in_pit = c.read_bool("isInPit")?;
    let current_sector_index = c.read_i32("currentSectorIndex")?;
    let last_sector_time_ms = c.read_i32("lastSectorTime")?;
    let number_of_laps = c.read_i32("numberOfLaps")?;
    let tyre_compound = c.read_utf16("tyreCompound", 33, 2)?;
    c.skip_scalar("replayTimeMultiplier")?; // not populated by the game
    let normalized_car_position = c.read_f32("normalizedCarPosition")?;

    let active_cars = c.read_i32("activeCars")?;
    let mut car_coordinates = Vec::with_capacity(CAR_SLOTS);
    for _ in 0..CAR_SLOTS {
        car_coordinates.push(c.read_vector3("carCoordinates")?);
    }
    let mut car_ids = Vec::with_capacity(CAR_SLOTS);
    for _ in 0..CAR_SLOTS {
        car_ids.push(c.read_i32("carId")?);
    }
    let player_car_id = c.read_i32("playerCarId")?;

    let penalty_time = c.read_f32("penaltyTime")?;
    let flag = FlagType::from_raw(c.read_i32("flag")?)?;
    // The one enumeration that must never fail: new codes ship undocumented
    let penalty = Penalty::from_raw(c.read_i32("penalty")?);
    let ideal_line_on = c.read_bool("idealLineOn")?;
    let is_in_pit_lane = c.read_bool("isInPitLane")?;
    c.skip_scalar("surfaceGrip")?; // always reads 0
    let mandatory_pit_done = c.read_bool("mandatoryPitDone")?;

    let wind_speed = c.read_f32("windSpeed")?;
    let wind_direction = c.read_f32("windDirection")?;
    let is_setup_menu_visible = c.read_bool("isSetupMenuVisible")?;
    let main_display_index = c.read_i32("mainDisplayIndex")?;
    let secondary_display_index = c.read_i32("secondaryDisplayIndex")?;
    let tc_level = c.read_i32("tc")?;
    let tc_cut_level = c.read_i32("tcCut")?;
    let engine_map = c.read_i32("engineMap")?;
    let abs_level = c.read_i32("abs")?;
    let fuel_per_lap = c.read_f32("fuelXLap")?;
    let rain_light_on = c.read_bool("rainLights")?;
    let flashing_light_on = c.read_bool("flashingLights")?;
    let light_stage = c.read_i32("lightsStage")?;
    let exhaust_temp = c.read_f32("exhaustTemperature")?;
    let wiper_stage = c.read_i32("wiperLV")?;
    let driver_stint_total_time_left_ms = c.read_i32("driverStintTotalTimeLeft")?;
    let driver_stint_time_left_ms = c.read_i32("driverStintTimeLeft")?;
    let rain_tyres = c.read_bool("rainTyres")?;
    let session_index = c.read_i32("sessionIndex")?;
    let used_fuel = c.read_f32("usedFuel")?;

    let delta_lap_time_str = c.read_utf16("deltaLapTime", 15, 2)?;
    let delta_lap_time_ms = c.read_i32("iDeltaLapTime")?;
    let estimated_lap_time_str = c.read_utf16("estimatedLapTime", 15, 2)?;
    let estimated_lap_time_ms = c.read_i32("iEstimatedLapTime")?;
    let is_delta_positive = c.read_bool("isDeltaPositive")?;
    c.skip_scalar("iSplit")?; // duplicate of lastSectorTime
    let is_valid_lap = c.read_bool("isValidLap")?;
    let fuel_estimated_laps = c.read_f32("fuelEstimatedLaps")?;
    let track_status = c.read_utf16("trackStatus", 33, 2)?;
    let missing_mandatory_pits = c.read_i32("missingMandatoryPits")?;
    let clock = c.read_f32("clock")?;

    let direction_light_left = c.read_bool("directionLightsLeft")?;
    let direction_light_right = c.read_bool("directionLightsRight")?;
    let global_yellow = c.read_bool("globalYellow")?;
    let global_yellow_s1 = c.read_bool("globalYellow1")?;
    let global_yellow_s2 = c.read_bool("globalYellow2")?;
    let global_yellow_s3 = c.read_bool("globalYellow3")?;
    let global_white = c.read_bool("globalWhite")?;
    let global_green = c.read_bool("globalGreen")?;
    let global_chequered = c.read_bool("globalChequered")?;
    let global_red = c.read_bool("globalRed")?;

    let mfd_tyre_set = c.read_i32("mfdTyreSet")?;
    let mfd_fuel_to_add = c.read_f32("mfdFuelToAdd")?;
    let mfd_tyre_pressure = WheelSet::new(
        c.read_f32("mfdTyrePressureLF")?,
        c.read_f32("mfdTyrePressureRF")?,
        c.read_f32("mfdTyrePressureLR")?,
        c.read_f32("mfdTyrePressureRR")?,
    );

    let track_grip_status = TrackGripStatus::from_raw(c.read_i32("trackGripStatus")?)?;
    let rain_intensity = RainIntensity::from_raw(c.read_i32("rainIntensity")?)?;
    let rain_intensity_in_10min = RainIntensity::from_raw(c.read_i32("rainIntensityIn10min")?)?;
    let rain_intensity_in_30min = RainIntensity::from_raw(c.read_i32("rainIntensityIn30min")?)?;

    let current_tyre_set = c.read_i32("currentTyreSet")?;
    let strategy_tyre_set = c.read_i32("strategyTyreSet")?;
    let gap_ahead_ms = c.read_i32("gapAhead")?;
    let gap_behind_ms = c.read_i32("gapBehind")?;

    debug_assert_eq!(c.position(), Region::Graphics.size());
    trace!(packet_id, ?status, "Decoded graphics map");

    Ok(GraphicsMap {
        packet_id,
        status,
        session_type,
        current_time_str,
        last_time_str,
        best_time_str,
        split_str,
        completed_laps,
        position,
        current_time_ms,
        last_time_ms,
        best_time_ms,
        session_time_left,
        distance_traveled,
        is_in_pit,
        current_sector_index,
        last_sector_time_ms,
        number_of_laps,
        tyre_compound,
        normalized_car_position,
        active_cars,
        car_coordinates,
        car_ids,
        player_car_id,
        penalty_time,
        flag,
        penalty,
        ideal_line_on,
        is_in_pit_lane,
        mandatory_pit_done,
        wind_speed,
        wind_direction,
        is_setup_menu_visible,
        main_display_index,
        secondary_display_index,
        tc_level,
        tc_cut_level,
        engine_map,
        abs_level,
        fuel_per_lap,
        rain_light_on,
        flashing_light_on,
        light_stage,
        exhaust_temp,
        wiper_stage,
        driver_stint_total_time_left_ms,
        driver_stint_time_left_ms,
        rain_tyres,
        session_index,
        used_fuel,
        delta_lap_time_str,
        delta_lap_time_ms,
        estimated_lap_time_str,
        estimated_lap_time_ms,
        is_delta_positive,
        is_valid_lap,
        fuel_estimated_laps,
        track_status,
        missing_mandatory_pits,
        clock,
        direction_light_left,
        direction_light_right,
        global_yellow,
        global_yellow_s1,
        global_yellow_s2,
        global_yellow_s3,
        global_white,
        global_green,
        global_chequered,
        global_red,
        mfd_tyre_set,
        mfd_fuel_to_add,
        mfd_tyre_pressure,
        track_grip_status,
        rain_intensity,
        rain_intensity_in_10min,
        rain_intensity_in_30min,
        current_tyre_set,
        strategy_tyre_set,
        gap_ahead_ms,
        gap_behind_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TelemetryError;
    use crate::test_utils::GraphicsBuilder;

    #[test]
    fn decodes_known_offsets() {
        let buf = GraphicsBuilder::new()
            .packet_id(77)
            .status(SharedMemoryStatus::Live)
            .session_type(SessionType::Race)
            .current_time("1:43.210")
            .i32_at(GraphicsBuilder::POSITION, 3)
            .i32_at(GraphicsBuilder::COMPLETED_LAPS, 12)
            .i32_at(GraphicsBuilder::I_BEST_TIME, 103_456)
            .flag(FlagType::Yellow)
            .penalty_raw(1)
            .grip(TrackGripStatus::Optimum)
            .rain(RainIntensity::Drizzle)
            .build();

        let map = decode_graphics(&buf).unwrap();
        assert_eq!(map.packet_id, 77);
        assert_eq!(map.status, SharedMemoryStatus::Live);
        assert_eq!(map.session_type, SessionType::Race);
        assert_eq!(map.current_time_str, "1:43.210");
        assert_eq!(map.position, 3);
        assert_eq!(map.completed_laps, 12);
        assert_eq!(map.best_time_ms, 103_456);
        assert_eq!(map.flag, FlagType::Yellow);
        assert_eq!(map.penalty, Penalty::DriveThroughCutting);
        assert_eq!(map.track_grip_status, TrackGripStatus::Optimum);
        assert_eq!(map.rain_intensity, RainIntensity::Drizzle);
        assert_eq!(map.car_coordinates.len(), CAR_SLOTS);
        assert_eq!(map.car_ids.len(), CAR_SLOTS);
    }

    #[test]
    fn unknown_session_type_fails_decode() {
        let buf = GraphicsBuilder::new().session_type_raw(99).build();
        let err = decode_graphics(&buf).unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::UnknownEnumValue { field: "sessionType", value: 99, .. }
        ));
    }

    #[test]
    fn unknown_flag_fails_decode() {
        let buf = GraphicsBuilder::new().flag_raw(42).build();
        assert!(decode_graphics(&buf).is_err());
    }

    #[test]
    fn unknown_penalty_decodes_to_unrecognized() {
        let buf = GraphicsBuilder::new().penalty_raw(37).build();
        let map = decode_graphics(&buf).unwrap();
        assert_eq!(map.penalty, Penalty::Unrecognized(37));
    }

    #[test]
    fn both_wrong_way_codes_decode_to_named_variants() {
        let old = decode_graphics(&GraphicsBuilder::new().penalty_raw(18).build()).unwrap();
        let new = decode_graphics(&GraphicsBuilder::new().penalty_raw(22).build()).unwrap();
        assert_eq!(old.penalty, Penalty::DisqualifiedWrongWayOld);
        assert_eq!(new.penalty, Penalty::DisqualifiedWrongWay);
    }

    #[test]
    fn car_coordinates_index_by_slot() {
        let buf = GraphicsBuilder::new().car_coordinate(7, 101.0, 0.5, -44.0).car_id(7, 912).build();
        let map = decode_graphics(&buf).unwrap();
        assert_eq!(map.car_coordinates[7].x, 101.0);
        assert_eq!(map.car_coordinates[7].z, -44.0);
        assert_eq!(map.car_ids[7], 912);
        assert_eq!(map.car_coordinates[6].x, 0.0);
    }

    #[test]
    fn all_zero_graphics_region_is_valid() {
        // Zero maps to Off/Practice/NoFlag/Green/NoRain, all recognized
        let map = decode_graphics(&GraphicsBuilder::new().build()).unwrap();
        assert_eq!(map.status, SharedMemoryStatus::Off);
        assert_eq!(map.penalty, Penalty::None);
        assert!(map.current_time_str.is_empty());
    }
}
