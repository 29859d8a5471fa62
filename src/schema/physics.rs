//! Physics region decoder.

use tracing::trace;

use crate::error::Result;
use crate::types::PhysicsFrame;

use super::{Region, RegionCursor};

/// Decode the physics region into a [`PhysicsFrame`].
///
/// Pure and all-or-nothing: either every field decodes or the error names the
/// field where the layout walk failed. Reserved fields the game never
/// populates are consumed but not exposed.
pub fn decode_physics(buf: &[u8]) -> Result<PhysicsFrame> {
    let mut c = RegionCursor::new(Region::Physics, buf)?;

    let packet_id = c.read_i32("packetId")?;
    let gas = c.read_f32("gas")?;
    let brake = c.read_f32("brake")?;
    let fuel = c.read_f32("fuel")?;
    let gear = c.read_i32("gear")?;
    let rpm = c.read_i32("rpm")?;
    let steer_angle = c.read_f32("steerAngle")?;
    let speed_kmh = c.read_f32("speedKmh")?;
    let velocity = c.read_vector3("velocity")?;
    let g_force = c.read_vector3("accG")?;

    let wheel_slip = c.read_wheels("wheelSlip")?;
    c.skip_array("wheelLoad", 4)?; // not populated by the game
    let wheel_pressure = c.read_wheels("wheelsPressure")?;
    let wheel_angular_speed = c.read_wheels("wheelAngularSpeed")?;
    c.skip_array("tyreWear", 4)?;
    c.skip_array("tyreDirtyLevel", 4)?;
    let tyre_core_temp = c.read_wheels("tyreCoreTemperature")?;
    c.skip_array("camberRad", 4)?;
    let suspension_travel = c.read_wheels("suspensionTravel")?;

    c.skip_scalar("drs")?;
    let tc = c.read_f32("tc")?;
    let heading = c.read_f32("heading")?;
    let pitch = c.read_f32("pitch")?;
    let roll = c.read_f32("roll")?;
    c.skip_scalar("cgHeight")?;
    let car_damage = c.read_damage("carDamage")?;
    c.skip_scalar("numberOfTyresOut")?;
    let pit_limiter_on = c.read_bool("pitLimiterOn")?;
    let abs = c.read_f32("abs")?;
    c.skip_scalar("kersCharge")?;
    c.skip_scalar("kersInput")?;
    let autoshifter_on = c.read_bool("autoShifterOn")?;
    c.skip_array("rideHeight", 2)?;
    let turbo_boost = c.read_f32("turboBoost")?;
    c.skip_scalar("ballast")?;
    c.skip_scalar("airDensity")?;
    let air_temp = c.read_f32("airTemp")?;
    let road_temp = c.read_f32("roadTemp")?;
    let local_angular_velocity = c.read_vector3("localAngularVel")?;
    let final_ff = c.read_f32("finalFF")?;
    c.skip_scalar("performanceMeter")?;

    c.skip_scalar("engineBrake")?;
    c.skip_scalar("ersRecoveryLevel")?;
    c.skip_scalar("ersPowerLevel")?;
    c.skip_scalar("ersHeatCharging")?;
    c.skip_scalar("ersIsCharging")?;
    c.skip_scalar("kersCurrentKJ")?;
    c.skip_scalar("drsAvailable")?;
    c.skip_scalar("drsEnabled")?;

    let brake_temp = c.read_wheels("brakeTemp")?;
    let clutch = c.read_f32("clutch")?;
    c.skip_array("tyreTempI", 4)?;
    c.skip_array("tyreTempM", 4)?;
    c.skip_array("tyreTempO", 4)?;
    let is_ai_controlled = c.read_bool("isAiControlled")?;

    let tyre_contact_point = c.read_wheel_vectors("tyreContactPoint")?;
    let tyre_contact_normal = c.read_wheel_vectors("tyreContactNormal")?;
    let tyre_contact_heading = c.read_wheel_vectors("tyreContactHeading")?;

    let brake_bias = c.read_f32("brakeBias")?;
    let local_velocity = c.read_vector3("localVelocity")?;

    c.skip_scalar("p2pActivation")?;
    c.skip_scalar("p2pStatus")?;
    c.skip_scalar("currentMaxRpm")?;
    c.skip_array("mz", 4)?;
    c.skip_array("fz", 4)?;
    c.skip_array("my", 4)?;
    let slip_ratio = c.read_wheels("slipRatio")?;
    let slip_angle = c.read_wheels("slipAngle")?;
    c.skip_scalar("tcInAction")?;
    c.skip_scalar("absInAction")?;
    let suspension_damage = c.read_wheels("suspensionDamage")?;
    c.skip_array("tyreTemp", 4)?;
    let water_temp = c.read_f32("waterTemp")?;

    let brake_pressure = c.read_wheels("brakePressure")?;
    let front_brake_compound = c.read_i32("frontBrakeCompound")?;
    let rear_brake_compound = c.read_i32("rearBrakeCompound")?;
    let pad_life = c.read_wheels("padLife")?;
    let disc_life = c.read_wheels("discLife")?;

    let ignition_on = c.read_bool("ignitionOn")?;
    let starter_engine_on = c.read_bool("starterEngineOn")?;
    let is_engine_running = c.read_bool("isEngineRunning")?;

    let kerb_vibration = c.read_f32("kerbVibration")?;
    let slip_vibration = c.read_f32("slipVibrations")?;
    let g_vibration = c.read_f32("gVibrations")?;
    let abs_vibration = c.read_f32("absVibrations")?;

    debug_assert_eq!(c.position(), Region::Physics.size());
    trace!(packet_id, "Decoded physics frame");

    Ok(PhysicsFrame {
        packet_id,
        gas,
        brake,
        fuel,
        gear,
        rpm,
        steer_angle,
        speed_kmh,
        velocity,
        g_force,
        wheel_slip,
        wheel_pressure,
        wheel_angular_speed,
        tyre_core_temp,
        suspension_travel,
        tc,
        heading,
        pitch,
        roll,
        car_damage,
        pit_limiter_on,
        abs,
        autoshifter_on,
        turbo_boost,
        air_temp,
        road_temp,
        local_angular_velocity,
        final_ff,
        brake_temp,
        clutch,
        is_ai_controlled,
        tyre_contact_point,
        tyre_contact_normal,
        tyre_contact_heading,
        brake_bias,
        local_velocity,
        slip_ratio,
        slip_angle,
        suspension_damage,
        water_temp,
        brake_pressure,
        front_brake_compound,
        rear_brake_compound,
        pad_life,
        disc_life,
        ignition_on,
        starter_engine_on,
        is_engine_running,
        kerb_vibration,
        slip_vibration,
        g_vibration,
        abs_vibration,
    })
}
