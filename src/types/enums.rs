//! Symbolic enumerations for the raw integer codes the game writes.
//!
//! Every enumeration decodes through `from_raw`, which fails on an
//! unrecognized integer. [`Penalty`] is the single deliberate exception: the
//! game adds new penalty codes without bumping any protocol version, so an
//! unknown code degrades to [`Penalty::Unrecognized`] instead of failing the
//! whole graphics decode.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TelemetryError};
use crate::schema::Region;

/// Game status as reported at the head of the graphics region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharedMemoryStatus {
    Off,
    Replay,
    Live,
    Pause,
}

impl SharedMemoryStatus {
    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Off),
            1 => Ok(Self::Replay),
            2 => Ok(Self::Live),
            3 => Ok(Self::Pause),
            _ => Err(TelemetryError::unknown_enum(Region::Graphics, "status", raw)),
        }
    }
}

/// Session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    Unknown,
    Practice,
    Qualify,
    Race,
    Hotlap,
    TimeAttack,
    Drift,
    Drag,
    Hotstint,
    HotlapSuperpole,
}

impl SessionType {
    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            -1 => Ok(Self::Unknown),
            0 => Ok(Self::Practice),
            1 => Ok(Self::Qualify),
            2 => Ok(Self::Race),
            3 => Ok(Self::Hotlap),
            4 => Ok(Self::TimeAttack),
            5 => Ok(Self::Drift),
            6 => Ok(Self::Drag),
            7 => Ok(Self::Hotstint),
            8 => Ok(Self::HotlapSuperpole),
            _ => Err(TelemetryError::unknown_enum(Region::Graphics, "sessionType", raw)),
        }
    }
}

/// Flag currently shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagType {
    None,
    Blue,
    Yellow,
    Black,
    White,
    Checkered,
    Penalty,
    Green,
    Orange,
}

impl FlagType {
    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::None),
            1 => Ok(Self::Blue),
            2 => Ok(Self::Yellow),
            3 => Ok(Self::Black),
            4 => Ok(Self::White),
            5 => Ok(Self::Checkered),
            6 => Ok(Self::Penalty),
            7 => Ok(Self::Green),
            8 => Ok(Self::Orange),
            _ => Err(TelemetryError::unknown_enum(Region::Graphics, "flag", raw)),
        }
    }
}

/// Penalty assigned to the player.
///
/// The game has shipped new codes without documentation: wrong-way was
/// observed as 18 in older builds and 22 in current ones, with no migration
/// notes. Both are kept as distinct variants so callers can resolve the
/// ambiguity themselves. Any other unknown code maps to
/// [`Penalty::Unrecognized`] carrying the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Penalty {
    None,
    DriveThroughCutting,
    StopAndGo10Cutting,
    StopAndGo20Cutting,
    StopAndGo30Cutting,
    DisqualifiedCutting,
    RemoveBestLaptimeCutting,
    DriveThroughPitSpeeding,
    StopAndGo10PitSpeeding,
    StopAndGo20PitSpeeding,
    StopAndGo30PitSpeeding,
    DisqualifiedPitSpeeding,
    RemoveBestLaptimePitSpeeding,
    DisqualifiedIgnoredMandatoryPit,
    PostRaceTime,
    DisqualifiedTrolling,
    DisqualifiedPitEntry,
    DisqualifiedPitExit,
    /// Wrong-way disqualification as written by pre-1.8 game builds (raw 18).
    DisqualifiedWrongWayOld,
    DriveThroughIgnoredDriverStint,
    DisqualifiedIgnoredDriverStint,
    DisqualifiedExceededDriverStintLimit,
    /// Wrong-way disqualification as written by current game builds (raw 22).
    DisqualifiedWrongWay,
    /// A code this library does not know about, preserved verbatim.
    Unrecognized(i32),
}

impl Penalty {
    /// Never fails: unknown codes become [`Penalty::Unrecognized`].
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::DriveThroughCutting,
            2 => Self::StopAndGo10Cutting,
            3 => Self::StopAndGo20Cutting,
            4 => Self::StopAndGo30Cutting,
            5 => Self::DisqualifiedCutting,
            6 => Self::RemoveBestLaptimeCutting,
            7 => Self::DriveThroughPitSpeeding,
            8 => Self::StopAndGo10PitSpeeding,
            9 => Self::StopAndGo20PitSpeeding,
            10 => Self::StopAndGo30PitSpeeding,
            11 => Self::DisqualifiedPitSpeeding,
            12 => Self::RemoveBestLaptimePitSpeeding,
            13 => Self::DisqualifiedIgnoredMandatoryPit,
            14 => Self::PostRaceTime,
            15 => Self::DisqualifiedTrolling,
            16 => Self::DisqualifiedPitEntry,
            17 => Self::DisqualifiedPitExit,
            18 => Self::DisqualifiedWrongWayOld,
            19 => Self::DriveThroughIgnoredDriverStint,
            20 => Self::DisqualifiedIgnoredDriverStint,
            21 => Self::DisqualifiedExceededDriverStintLimit,
            22 => Self::DisqualifiedWrongWay,
            other => Self::Unrecognized(other),
        }
    }
}

/// Track grip level reported by the dynamic track model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackGripStatus {
    Green,
    Fast,
    Optimum,
    Greasy,
    Damp,
    Wet,
    Flooded,
}

impl TrackGripStatus {
    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Green),
            1 => Ok(Self::Fast),
            2 => Ok(Self::Optimum),
            3 => Ok(Self::Greasy),
            4 => Ok(Self::Damp),
            5 => Ok(Self::Wet),
            6 => Ok(Self::Flooded),
            _ => Err(TelemetryError::unknown_enum(Region::Graphics, "trackGripStatus", raw)),
        }
    }
}

/// Rain intensity, used for current weather and the 10/30 minute forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainIntensity {
    NoRain,
    Drizzle,
    LightRain,
    MediumRain,
    HeavyRain,
    Thunderstorm,
}

impl RainIntensity {
    pub fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::NoRain),
            1 => Ok(Self::Drizzle),
            2 => Ok(Self::LightRain),
            3 => Ok(Self::MediumRain),
            4 => Ok(Self::HeavyRain),
            5 => Ok(Self::Thunderstorm),
            _ => Err(TelemetryError::unknown_enum(Region::Graphics, "rainIntensity", raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_enums_reject_unknown_values() {
        assert!(SharedMemoryStatus::from_raw(4).is_err());
        assert!(SessionType::from_raw(9).is_err());
        assert!(SessionType::from_raw(-2).is_err());
        assert!(FlagType::from_raw(99).is_err());
        assert!(TrackGripStatus::from_raw(7).is_err());
        assert!(RainIntensity::from_raw(6).is_err());
    }

    #[test]
    fn strict_enums_accept_known_values() {
        assert_eq!(SharedMemoryStatus::from_raw(2).unwrap(), SharedMemoryStatus::Live);
        assert_eq!(SessionType::from_raw(-1).unwrap(), SessionType::Unknown);
        assert_eq!(SessionType::from_raw(8).unwrap(), SessionType::HotlapSuperpole);
        assert_eq!(FlagType::from_raw(5).unwrap(), FlagType::Checkered);
        assert_eq!(RainIntensity::from_raw(5).unwrap(), RainIntensity::Thunderstorm);
    }

    #[test]
    fn penalty_degrades_gracefully() {
        assert_eq!(Penalty::from_raw(0), Penalty::None);
        assert_eq!(Penalty::from_raw(22), Penalty::DisqualifiedWrongWay);
        assert_eq!(Penalty::from_raw(18), Penalty::DisqualifiedWrongWayOld);
        // Codes the game may introduce tomorrow must not fail the decode
        assert_eq!(Penalty::from_raw(23), Penalty::Unrecognized(23));
        assert_eq!(Penalty::from_raw(-1), Penalty::Unrecognized(-1));
    }

    #[test]
    fn wrong_way_constants_stay_distinct() {
        assert_ne!(Penalty::from_raw(18), Penalty::from_raw(22));
    }

    #[test]
    fn unknown_enum_error_reports_field_and_value() {
        let err = SessionType::from_raw(42).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sessionType"));
        assert!(msg.contains("42"));
    }
}
