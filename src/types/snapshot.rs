//! Snapshot type exchanged across the task boundary.

use serde::{Deserialize, Serialize};

use super::{GraphicsMap, PhysicsFrame, StaticInfo};

/// The triple of decoded records observed at one instant.
///
/// This is the unit that crosses from the reader task to consumers. It owns
/// deep copies of all three records and never aliases the live memory-mapped
/// buffers, so it stays valid for as long as the consumer keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub physics: PhysicsFrame,
    pub graphics: GraphicsMap,
    pub statics: StaticInfo,
}
