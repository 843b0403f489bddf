//! Results returned by the battle engine.

use serde::{Deserialize, Serialize};

use super::rules::AbilityGrant;
use crate::core::Coordinate;
use crate::grid::CellStatus;
use crate::resources::ResourceKind;

pub const MSG_MISSED: &str = "[MISSED]";
pub const MSG_ALREADY_TARGETED: &str = "[ALREADY TARGETED]";
pub const MSG_BREACH: &str = "[BREACH] - [ACCESS GRANTED]";
pub const MSG_NOT_YOUR_TURN: &str = "[ERROR] - Not your turn";
pub const MSG_OUT_OF_BOUNDS: &str = "[ERROR] - Target out of range";
pub const MSG_NO_DEFENDER: &str = "[ERROR] - Defender not found";
pub const MSG_RESOURCE_NOT_FOUND: &str = "[ERROR] - Resource not found";

/// What an attack did to the target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackOutcome {
    Miss,
    Hit,
    Destroyed,
}

/// Result of one attack.
///
/// Rejections and already-targeted cells come back as zero-point misses,
/// told apart from a real miss only by `message`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResult {
    pub coordinate: Coordinate,
    pub status: AttackOutcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceKind>,

    /// Total points awarded by this action (hit plus any destroy bonus).
    pub points: u32,

    /// Human-readable status tag.
    pub message: String,

    /// Every coordinate of the destroyed resource. Only set on destroy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destroyed_coordinates: Option<Vec<Coordinate>>,

    /// Ability granted by this destroy, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted: Option<AbilityGrant>,
}

impl AttackResult {
    /// A zero-point miss carrying `message`.
    #[must_use]
    pub fn no_effect(coordinate: Coordinate, message: impl Into<String>) -> Self {
        Self {
            coordinate,
            status: AttackOutcome::Miss,
            resource_type: None,
            points: 0,
            message: message.into(),
            destroyed_coordinates: None,
            granted: None,
        }
    }

    /// A turn-ownership rejection.
    #[must_use]
    pub fn not_your_turn(coordinate: Coordinate) -> Self {
        Self::no_effect(coordinate, MSG_NOT_YOUR_TURN)
    }

    /// Did the attack strike a resource?
    #[must_use]
    pub fn was_hit(&self) -> bool {
        self.status != AttackOutcome::Miss
    }
}

/// Status tag for a destroyed resource, e.g. `[SERVER OFFLINE] - [SYSTEM COMPROMISED]`.
#[must_use]
pub fn offline_message(kind: ResourceKind) -> String {
    format!("[{} OFFLINE] - [SYSTEM COMPROMISED]", kind.name().to_uppercase())
}

/// One neighbor reading from a ping sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReading {
    pub coordinate: Coordinate,
    pub status: CellStatus,
}

/// Result of a ping sweep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResult {
    pub center: Coordinate,
    /// One entry per in-bounds neighbor, row-major.
    pub results: Vec<SweepReading>,
}

impl SweepResult {
    /// Reading for a specific neighbor.
    #[must_use]
    pub fn status_at(&self, coord: Coordinate) -> Option<CellStatus> {
        self.results
            .iter()
            .find(|r| r.coordinate == coord)
            .map(|r| r.status)
    }
}
