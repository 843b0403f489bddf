//! Observer state and attack-update projections.

use serde::{Deserialize, Serialize};

use crate::core::{ObserverId, Slot};
use crate::engine::AttackResult;
use crate::grid::Grid;
use crate::session::{Phase, PlayerSlot, SessionState};

/// A spectator attached to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observer {
    pub id: ObserverId,
    pub name: String,
}

impl Observer {
    #[must_use]
    pub fn new(id: ObserverId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// One player as an observer sees them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub name: String,
    pub score: u32,
    pub grid: Grid,
    pub is_ready: bool,
}

impl From<&PlayerSlot> for PlayerView {
    fn from(p: &PlayerSlot) -> Self {
        Self {
            name: p.name.clone(),
            score: p.score,
            grid: p.grid.clone(),
            is_ready: p.ready,
        }
    }
}

/// Full session state for a newly attached observer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverSnapshot {
    pub phase: Phase,
    pub current_turn: Slot,
    pub player1: Option<PlayerView>,
    pub player2: Option<PlayerView>,
}

/// An attack as observers see it: the result plus both boards afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverAttackUpdate {
    pub attacker: Slot,
    pub result: AttackResult,
    pub player1_grid: Option<Grid>,
    pub player2_grid: Option<Grid>,
    pub player1_score: u32,
    pub player2_score: u32,
    pub current_turn: Slot,
}

/// Builds observer projections from session state.
pub struct ObserverView;

impl ObserverView {
    /// Snapshot of everything an observer may see.
    #[must_use]
    pub fn snapshot(session: &SessionState) -> ObserverSnapshot {
        ObserverSnapshot {
            phase: session.phase,
            current_turn: session.current_turn,
            player1: session.player(Slot::FIRST).map(PlayerView::from),
            player2: session.player(Slot::SECOND).map(PlayerView::from),
        }
    }

    /// Attack update built from the session after the attack (and any turn
    /// flip) has been applied.
    #[must_use]
    pub fn attack_update(session: &SessionState, attacker: Slot, result: &AttackResult) -> ObserverAttackUpdate {
        let grid = |slot| session.player(slot).map(|p| p.grid.clone());
        let scores = session.scores();

        ObserverAttackUpdate {
            attacker,
            result: result.clone(),
            player1_grid: grid(Slot::FIRST),
            player2_grid: grid(Slot::SECOND),
            player1_score: scores[Slot::FIRST],
            player2_score: scores[Slot::SECOND],
            current_turn: session.current_turn,
        }
    }
}
