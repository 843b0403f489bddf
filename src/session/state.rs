//! Session state: one match's authoritative truth.
//!
//! ## PlayerSlot
//!
//! Everything the engine tracks per combatant: identity, grid, score,
//! ability flags, destroyed kinds and readiness.
//!
//! ## SessionState
//!
//! Two slots (the second empty until someone joins), the phase, whose turn
//! it is and the winner. Owned exclusively by its registry entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, SessionId, Slot, SlotPair};
use crate::engine::Ability;
use crate::grid::Grid;
use crate::resources::ResourceKind;

/// Match phase. Only moves forward, except for a rematch reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Waiting for a second player.
    #[default]
    Lobby,
    /// Both players present, laying out resources.
    Placement,
    /// Alternating attacks.
    Battle,
    /// A grid has been wiped out. Terminal until a rematch.
    GameOver,
}

/// Per-player ability flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityFlags {
    pub ping_sweep_available: bool,
    pub admin_access_active: bool,
    pub ddos_effect_active: bool,
}

impl AbilityFlags {
    /// Turn an ability on.
    pub fn grant(&mut self, ability: Ability) {
        *self.flag_mut(ability) = true;
    }

    /// Turn an ability off, returning whether it was on.
    pub fn consume(&mut self, ability: Ability) -> bool {
        std::mem::replace(self.flag_mut(ability), false)
    }

    fn flag_mut(&mut self, ability: Ability) -> &mut bool {
        match ability {
            Ability::PingSweep => &mut self.ping_sweep_available,
            Ability::AdminAccess => &mut self.admin_access_active,
            Ability::DdosEffect => &mut self.ddos_effect_active,
        }
    }
}

/// One combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub id: PlayerId,
    pub name: String,
    pub grid: Grid,
    pub score: u32,
    pub abilities: AbilityFlags,

    /// Kinds of this player's resources that have been destroyed, in order.
    pub destroyed_kinds: SmallVec<[ResourceKind; 6]>,

    pub ready: bool,
}

impl PlayerSlot {
    /// Create a fresh player with an empty grid.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            grid: Grid::new(),
            score: 0,
            abilities: AbilityFlags::default(),
            destroyed_kinds: SmallVec::new(),
            ready: false,
        }
    }

    /// Check whether a kind of this player's has been destroyed.
    #[must_use]
    pub fn has_lost(&self, kind: ResourceKind) -> bool {
        self.destroyed_kinds.contains(&kind)
    }

    /// Record the destruction of one of this player's resources.
    ///
    /// Returns `false` if the kind was already recorded.
    pub fn record_destroyed(&mut self, kind: ResourceKind) -> bool {
        if self.has_lost(kind) {
            return false;
        }
        self.destroyed_kinds.push(kind);
        true
    }

    /// Clear everything a rematch resets. Identity and name are kept.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.abilities = AbilityFlags::default();
        self.destroyed_kinds.clear();
        self.ready = false;
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub id: SessionId,
    pub phase: Phase,

    /// Host in `Slot::FIRST`; `Slot::SECOND` is `None` until joined.
    pub players: SlotPair<Option<PlayerSlot>>,

    pub current_turn: Slot,
    pub winner: Option<Slot>,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    /// Create a session in the lobby with the host seated.
    #[must_use]
    pub fn new(id: SessionId, host: PlayerSlot, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            phase: Phase::Lobby,
            players: SlotPair::new(Some(host), None),
            current_turn: Slot::FIRST,
            winner: None,
            created_at,
        }
    }

    // === Slots ===

    /// Find the slot held by `player`.
    #[must_use]
    pub fn slot_of(&self, player: PlayerId) -> Option<Slot> {
        self.players
            .iter()
            .find(|(_, p)| p.as_ref().is_some_and(|p| p.id == player))
            .map(|(slot, _)| slot)
    }

    /// Get the player in `slot`.
    #[must_use]
    pub fn player(&self, slot: Slot) -> Option<&PlayerSlot> {
        self.players[slot].as_ref()
    }

    /// Get the player in `slot` mutably.
    pub fn player_mut(&mut self, slot: Slot) -> Option<&mut PlayerSlot> {
        self.players[slot].as_mut()
    }

    /// Borrow the player in `slot` and the opponent at the same time.
    ///
    /// Returns `None` unless both slots are filled.
    pub fn combatants_mut(&mut self, slot: Slot) -> Option<(&mut PlayerSlot, &mut PlayerSlot)> {
        match self.players.split_mut(slot) {
            (Some(me), Some(them)) => Some((me, them)),
            _ => None,
        }
    }

    /// Check whether the second slot has been taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.iter().all(|(_, p)| p.is_some())
    }

    /// Check whether both players have declared ready.
    #[must_use]
    pub fn both_ready(&self) -> bool {
        self.players
            .iter()
            .all(|(_, p)| p.as_ref().is_some_and(|p| p.ready))
    }

    /// Current scores, zero for an empty slot.
    #[must_use]
    pub fn scores(&self) -> SlotPair<u32> {
        self.players.map(|p| p.as_ref().map_or(0, |p| p.score))
    }

    // === Transitions ===

    /// Flip the turn to the other slot.
    pub fn flip_turn(&mut self) {
        self.current_turn = self.current_turn.other();
    }

    /// Reset for a rematch: fresh grids, zero scores, cleared abilities,
    /// destroyed kinds and readiness, back to placement, no winner.
    ///
    /// Session id, identities and names are kept.
    pub fn reset_for_rematch(&mut self) {
        for (_, player) in self.players.iter_mut() {
            if let Some(player) = player {
                player.reset();
            }
        }
        self.phase = Phase::Placement;
        self.current_turn = Slot::FIRST;
        self.winner = None;
    }
}
