//! Battle engine: attack and ping-sweep resolution.
//!
//! The engine holds no session state. Every call takes the session it acts
//! on, mutates it in place and returns a structured result. Callers are
//! responsible for serializing calls per session.

use tracing::{debug, error, info, warn};

use super::result::{
    offline_message, AttackOutcome, AttackResult, SweepReading, SweepResult, MSG_ALREADY_TARGETED, MSG_BREACH,
    MSG_MISSED, MSG_NO_DEFENDER, MSG_OUT_OF_BOUNDS, MSG_RESOURCE_NOT_FOUND,
};
use super::rules::{Ability, ScoringRules};
use crate::core::{Coordinate, EngineConfig, Slot};
use crate::error::{Result, SessionError};
use crate::grid::{CellStatus, Grid};
use crate::resources::ResourceKind;
use crate::session::{Phase, SessionState};

/// Resolves attacks and abilities against a session.
#[derive(Clone, Debug, Default)]
pub struct BattleEngine {
    rules: ScoringRules,
    sweep_requires_turn: bool,
}

impl BattleEngine {
    /// Create an engine with the given scoring rules.
    #[must_use]
    pub fn new(rules: ScoringRules) -> Self {
        Self {
            rules,
            sweep_requires_turn: false,
        }
    }

    /// Create an engine from the engine configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            rules: config.scoring,
            sweep_requires_turn: config.sweep_requires_turn,
        }
    }

    /// Scoring rules in effect.
    #[must_use]
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Resolve `attacker` striking `coordinate` on the opponent's grid.
    ///
    /// Evaluated in order:
    /// 1. Reject (no mutation) outside battle, out of turn, off-grid, or
    ///    with no defender seated.
    /// 2. A cell that is no longer empty is an "already targeted" no-op.
    /// 3. An unoccupied cell becomes a miss.
    /// 4. An occupied cell becomes a hit and scores hit points (doubled on
    ///    the database while admin access is active).
    /// 5. If that completes the resource: every cell becomes destroyed,
    ///    the destroy bonus is added (doubled for the database once the
    ///    server is down), the kind's ability is granted, and a wiped-out
    ///    defender ends the game with the attacker as winner.
    ///
    /// Never advances the turn.
    pub fn resolve_attack(&self, session: &mut SessionState, attacker: Slot, coordinate: Coordinate) -> AttackResult {
        if session.phase != Phase::Battle || session.current_turn != attacker {
            warn!(session = %session.id, %attacker, phase = ?session.phase, "attack out of turn rejected");
            return AttackResult::not_your_turn(coordinate);
        }
        if !coordinate.in_bounds() {
            return AttackResult::no_effect(coordinate, MSG_OUT_OF_BOUNDS);
        }

        let Some((att, def)) = session.combatants_mut(attacker) else {
            return AttackResult::no_effect(coordinate, MSG_NO_DEFENDER);
        };
        let Some(cell) = def.grid.cell(coordinate).copied() else {
            return AttackResult::no_effect(coordinate, MSG_OUT_OF_BOUNDS);
        };

        if cell.status.is_targeted() {
            debug!(%coordinate, "already targeted");
            return AttackResult::no_effect(coordinate, MSG_ALREADY_TARGETED);
        }

        if !cell.is_occupied() {
            def.grid.mark(coordinate, CellStatus::Miss);
            debug!(%coordinate, "miss");
            return AttackResult::no_effect(coordinate, MSG_MISSED);
        }

        let Some(resource) = def
            .grid
            .resource_index_at(coordinate)
            .and_then(|index| def.grid.resource_mut(index))
            .filter(|r| r.occupies(coordinate))
        else {
            error!(%coordinate, occupant = ?cell.resource, "occupied cell has no matching resource");
            return AttackResult::no_effect(coordinate, MSG_RESOURCE_NOT_FOUND);
        };

        let kind = resource.kind;
        let destroyed = resource
            .register_hit(coordinate)
            .then(|| resource.coordinates.to_vec());

        def.grid.mark(coordinate, CellStatus::Hit);
        let hit_points = self.rules.hit_points(kind, att.abilities.admin_access_active);
        att.score += hit_points;

        let Some(destroyed_coordinates) = destroyed else {
            debug!(%coordinate, %kind, points = hit_points, "hit");
            return AttackResult {
                coordinate,
                status: AttackOutcome::Hit,
                resource_type: Some(kind),
                points: hit_points,
                message: MSG_BREACH.to_string(),
                destroyed_coordinates: None,
                granted: None,
            };
        };

        for &coord in &destroyed_coordinates {
            def.grid.mark(coord, CellStatus::Destroyed);
        }

        let server_down = def.has_lost(ResourceKind::Server);
        def.record_destroyed(kind);
        let bonus = self.rules.destroy_bonus(kind, server_down);
        att.score += bonus;

        let granted = kind.on_destroyed().map(|effect| effect.resolve(attacker));
        if let Some(grant) = granted {
            let recipient = if grant.recipient == attacker { &mut *att } else { &mut *def };
            recipient.abilities.grant(grant.ability);
        }

        let wiped_out = def.grid.all_destroyed();
        debug!(%coordinate, %kind, points = hit_points + bonus, "resource destroyed");

        if wiped_out {
            session.phase = Phase::GameOver;
            session.winner = Some(attacker);
            info!(session = %session.id, winner = %attacker, "game over");
        }

        AttackResult {
            coordinate,
            status: AttackOutcome::Destroyed,
            resource_type: Some(kind),
            points: hit_points + bonus,
            message: offline_message(kind),
            destroyed_coordinates: Some(destroyed_coordinates),
            granted,
        }
    }

    /// Hand the turn to the other player.
    ///
    /// Refused outside battle, so a finished game keeps its final turn.
    /// Returns whether the turn was flipped.
    pub fn advance_turn(&self, session: &mut SessionState) -> bool {
        if session.phase != Phase::Battle {
            warn!(session = %session.id, phase = ?session.phase, "turn advance refused");
            return false;
        }
        session.flip_turn();
        true
    }

    /// Reveal the neighbors of `center` on the opponent's grid.
    ///
    /// Gated only by the attacker's ping-sweep flag (and by turn ownership
    /// when configured). Consumes the flag even if nothing is found.
    /// Untargeted occupied cells read as `hit`; no cell or score changes.
    pub fn resolve_sweep(&self, session: &mut SessionState, attacker: Slot, center: Coordinate) -> Result<SweepResult> {
        if self.sweep_requires_turn && session.current_turn != attacker {
            return Err(SessionError::NotYourTurn);
        }
        if !center.in_bounds() {
            return Err(SessionError::OutOfBounds(center));
        }

        let Some((att, def)) = session.combatants_mut(attacker) else {
            return Err(SessionError::AbilityUnavailable);
        };
        if !att.abilities.consume(Ability::PingSweep) {
            return Err(SessionError::AbilityUnavailable);
        }

        let results = Grid::neighbors(center)
            .into_iter()
            .filter_map(|coordinate| {
                def.grid.cell(coordinate).map(|cell| SweepReading {
                    coordinate,
                    status: cell.revealed_status(),
                })
            })
            .collect();

        debug!(session = %session.id, %attacker, %center, "ping sweep");
        Ok(SweepResult { center, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Orientation, PlayerId, SessionId};
    use crate::engine::result::MSG_NOT_YOUR_TURN;
    use crate::session::PlayerSlot;
    use chrono::Utc;
    use uuid::Uuid;

    fn battle_session() -> SessionState {
        let mut s = SessionState::new(
            SessionId::new("BTL001"),
            PlayerSlot::new(PlayerId(Uuid::from_u128(1)), "alice"),
            Utc::now(),
        );
        s.players[Slot::SECOND] = Some(PlayerSlot::new(PlayerId(Uuid::from_u128(2)), "bob"));
        s.phase = Phase::Battle;
        s
    }

    fn place(s: &mut SessionState, slot: Slot, kind: ResourceKind, row: u8, col: u8, o: Orientation) {
        s.player_mut(slot)
            .unwrap()
            .grid
            .place(kind, Coordinate::new(row, col), o)
            .unwrap();
    }

    #[test]
    fn test_miss_marks_cell() {
        let engine = BattleEngine::default();
        let mut s = battle_session();

        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(4, 4));
        assert_eq!(r.status, AttackOutcome::Miss);
        assert_eq!(r.points, 0);
        assert_eq!(r.message, MSG_MISSED);

        let cell = s.player(Slot::SECOND).unwrap().grid.cell(Coordinate::new(4, 4)).unwrap();
        assert_eq!(cell.status, CellStatus::Miss);
    }

    #[test]
    fn test_out_of_turn_is_noop() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        place(&mut s, Slot::FIRST, ResourceKind::Router, 0, 0, Orientation::Horizontal);
        let before = s.clone();

        let r = engine.resolve_attack(&mut s, Slot::SECOND, Coordinate::new(0, 0));
        assert_eq!(r.message, MSG_NOT_YOUR_TURN);
        assert_eq!(s, before);
    }

    #[test]
    fn test_wrong_phase_is_noop() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        s.phase = Phase::Placement;
        let before = s.clone();

        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(0, 0));
        assert_eq!(r.points, 0);
        assert_eq!(s, before);
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        let before = s.clone();

        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(10, 3));
        assert_eq!(r.message, MSG_OUT_OF_BOUNDS);
        assert_eq!(s, before);
    }

    #[test]
    fn test_router_scenario() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        place(&mut s, Slot::SECOND, ResourceKind::Router, 0, 0, Orientation::Horizontal);
        place(&mut s, Slot::SECOND, ResourceKind::Backup, 5, 5, Orientation::Vertical);

        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(0, 0));
        assert_eq!(r.status, AttackOutcome::Hit);
        assert_eq!(r.points, 10);
        assert_eq!(r.resource_type, Some(ResourceKind::Router));
        assert!(r.destroyed_coordinates.is_none());

        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(0, 1));
        assert_eq!(r.status, AttackOutcome::Destroyed);
        assert_eq!(r.points, 60);
        assert_eq!(
            r.destroyed_coordinates,
            Some(vec![Coordinate::new(0, 0), Coordinate::new(0, 1)])
        );
        assert_eq!(r.message, "[ROUTER OFFLINE] - [SYSTEM COMPROMISED]");
        assert_eq!(s.player(Slot::FIRST).unwrap().score, 70);

        let def = s.player(Slot::SECOND).unwrap();
        assert!(def.has_lost(ResourceKind::Router));
        assert_eq!(def.grid.cell(Coordinate::new(0, 0)).unwrap().status, CellStatus::Destroyed);
        assert_eq!(def.grid.cell(Coordinate::new(0, 1)).unwrap().status, CellStatus::Destroyed);
        assert_eq!(s.phase, Phase::Battle);
    }

    #[test]
    fn test_already_targeted_is_noop() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        place(&mut s, Slot::SECOND, ResourceKind::Router, 0, 0, Orientation::Horizontal);

        engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(0, 0));
        let before = s.clone();

        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(0, 0));
        assert_eq!(r.message, MSG_ALREADY_TARGETED);
        assert_eq!(r.points, 0);
        assert_eq!(s, before);
    }

    #[test]
    fn test_final_blow_ends_game() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        place(&mut s, Slot::SECOND, ResourceKind::Router, 9, 8, Orientation::Horizontal);
        // Give the defender a higher score than the attacker will end with
        s.player_mut(Slot::SECOND).unwrap().score = 5_000;

        engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(9, 8));
        let r = engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(9, 9));

        assert_eq!(r.status, AttackOutcome::Destroyed);
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(s.winner, Some(Slot::FIRST));
        assert!(!engine.advance_turn(&mut s));
        assert_eq!(s.current_turn, Slot::FIRST);
    }

    #[test]
    fn test_advance_turn() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        assert!(engine.advance_turn(&mut s));
        assert_eq!(s.current_turn, Slot::SECOND);
        assert!(engine.advance_turn(&mut s));
        assert_eq!(s.current_turn, Slot::FIRST);
    }

    #[test]
    fn test_iot_cluster_flags_defender() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        place(&mut s, Slot::SECOND, ResourceKind::IotCluster, 0, 0, Orientation::Vertical);
        place(&mut s, Slot::SECOND, ResourceKind::Router, 9, 0, Orientation::Horizontal);

        let mut last = None;
        for row in 0..3 {
            last = Some(engine.resolve_attack(&mut s, Slot::FIRST, Coordinate::new(row, 0)));
        }

        let r = last.unwrap();
        assert_eq!(r.granted.map(|g| g.recipient), Some(Slot::SECOND));
        assert!(s.player(Slot::SECOND).unwrap().abilities.ddos_effect_active);
        assert!(!s.player(Slot::FIRST).unwrap().abilities.ddos_effect_active);
    }

    #[test]
    fn test_sweep_requires_flag() {
        let engine = BattleEngine::default();
        let mut s = battle_session();

        let err = engine.resolve_sweep(&mut s, Slot::FIRST, Coordinate::new(5, 5)).unwrap_err();
        assert_eq!(err, SessionError::AbilityUnavailable);
    }

    #[test]
    fn test_sweep_reveals_without_mutation() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        place(&mut s, Slot::SECOND, ResourceKind::Firewall, 4, 4, Orientation::Horizontal);
        s.player_mut(Slot::FIRST).unwrap().abilities.ping_sweep_available = true;
        let grid_before = s.player(Slot::SECOND).unwrap().grid.clone();

        let sweep = engine.resolve_sweep(&mut s, Slot::FIRST, Coordinate::new(5, 5)).unwrap();

        assert_eq!(sweep.center, Coordinate::new(5, 5));
        assert_eq!(sweep.results.len(), 8);
        assert_eq!(sweep.status_at(Coordinate::new(4, 4)), Some(CellStatus::Hit));
        assert_eq!(sweep.status_at(Coordinate::new(4, 6)), Some(CellStatus::Hit));
        assert_eq!(sweep.status_at(Coordinate::new(6, 6)), Some(CellStatus::Empty));
        assert_eq!(sweep.status_at(Coordinate::new(5, 5)), None);

        assert_eq!(s.player(Slot::SECOND).unwrap().grid, grid_before);
        assert_eq!(s.player(Slot::FIRST).unwrap().score, 0);
        assert!(!s.player(Slot::FIRST).unwrap().abilities.ping_sweep_available);
    }

    #[test]
    fn test_sweep_ignores_turn_by_default() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        s.player_mut(Slot::SECOND).unwrap().abilities.ping_sweep_available = true;

        assert!(engine.resolve_sweep(&mut s, Slot::SECOND, Coordinate::new(0, 0)).is_ok());
    }

    #[test]
    fn test_sweep_turn_gate_when_configured() {
        let engine = BattleEngine::from_config(&EngineConfig::default().with_sweep_requires_turn(true));
        let mut s = battle_session();
        s.player_mut(Slot::SECOND).unwrap().abilities.ping_sweep_available = true;

        let err = engine.resolve_sweep(&mut s, Slot::SECOND, Coordinate::new(0, 0)).unwrap_err();
        assert_eq!(err, SessionError::NotYourTurn);
        // Flag not consumed by a rejection
        assert!(s.player(Slot::SECOND).unwrap().abilities.ping_sweep_available);
    }

    #[test]
    fn test_sweep_out_of_bounds_keeps_flag() {
        let engine = BattleEngine::default();
        let mut s = battle_session();
        s.player_mut(Slot::FIRST).unwrap().abilities.ping_sweep_available = true;

        let err = engine.resolve_sweep(&mut s, Slot::FIRST, Coordinate::new(12, 0)).unwrap_err();
        assert_eq!(err, SessionError::OutOfBounds(Coordinate::new(12, 0)));
        assert!(s.player(Slot::FIRST).unwrap().abilities.ping_sweep_available);
    }
}
