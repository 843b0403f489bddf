//! Session registry: every live match, keyed by session code.
//!
//! The registry is an owned value handed to whoever routes intents. It
//! creates sessions, seats players and observers, records placement and
//! readiness, and collects rematch votes. Attack resolution lives in the
//! engine; the registry only exposes the state it acts on.

use chrono::Utc;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{info, warn};

use super::state::{Phase, PlayerSlot, SessionState};
use crate::core::{
    ConfigError, EngineConfig, ObserverId, PlayerId, SessionId, SessionRng, Slot, DEFAULT_SESSION_CODE_LENGTH,
};
use crate::engine::admission::{require_phase, seat_of};
use crate::error::{Result, SessionError};
use crate::grid::{Grid, Placement, PlacementError};
use crate::observer::Observer;
use crate::resources::ResourceKind;

/// Colliding draws tolerated at one length before codes grow by a character.
const MAX_CODE_DRAWS: usize = 16;

/// One registry entry: the session plus its spectators and rematch votes.
#[derive(Clone, Debug)]
pub struct SessionEntry {
    pub state: SessionState,
    pub observers: Vec<Observer>,
    rematch_votes: FxHashSet<PlayerId>,
}

impl SessionEntry {
    fn new(state: SessionState) -> Self {
        Self {
            state,
            observers: Vec::new(),
            rematch_votes: FxHashSet::default(),
        }
    }

    /// Players who have asked for a rematch since the last reset.
    #[must_use]
    pub fn rematch_votes(&self) -> &FxHashSet<PlayerId> {
        &self.rematch_votes
    }
}

/// Result of `SessionRegistry::mark_ready`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// The opponent has not declared ready yet.
    Waiting,
    /// Both players are ready; the session moved to battle.
    BattleStarted,
}

/// Result of `SessionRegistry::request_rematch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RematchOutcome {
    /// Vote recorded; waiting on the opponent.
    Pending,
    /// Both voted; the session was reset in place.
    Accepted,
}

/// All live sessions.
#[derive(Clone, Debug)]
pub struct SessionRegistry {
    sessions: FxHashMap<SessionId, SessionEntry>,
    rng: SessionRng,
    code_length: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            sessions: FxHashMap::default(),
            rng: SessionRng::from_entropy(),
            code_length: DEFAULT_SESSION_CODE_LENGTH,
        }
    }
}

impl SessionRegistry {
    /// Create an empty registry.
    ///
    /// Codes and identities come from `config.seed` when set, otherwise from
    /// OS entropy. Fails if `config` does not validate.
    pub fn new(config: &EngineConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let rng = config.seed.map_or_else(SessionRng::from_entropy, SessionRng::new);
        Ok(Self {
            sessions: FxHashMap::default(),
            rng,
            code_length: config.session_code_length,
        })
    }

    // === Lifecycle ===

    /// Open a new session in the lobby with `host_name` in the first slot.
    pub fn create(&mut self, host_name: &str) -> (SessionId, PlayerId) {
        let session_id = self.fresh_code();
        let host = self.rng.player_id();

        let state = SessionState::new(session_id.clone(), PlayerSlot::new(host, host_name), Utc::now());
        self.sessions.insert(session_id.clone(), SessionEntry::new(state));

        info!(session = %session_id, player = %host, "session created");
        (session_id, host)
    }

    /// Seat `name` in the second slot and move the session to placement.
    pub fn join(&mut self, session_id: &SessionId, name: &str) -> Result<PlayerId> {
        let player = self.rng.player_id();
        let entry = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;

        if entry.state.is_full() {
            return Err(SessionError::Full(session_id.clone()));
        }

        entry.state.players[Slot::SECOND] = Some(PlayerSlot::new(player, name));
        entry.state.phase = Phase::Placement;

        info!(session = %session_id, %player, "player joined");
        Ok(player)
    }

    /// Attach a read-only observer. Allowed in any phase.
    pub fn join_observer(&mut self, session_id: &SessionId, name: &str) -> Result<ObserverId> {
        let id = self.rng.observer_id();
        let entry = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;

        entry.observers.push(Observer::new(id, name));
        info!(session = %session_id, observer = %id, "observer joined");
        Ok(id)
    }

    /// Detach an observer, wherever it is watching.
    pub fn detach_observer(&mut self, observer: ObserverId) -> Option<(SessionId, Observer)> {
        let session_id = self.session_of_observer(observer)?;
        let entry = self.sessions.get_mut(&session_id)?;
        let pos = entry.observers.iter().position(|o| o.id == observer)?;
        let removed = entry.observers.remove(pos);

        info!(session = %session_id, %observer, "observer left");
        Some((session_id, removed))
    }

    /// Drop a session entirely.
    pub fn remove(&mut self, session_id: &SessionId) -> Option<SessionEntry> {
        let entry = self.sessions.remove(session_id);
        if entry.is_some() {
            info!(session = %session_id, "session removed");
        }
        entry
    }

    // === Placement and readiness ===

    /// Replace `player`'s layout with `placements`, applied to a fresh grid
    /// in order.
    ///
    /// Individual placements that fail are skipped and returned; the rest
    /// are kept. Refused outside placement or once the player is ready.
    pub fn place_resources(
        &mut self,
        session_id: &SessionId,
        player: PlayerId,
        placements: &[Placement],
    ) -> Result<Vec<(Placement, PlacementError)>> {
        let state = &mut self.entry_mut(session_id)?.state;
        let slot = seat_of(state, player)?;
        require_phase(state, Phase::Placement)?;

        let Some(seat) = state.player_mut(slot) else {
            return Err(SessionError::UnknownPlayer);
        };
        if seat.ready {
            return Err(SessionError::AlreadyReady);
        }

        let (grid, failures) = Grid::from_layout(placements);
        for (placement, err) in &failures {
            warn!(session = %session_id, %player, kind = %placement.kind, error = %err, "placement rejected");
        }
        seat.grid = grid;

        Ok(failures)
    }

    /// Declare `player` ready. Starts the battle once both are ready.
    pub fn mark_ready(&mut self, session_id: &SessionId, player: PlayerId) -> Result<ReadyOutcome> {
        let state = &mut self.entry_mut(session_id)?.state;
        let slot = seat_of(state, player)?;
        require_phase(state, Phase::Placement)?;

        let Some(seat) = state.player_mut(slot) else {
            return Err(SessionError::UnknownPlayer);
        };
        if seat.ready {
            return Err(SessionError::AlreadyReady);
        }
        if !seat.grid.all_placed() {
            return Err(SessionError::ResourcesIncomplete {
                placed: seat.grid.placed_count(),
                required: ResourceKind::COUNT,
            });
        }
        seat.ready = true;
        info!(session = %session_id, %player, "player ready");

        if !state.both_ready() {
            return Ok(ReadyOutcome::Waiting);
        }

        state.phase = Phase::Battle;
        state.current_turn = Slot::FIRST;
        info!(session = %session_id, "battle started");
        Ok(ReadyOutcome::BattleStarted)
    }

    /// Record a rematch vote. Resets the session in place once both players
    /// have voted.
    pub fn request_rematch(&mut self, session_id: &SessionId, player: PlayerId) -> Result<RematchOutcome> {
        let entry = self.entry_mut(session_id)?;
        seat_of(&entry.state, player)?;
        require_phase(&entry.state, Phase::GameOver)?;

        entry.rematch_votes.insert(player);
        let all_voted = entry
            .state
            .players
            .iter()
            .all(|(_, p)| p.as_ref().is_some_and(|p| entry.rematch_votes.contains(&p.id)));

        if !all_voted {
            info!(session = %session_id, %player, "rematch requested");
            return Ok(RematchOutcome::Pending);
        }

        entry.rematch_votes.clear();
        entry.state.reset_for_rematch();
        info!(session = %session_id, "rematch accepted");
        Ok(RematchOutcome::Accepted)
    }

    // === Lookup ===

    /// Get a session entry.
    #[must_use]
    pub fn get(&self, session_id: &SessionId) -> Option<&SessionEntry> {
        self.sessions.get(session_id)
    }

    /// Get a session entry mutably.
    pub fn get_mut(&mut self, session_id: &SessionId) -> Option<&mut SessionEntry> {
        self.sessions.get_mut(session_id)
    }

    /// Find the session `player` is seated in.
    #[must_use]
    pub fn session_of_player(&self, player: PlayerId) -> Option<SessionId> {
        self.sessions
            .iter()
            .find(|(_, e)| e.state.slot_of(player).is_some())
            .map(|(id, _)| id.clone())
    }

    /// Find the session `observer` is watching.
    #[must_use]
    pub fn session_of_observer(&self, observer: ObserverId) -> Option<SessionId> {
        self.sessions
            .iter()
            .find(|(_, e)| e.observers.iter().any(|o| o.id == observer))
            .map(|(id, _)| id.clone())
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check whether no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    // === Internals ===

    fn entry_mut(&mut self, session_id: &SessionId) -> Result<&mut SessionEntry> {
        self.sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))
    }

    /// Draw an unused code. After `MAX_CODE_DRAWS` collisions the draw
    /// length grows by one.
    fn fresh_code(&mut self) -> SessionId {
        let mut length = self.code_length;
        loop {
            for _ in 0..MAX_CODE_DRAWS {
                let code = self.rng.session_code(length);
                if !self.sessions.contains_key(&code) {
                    return code;
                }
                warn!(session = %code, "session code collision, redrawing");
            }
            length += 1;
            warn!(length, "session code space crowded, lengthening codes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Coordinate, Orientation};

    fn seeded() -> SessionRegistry {
        SessionRegistry::new(&EngineConfig::default().with_seed(7)).unwrap()
    }

    fn full_layout() -> Vec<Placement> {
        ResourceKind::ALL
            .iter()
            .enumerate()
            .map(|(row, &kind)| Placement::new(kind, Coordinate::new(row as u8, 0), Orientation::Horizontal))
            .collect()
    }

    fn seated_pair(reg: &mut SessionRegistry) -> (SessionId, PlayerId, PlayerId) {
        let (id, host) = reg.create("alice");
        let guest = reg.join(&id, "bob").unwrap();
        (id, host, guest)
    }

    #[test]
    fn test_create_and_join() {
        let mut reg = seeded();
        let (id, host) = reg.create("alice");
        assert_eq!(id.as_str().len(), 6);
        assert_eq!(reg.get(&id).unwrap().state.phase, Phase::Lobby);

        let guest = reg.join(&id, "bob").unwrap();
        let state = &reg.get(&id).unwrap().state;
        assert_eq!(state.phase, Phase::Placement);
        assert_eq!(state.slot_of(host), Some(Slot::FIRST));
        assert_eq!(state.slot_of(guest), Some(Slot::SECOND));
        assert_eq!(reg.session_of_player(guest), Some(id));
    }

    #[test]
    fn test_join_errors() {
        let mut reg = seeded();
        let missing = SessionId::new("NOPE00");
        assert_eq!(reg.join(&missing, "bob"), Err(SessionError::NotFound(missing)));

        let (id, _, _) = seated_pair(&mut reg);
        assert_eq!(reg.join(&id, "carol"), Err(SessionError::Full(id)));
    }

    #[test]
    fn test_seeded_registries_agree() {
        let mut a = seeded();
        let mut b = seeded();
        assert_eq!(a.create("x"), b.create("x"));
    }

    #[test]
    fn test_place_resources_replaces_layout() {
        let mut reg = seeded();
        let (id, host, _) = seated_pair(&mut reg);

        let failures = reg.place_resources(&id, host, &full_layout()).unwrap();
        assert!(failures.is_empty());

        let partial = [Placement::new(ResourceKind::Router, Coordinate::new(9, 0), Orientation::Horizontal)];
        reg.place_resources(&id, host, &partial).unwrap();
        let grid = &reg.get(&id).unwrap().state.player(Slot::FIRST).unwrap().grid;
        assert_eq!(grid.placed_count(), 1);
    }

    #[test]
    fn test_place_resources_reports_failures() {
        let mut reg = seeded();
        let (id, host, _) = seated_pair(&mut reg);

        let layout = [
            Placement::new(ResourceKind::Router, Coordinate::new(0, 0), Orientation::Horizontal),
            Placement::new(ResourceKind::Backup, Coordinate::new(0, 1), Orientation::Vertical),
            Placement::new(ResourceKind::Database, Coordinate::new(0, 8), Orientation::Horizontal),
        ];
        let failures = reg.place_resources(&id, host, &layout).unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(reg.get(&id).unwrap().state.player(Slot::FIRST).unwrap().grid.placed_count(), 1);
    }

    #[test]
    fn test_place_resources_wrong_phase() {
        let mut reg = seeded();
        let (id, host) = reg.create("alice");
        let err = reg.place_resources(&id, host, &full_layout()).unwrap_err();
        assert_eq!(err.code(), "wrong-phase");
    }

    #[test]
    fn test_mark_ready_requires_all_resources() {
        let mut reg = seeded();
        let (id, host, _) = seated_pair(&mut reg);

        assert_eq!(
            reg.mark_ready(&id, host),
            Err(SessionError::ResourcesIncomplete { placed: 0, required: 6 })
        );
        assert!(!reg.get(&id).unwrap().state.player(Slot::FIRST).unwrap().ready);
    }

    #[test]
    fn test_both_ready_starts_battle() {
        let mut reg = seeded();
        let (id, host, guest) = seated_pair(&mut reg);
        reg.place_resources(&id, host, &full_layout()).unwrap();
        reg.place_resources(&id, guest, &full_layout()).unwrap();

        assert_eq!(reg.mark_ready(&id, guest), Ok(ReadyOutcome::Waiting));
        assert_eq!(reg.mark_ready(&id, guest), Err(SessionError::AlreadyReady));
        assert!(reg.place_resources(&id, guest, &full_layout()).is_err());

        assert_eq!(reg.mark_ready(&id, host), Ok(ReadyOutcome::BattleStarted));
        let state = &reg.get(&id).unwrap().state;
        assert_eq!(state.phase, Phase::Battle);
        assert_eq!(state.current_turn, Slot::FIRST);
    }

    #[test]
    fn test_rematch_requires_game_over() {
        let mut reg = seeded();
        let (id, host, _) = seated_pair(&mut reg);
        assert!(matches!(
            reg.request_rematch(&id, host),
            Err(SessionError::WrongPhase { expected: Phase::GameOver, .. })
        ));
        assert!(reg.get(&id).unwrap().rematch_votes().is_empty());
    }

    #[test]
    fn test_rematch_votes() {
        let mut reg = seeded();
        let (id, host, guest) = seated_pair(&mut reg);
        reg.get_mut(&id).unwrap().state.phase = Phase::GameOver;

        assert_eq!(reg.request_rematch(&id, host), Ok(RematchOutcome::Pending));
        assert_eq!(reg.request_rematch(&id, host), Ok(RematchOutcome::Pending));
        assert_eq!(reg.request_rematch(&id, guest), Ok(RematchOutcome::Accepted));

        let entry = reg.get(&id).unwrap();
        assert_eq!(entry.state.phase, Phase::Placement);
        assert!(entry.rematch_votes().is_empty());
    }

    #[test]
    fn test_observers() {
        let mut reg = seeded();
        let (id, _) = reg.create("alice");
        let obs = reg.join_observer(&id, "eve").unwrap();

        assert_eq!(reg.session_of_observer(obs), Some(id.clone()));
        let (from, removed) = reg.detach_observer(obs).unwrap();
        assert_eq!(from, id);
        assert_eq!(removed.name, "eve");
        assert!(reg.get(&id).unwrap().observers.is_empty());
        assert!(reg.detach_observer(obs).is_none());
    }

    #[test]
    fn test_remove() {
        let mut reg = seeded();
        let (id, host) = reg.create("alice");
        assert_eq!(reg.len(), 1);
        assert!(reg.remove(&id).is_some());
        assert!(reg.is_empty());
        assert!(reg.session_of_player(host).is_none());
        assert!(reg.remove(&id).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_session_code_length(0);
        assert!(matches!(SessionRegistry::new(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_short_codes_grow_on_collision() {
        let mut reg = SessionRegistry {
            sessions: FxHashMap::default(),
            rng: SessionRng::new(3),
            code_length: 1,
        };
        let ids: FxHashSet<SessionId> = (0..40).map(|_| reg.create("p").0).collect();
        assert_eq!(ids.len(), 40);
        assert_eq!(reg.len(), 40);
        assert!(ids.iter().any(|id| id.as_str().len() > 1));
    }
}
