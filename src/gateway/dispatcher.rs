//! Intent dispatch.
//!
//! `Gateway` owns the registry and the battle engine. Each call handles one
//! intent to completion and returns the reply plus the ordered fan-out.
//! Wrap it in whatever lock or actor the transport uses; it does no
//! synchronization of its own.

use tracing::{debug, info};

use super::broadcast::{Delivery, Dispatch, Outbound, PlacementFailure, Recipient, Reply};
use super::intent::{Identity, Intent};
use crate::core::{ConfigError, Coordinate, EngineConfig, PlayerId, SessionId, Slot};
use crate::engine::admission::{admit_attack, admit_sweep};
use crate::engine::{AttackResult, BattleEngine, MSG_OUT_OF_BOUNDS};
use crate::error::{Result, SessionError};
use crate::grid::Placement;
use crate::observer::ObserverView;
use crate::session::{Phase, ReadyOutcome, RematchOutcome, SessionEntry, SessionRegistry};

/// Transport-agnostic front door to the engine.
#[derive(Clone, Debug)]
pub struct Gateway {
    registry: SessionRegistry,
    engine: BattleEngine,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::with_registry(SessionRegistry::default(), BattleEngine::default())
    }
}

impl Gateway {
    /// Create a gateway with a fresh registry, validating `config` first.
    pub fn new(config: &EngineConfig) -> std::result::Result<Self, ConfigError> {
        let registry = SessionRegistry::new(config)?;
        Ok(Self::with_registry(registry, BattleEngine::from_config(config)))
    }

    /// Create a gateway around an existing registry and engine.
    #[must_use]
    pub fn with_registry(registry: SessionRegistry, engine: BattleEngine) -> Self {
        Self { registry, engine }
    }

    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SessionRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    /// Handle one intent from `from` (`None` before create/join).
    pub fn handle(&mut self, from: Option<Identity>, intent: Intent) -> Dispatch {
        debug!(intent = intent.name(), ?from, "handling intent");

        self.route(from, intent).unwrap_or_else(|err| {
            debug!(code = err.code(), "intent refused");
            Dispatch::from(err)
        })
    }

    fn route(&mut self, from: Option<Identity>, intent: Intent) -> Result<Dispatch> {
        match intent {
            Intent::CreateSession { player_name } => Ok(self.create_session(&player_name)),
            Intent::JoinSession {
                session_id,
                player_name,
            } => self.join_session(&session_id, &player_name),
            Intent::JoinAsObserver {
                session_id,
                observer_name,
            } => self.join_observer(&session_id, &observer_name),
            Intent::PlaceResources { placements } => {
                let (player, session_id) = self.seated(from)?;
                self.place_resources(&session_id, player, &placements)
            }
            Intent::DeclareReady => {
                let (player, session_id) = self.seated(from)?;
                self.declare_ready(&session_id, player)
            }
            Intent::Attack { coordinate } => {
                let (player, session_id) = self.seated(from)?;
                self.attack(&session_id, player, coordinate)
            }
            Intent::UsePingSweep { coordinate } => {
                let (player, session_id) = self.seated(from)?;
                self.ping_sweep(&session_id, player, coordinate)
            }
            Intent::RequestRematch => {
                let (player, session_id) = self.seated(from)?;
                self.request_rematch(&session_id, player)
            }
        }
    }

    /// Handle a dropped connection.
    ///
    /// An observer is only detached. A participant leaving ends the
    /// session: the remaining player and observers are told, then the
    /// session is removed.
    pub fn disconnect(&mut self, who: Identity) -> Vec<Delivery> {
        let mut out = Vec::new();
        match who {
            Identity::Observer(observer) => {
                self.registry.detach_observer(observer);
            }
            Identity::Player(player) => {
                let Some(entry) = self
                    .registry
                    .session_of_player(player)
                    .and_then(|session_id| self.registry.remove(&session_id))
                else {
                    return out;
                };

                let notice = Outbound::PlayerDisconnected { player_id: player };
                if let Some(opponent) = opponent_of(&entry, player) {
                    out.push(Delivery {
                        recipient: Recipient::Player(opponent),
                        message: notice.clone(),
                    });
                }
                to_observers(&mut out, &entry, &notice);

                info!(session = %entry.state.id, %player, "participant disconnected, session closed");
            }
        }
        out
    }

    // === Lobby ===

    fn create_session(&mut self, player_name: &str) -> Dispatch {
        let (session_id, player_id) = self.registry.create(player_name);
        Dispatch::reply(Reply::SessionCreated {
            session_id,
            player_id,
            slot: Slot::FIRST,
        })
    }

    fn join_session(&mut self, session_id: &SessionId, player_name: &str) -> Result<Dispatch> {
        let player_id = self.registry.join(session_id, player_name)?;
        let entry = self.entry(session_id)?;
        let state = &entry.state;

        let host = state.player(Slot::FIRST).ok_or(SessionError::UnknownPlayer)?;
        let mut dispatch = Dispatch::reply(Reply::SessionJoined {
            session_id: session_id.clone(),
            player_id,
            slot: Slot::SECOND,
            opponent_name: host.name.clone(),
        });

        dispatch.push(
            Recipient::Player(host.id),
            Outbound::OpponentJoined {
                opponent_name: player_name.to_string(),
            },
        );
        to_players(&mut dispatch.deliveries, entry, &Outbound::PhaseChanged { phase: state.phase });
        observer_state(&mut dispatch.deliveries, entry);
        Ok(dispatch)
    }

    fn join_observer(&mut self, session_id: &SessionId, observer_name: &str) -> Result<Dispatch> {
        let observer_id = self.registry.join_observer(session_id, observer_name)?;
        let entry = self.entry(session_id)?;

        Ok(Dispatch::reply(Reply::ObserverJoined {
            session_id: session_id.clone(),
            observer_id,
            state: ObserverView::snapshot(&entry.state),
        }))
    }

    // === Placement ===

    fn place_resources(&mut self, session_id: &SessionId, player: PlayerId, placements: &[Placement]) -> Result<Dispatch> {
        let failures = self.registry.place_resources(session_id, player, placements)?;
        let entry = self.entry(session_id)?;

        let placed = entry
            .state
            .slot_of(player)
            .and_then(|slot| entry.state.player(slot))
            .map_or(0, |p| p.grid.placed_count());

        let mut dispatch = Dispatch::reply(Reply::ResourcesPlaced {
            placed,
            failures: failures.into_iter().map(PlacementFailure::from).collect(),
        });
        observer_state(&mut dispatch.deliveries, entry);
        Ok(dispatch)
    }

    fn declare_ready(&mut self, session_id: &SessionId, player: PlayerId) -> Result<Dispatch> {
        let outcome = self.registry.mark_ready(session_id, player)?;
        let entry = self.entry(session_id)?;
        let state = &entry.state;

        let battle_started = outcome == ReadyOutcome::BattleStarted;
        let mut dispatch = Dispatch::reply(Reply::ReadyConfirmed { battle_started });

        if let Some(opponent) = opponent_of(entry, player) {
            dispatch.push(Recipient::Player(opponent), Outbound::OpponentReady);
        }

        if battle_started {
            to_players(&mut dispatch.deliveries, entry, &Outbound::PhaseChanged { phase: state.phase });
            to_players(
                &mut dispatch.deliveries,
                entry,
                &Outbound::BattleStarted {
                    current_turn: state.current_turn,
                },
            );
            if let Some(first) = state.player(state.current_turn) {
                dispatch.push(Recipient::Player(first.id), Outbound::YourTurn);
            }
        }

        observer_state(&mut dispatch.deliveries, entry);
        Ok(dispatch)
    }

    // === Battle ===

    /// Attack flow. Fan-out order: opponent-attacked, ability grant,
    /// observer update, then game-over or your-turn.
    fn attack(&mut self, session_id: &SessionId, player: PlayerId, coordinate: Coordinate) -> Result<Dispatch> {
        let entry = lookup_mut(&mut self.registry, session_id)?;

        let attacker = match admit_attack(&entry.state, player, coordinate) {
            Ok(slot) => slot,
            Err(err) => {
                debug!(session = %session_id, %player, code = err.code(), "attack refused");
                let result = match err {
                    SessionError::OutOfBounds(_) => AttackResult::no_effect(coordinate, MSG_OUT_OF_BOUNDS),
                    _ => AttackResult::not_your_turn(coordinate),
                };
                return Ok(Dispatch::reply(Reply::AttackResult { result }));
            }
        };

        let result = self.engine.resolve_attack(&mut entry.state, attacker, coordinate);
        let game_over = entry.state.phase == Phase::GameOver;
        if !game_over {
            self.engine.advance_turn(&mut entry.state);
        }

        let entry = self.entry(session_id)?;
        let state = &entry.state;
        let mut dispatch = Dispatch::reply(Reply::AttackResult { result: result.clone() });

        if let Some(defender) = state.player(attacker.other()) {
            dispatch.push(
                Recipient::Player(defender.id),
                Outbound::OpponentAttacked {
                    coordinate,
                    was_hit: result.was_hit(),
                },
            );
        }

        if let Some(grant) = result.granted {
            if let Some(recipient) = state.player(grant.recipient) {
                dispatch.push(Recipient::Player(recipient.id), Outbound::AbilityGranted { grant });
            }
        }

        let update = ObserverView::attack_update(state, attacker, &result);
        to_observers(&mut dispatch.deliveries, entry, &Outbound::ObserverAttackUpdate { update });

        match state.winner.filter(|_| game_over) {
            Some(winner) => {
                let event = Outbound::GameOver {
                    winner,
                    winner_name: state.player(winner).map(|p| p.name.clone()).unwrap_or_default(),
                    final_scores: state.scores(),
                };
                to_players(&mut dispatch.deliveries, entry, &event);
                to_observers(&mut dispatch.deliveries, entry, &event);
            }
            None => {
                if let Some(next) = state.player(state.current_turn) {
                    dispatch.push(Recipient::Player(next.id), Outbound::YourTurn);
                }
            }
        }

        Ok(dispatch)
    }

    fn ping_sweep(&mut self, session_id: &SessionId, player: PlayerId, center: Coordinate) -> Result<Dispatch> {
        let entry = lookup_mut(&mut self.registry, session_id)?;
        let slot = admit_sweep(&entry.state, player)?;
        let result = self.engine.resolve_sweep(&mut entry.state, slot, center)?;
        Ok(Dispatch::reply(Reply::PingSweepResult { result }))
    }

    // === Rematch ===

    fn request_rematch(&mut self, session_id: &SessionId, player: PlayerId) -> Result<Dispatch> {
        let outcome = self.registry.request_rematch(session_id, player)?;
        let entry = self.entry(session_id)?;

        let accepted = outcome == RematchOutcome::Accepted;
        let mut dispatch = Dispatch::reply(Reply::RematchRequested { accepted });

        if accepted {
            to_players(&mut dispatch.deliveries, entry, &Outbound::RematchAccepted);
            to_players(
                &mut dispatch.deliveries,
                entry,
                &Outbound::PhaseChanged {
                    phase: entry.state.phase,
                },
            );
            observer_state(&mut dispatch.deliveries, entry);
        } else if let Some(opponent) = opponent_of(entry, player) {
            dispatch.push(Recipient::Player(opponent), Outbound::OpponentWantsRematch);
        }

        Ok(dispatch)
    }

    // === Lookup ===

    /// Resolve a sender to a seated player and their session.
    fn seated(&self, from: Option<Identity>) -> Result<(PlayerId, SessionId)> {
        let Some(Identity::Player(player)) = from else {
            return Err(SessionError::UnknownPlayer);
        };
        let session_id = self
            .registry
            .session_of_player(player)
            .ok_or(SessionError::UnknownPlayer)?;
        Ok((player, session_id))
    }

    fn entry(&self, session_id: &SessionId) -> Result<&SessionEntry> {
        self.registry
            .get(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))
    }
}

// === Fan-out helpers ===

fn opponent_of(entry: &SessionEntry, player: PlayerId) -> Option<PlayerId> {
    let slot = entry.state.slot_of(player)?;
    entry.state.player(slot.other()).map(|p| p.id)
}

fn to_players(out: &mut Vec<Delivery>, entry: &SessionEntry, message: &Outbound) {
    for (_, seat) in entry.state.players.iter() {
        if let Some(seat) = seat {
            out.push(Delivery {
                recipient: Recipient::Player(seat.id),
                message: message.clone(),
            });
        }
    }
}

fn to_observers(out: &mut Vec<Delivery>, entry: &SessionEntry, message: &Outbound) {
    for observer in &entry.observers {
        out.push(Delivery {
            recipient: Recipient::Observer(observer.id),
            message: message.clone(),
        });
    }
}

fn observer_state(out: &mut Vec<Delivery>, entry: &SessionEntry) {
    if entry.observers.is_empty() {
        return;
    }
    let state = ObserverView::snapshot(&entry.state);
    to_observers(out, entry, &Outbound::ObserverState { state });
}

fn lookup_mut<'a>(registry: &'a mut SessionRegistry, session_id: &SessionId) -> Result<&'a mut SessionEntry> {
    registry
        .get_mut(session_id)
        .ok_or_else(|| SessionError::NotFound(session_id.clone()))
}
