//! Outbound messages: direct replies and fan-out events.
//!
//! ## Reply vs Outbound
//!
//! A `Reply` answers the actor that sent the intent. An `Outbound` is an
//! event fanned out to other participants, addressed by a `Recipient`.
//! Both are serde-tagged with a kebab-case `type` field so a transport can
//! encode them directly.

use serde::{Deserialize, Serialize};

use crate::core::{Coordinate, ObserverId, PlayerId, SessionId, Slot, SlotPair};
use crate::engine::{AbilityGrant, AttackResult, SweepResult};
use crate::error::SessionError;
use crate::grid::{Placement, PlacementError};
use crate::observer::{ObserverAttackUpdate, ObserverSnapshot};
use crate::session::Phase;

/// A placement that was skipped, with the reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementFailure {
    pub placement: Placement,
    pub reason: String,
}

impl From<(Placement, PlacementError)> for PlacementFailure {
    fn from((placement, err): (Placement, PlacementError)) -> Self {
        Self {
            placement,
            reason: err.to_string(),
        }
    }
}

/// Direct answer to the originator of an intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Reply {
    #[serde(rename_all = "camelCase")]
    SessionCreated {
        session_id: SessionId,
        player_id: PlayerId,
        slot: Slot,
    },

    #[serde(rename_all = "camelCase")]
    SessionJoined {
        session_id: SessionId,
        player_id: PlayerId,
        slot: Slot,
        opponent_name: String,
    },

    #[serde(rename_all = "camelCase")]
    ObserverJoined {
        session_id: SessionId,
        observer_id: ObserverId,
        state: ObserverSnapshot,
    },

    ResourcesPlaced {
        placed: usize,
        failures: Vec<PlacementFailure>,
    },

    #[serde(rename_all = "camelCase")]
    ReadyConfirmed { battle_started: bool },

    AttackResult { result: AttackResult },

    PingSweepResult { result: SweepResult },

    RematchRequested { accepted: bool },

    Error { code: String, message: String },
}

impl From<&SessionError> for Reply {
    fn from(err: &SessionError) -> Self {
        Reply::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for Reply {
    fn from(err: SessionError) -> Self {
        Reply::from(&err)
    }
}

/// An event fanned out to session participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outbound {
    #[serde(rename_all = "camelCase")]
    OpponentJoined { opponent_name: String },

    PhaseChanged { phase: Phase },

    OpponentReady,

    #[serde(rename_all = "camelCase")]
    BattleStarted { current_turn: Slot },

    YourTurn,

    #[serde(rename_all = "camelCase")]
    OpponentAttacked { coordinate: Coordinate, was_hit: bool },

    AbilityGranted { grant: AbilityGrant },

    #[serde(rename_all = "camelCase")]
    GameOver {
        winner: Slot,
        winner_name: String,
        final_scores: SlotPair<u32>,
    },

    OpponentWantsRematch,

    RematchAccepted,

    #[serde(rename_all = "camelCase")]
    PlayerDisconnected { player_id: PlayerId },

    ObserverState { state: ObserverSnapshot },

    ObserverAttackUpdate { update: ObserverAttackUpdate },
}

/// Addressee of an outbound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "lowercase")]
pub enum Recipient {
    Player(PlayerId),
    Observer(ObserverId),
}

/// One event bound for one recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub recipient: Recipient,
    pub message: Outbound,
}

/// Wire wrapper for anything the gateway sends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Reply(Reply),
    Event(Outbound),
}

impl Envelope {
    /// Encode as a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Reply> for Envelope {
    fn from(reply: Reply) -> Self {
        Envelope::Reply(reply)
    }
}

impl From<Outbound> for Envelope {
    fn from(event: Outbound) -> Self {
        Envelope::Event(event)
    }
}

/// Everything produced by handling one intent.
///
/// `deliveries` is in emission order: a transport must send them in
/// sequence, after `reply`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub reply: Reply,
    pub deliveries: Vec<Delivery>,
}

impl Dispatch {
    /// A dispatch with no fan-out.
    #[must_use]
    pub fn reply(reply: Reply) -> Self {
        Self {
            reply,
            deliveries: Vec::new(),
        }
    }

    /// Queue `message` for `recipient`.
    pub fn push(&mut self, recipient: Recipient, message: Outbound) {
        self.deliveries.push(Delivery { recipient, message });
    }

    /// Events addressed to `recipient`, in order.
    pub fn messages_for(&self, recipient: Recipient) -> impl Iterator<Item = &Outbound> {
        self.deliveries
            .iter()
            .filter(move |d| d.recipient == recipient)
            .map(|d| &d.message)
    }
}

impl From<SessionError> for Dispatch {
    fn from(err: SessionError) -> Self {
        Dispatch::reply(err.into())
    }
}
