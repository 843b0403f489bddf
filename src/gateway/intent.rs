//! Inbound client intents.

use serde::{Deserialize, Serialize};

use crate::core::{Coordinate, ObserverId, PlayerId, SessionId};
use crate::grid::Placement;

/// Who sent an intent, as bound by the transport after create/join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "lowercase")]
pub enum Identity {
    Player(PlayerId),
    Observer(ObserverId),
}

/// A client request.
///
/// Session-scoped intents carry no session code; the gateway finds the
/// session from the sender's identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Intent {
    #[serde(rename_all = "camelCase")]
    CreateSession { player_name: String },

    #[serde(rename_all = "camelCase")]
    JoinSession { session_id: SessionId, player_name: String },

    #[serde(rename_all = "camelCase")]
    JoinAsObserver { session_id: SessionId, observer_name: String },

    PlaceResources { placements: Vec<Placement> },

    DeclareReady,

    Attack { coordinate: Coordinate },

    UsePingSweep { coordinate: Coordinate },

    RequestRematch,
}

impl Intent {
    /// Parse an intent from its JSON wire form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Wire name of this intent, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::CreateSession { .. } => "create-session",
            Intent::JoinSession { .. } => "join-session",
            Intent::JoinAsObserver { .. } => "join-as-observer",
            Intent::PlaceResources { .. } => "place-resources",
            Intent::DeclareReady => "declare-ready",
            Intent::Attack { .. } => "attack",
            Intent::UsePingSweep { .. } => "use-ping-sweep",
            Intent::RequestRematch => "request-rematch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Orientation;
    use crate::resources::ResourceKind;

    #[test]
    fn test_parse_attack() {
        let intent = Intent::from_json(r#"{"type":"attack","coordinate":{"row":3,"col":7}}"#).unwrap();
        assert_eq!(intent, Intent::Attack { coordinate: Coordinate::new(3, 7) });
        assert_eq!(intent.name(), "attack");
    }

    #[test]
    fn test_parse_join() {
        let intent = Intent::from_json(r#"{"type":"join-session","sessionId":"ab12cd","playerName":"bob"}"#).unwrap();
        assert_eq!(
            intent,
            Intent::JoinSession {
                session_id: SessionId::new("AB12CD"),
                player_name: "bob".into()
            }
        );
    }

    #[test]
    fn test_parse_placements() {
        let json = r#"{"type":"place-resources","placements":[
            {"type":"database","start":{"row":0,"col":0},"orientation":"horizontal"},
            {"kind":"iot-cluster","start":{"row":2,"col":4},"orientation":"vertical"}
        ]}"#;
        let Intent::PlaceResources { placements } = Intent::from_json(json).unwrap() else {
            panic!("expected place-resources");
        };
        assert_eq!(placements[0].kind, ResourceKind::Database);
        assert_eq!(placements[1].kind, ResourceKind::IotCluster);
        assert_eq!(placements[1].orientation, Orientation::Vertical);
    }

    #[test]
    fn test_parse_unit_intent() {
        assert_eq!(Intent::from_json(r#"{"type":"declare-ready"}"#).unwrap(), Intent::DeclareReady);
        assert!(Intent::from_json(r#"{"type":"fire-missiles"}"#).is_err());
    }
}
