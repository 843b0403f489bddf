//! Session and participant identifiers.
//!
//! `PlayerId` and `ObserverId` are opaque UUIDs handed to clients when they
//! join. `SessionId` is the short code players share to pair up; it is
//! case-normalized so `ab12cd` and `AB12CD` name the same session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a read-only spectator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObserverId(pub Uuid);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short alphanumeric session code.
///
/// Always stored upper-case. Deserialization normalizes as well, so codes
/// typed by users in lower case resolve to the same session.
///
/// ```
/// use battlechip::core::SessionId;
///
/// assert_eq!(SessionId::new("x9k2ab"), SessionId::new("X9K2AB"));
/// assert_eq!(SessionId::new("x9k2ab").as_str(), "X9K2AB");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Create a session id, normalizing case and surrounding whitespace.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Get the normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for SessionId {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_normalizes() {
        let id = SessionId::new("  q7zz1a ");
        assert_eq!(id.as_str(), "Q7ZZ1A");
        assert_eq!(id.to_string(), "Q7ZZ1A");
    }

    #[test]
    fn test_session_id_deserialize_normalizes() {
        let id: SessionId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(id, SessionId::new("ABC123"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ABC123\"");
    }

    #[test]
    fn test_player_id_is_transparent() {
        let id = PlayerId(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
