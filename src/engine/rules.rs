//! Ability and scoring rules.
//!
//! Two tables drive every score change and ability grant:
//! - `ScoringRules`: flat hit points and the two multipliers
//! - `ResourceKind::on_destroyed`: which ability a destruction grants, and to whom

use serde::{Deserialize, Serialize};

use crate::core::Slot;
use crate::resources::ResourceKind;

/// Points for any hit before multipliers.
pub const HIT_POINTS: u32 = 10;

/// Hit multiplier on the highest-value kind while admin access is active.
pub const ADMIN_ACCESS_MULTIPLIER: u32 = 2;

/// Destroy-bonus multiplier on the highest-value kind once the server is gone.
pub const DATABASE_CHAIN_BONUS_MULTIPLIER: u32 = 2;

/// Per-player abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ability {
    /// Single-use reconnaissance of the 8 cells around a target.
    PingSweep,
    /// Persistent buff: doubled hit points on database cells.
    AdminAccess,
    /// Set on a player whose IoT cluster was destroyed. No consumer in
    /// the engine; surfaced to collaborators as an event.
    DdosEffect,
}

/// Who receives an ability granted by a destruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Beneficiary {
    Attacker,
    Defender,
}

/// Side effect of destroying a resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DestroyEffect {
    pub ability: Ability,
    pub beneficiary: Beneficiary,
}

/// A granted ability, resolved to a concrete slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityGrant {
    pub ability: Ability,
    pub recipient: Slot,
}

impl ResourceKind {
    /// The ability granted when a resource of this kind is destroyed.
    #[must_use]
    pub fn on_destroyed(self) -> Option<DestroyEffect> {
        let (ability, beneficiary) = match self {
            ResourceKind::Firewall => (Ability::PingSweep, Beneficiary::Attacker),
            ResourceKind::Server => (Ability::AdminAccess, Beneficiary::Attacker),
            ResourceKind::IotCluster => (Ability::DdosEffect, Beneficiary::Defender),
            ResourceKind::Database | ResourceKind::Backup | ResourceKind::Router => return None,
        };
        Some(DestroyEffect { ability, beneficiary })
    }
}

impl DestroyEffect {
    /// Resolve the beneficiary to a slot.
    #[must_use]
    pub fn resolve(self, attacker: Slot) -> AbilityGrant {
        let recipient = match self.beneficiary {
            Beneficiary::Attacker => attacker,
            Beneficiary::Defender => attacker.other(),
        };
        AbilityGrant {
            ability: self.ability,
            recipient,
        }
    }
}

/// Point values and multipliers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub hit_points: u32,
    pub admin_access_multiplier: u32,
    pub chain_bonus_multiplier: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            hit_points: HIT_POINTS,
            admin_access_multiplier: ADMIN_ACCESS_MULTIPLIER,
            chain_bonus_multiplier: DATABASE_CHAIN_BONUS_MULTIPLIER,
        }
    }
}

impl ScoringRules {
    /// Points for striking a cell of `kind`.
    #[must_use]
    pub fn hit_points(&self, kind: ResourceKind, admin_access: bool) -> u32 {
        if admin_access && kind == ResourceKind::HIGHEST_VALUE {
            self.hit_points * self.admin_access_multiplier
        } else {
            self.hit_points
        }
    }

    /// Bonus for destroying a resource of `kind`.
    ///
    /// `server_down` is whether the defender's server was destroyed before
    /// this resource. Order matters: server first, then database.
    #[must_use]
    pub fn destroy_bonus(&self, kind: ResourceKind, server_down: bool) -> u32 {
        let base = kind.base_points();
        if server_down && kind == ResourceKind::HIGHEST_VALUE {
            base * self.chain_bonus_multiplier
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_points() {
        let rules = ScoringRules::default();
        assert_eq!(rules.hit_points(ResourceKind::Router, false), 10);
        assert_eq!(rules.hit_points(ResourceKind::Router, true), 10);
        assert_eq!(rules.hit_points(ResourceKind::Database, false), 10);
        assert_eq!(rules.hit_points(ResourceKind::Database, true), 20);
    }

    #[test]
    fn test_destroy_bonus() {
        let rules = ScoringRules::default();
        assert_eq!(rules.destroy_bonus(ResourceKind::Router, false), 50);
        assert_eq!(rules.destroy_bonus(ResourceKind::Router, true), 50);
        assert_eq!(rules.destroy_bonus(ResourceKind::Database, false), 500);
        assert_eq!(rules.destroy_bonus(ResourceKind::Database, true), 1000);
    }

    #[test]
    fn test_destroy_effects() {
        let fw = ResourceKind::Firewall.on_destroyed().unwrap();
        assert_eq!(
            fw.resolve(Slot::FIRST),
            AbilityGrant { ability: Ability::PingSweep, recipient: Slot::FIRST }
        );

        let srv = ResourceKind::Server.on_destroyed().unwrap();
        assert_eq!(srv.resolve(Slot::SECOND).recipient, Slot::SECOND);
        assert_eq!(srv.ability, Ability::AdminAccess);

        let iot = ResourceKind::IotCluster.on_destroyed().unwrap();
        assert_eq!(
            iot.resolve(Slot::FIRST),
            AbilityGrant { ability: Ability::DdosEffect, recipient: Slot::SECOND }
        );

        assert!(ResourceKind::Database.on_destroyed().is_none());
        assert!(ResourceKind::Backup.on_destroyed().is_none());
        assert!(ResourceKind::Router.on_destroyed().is_none());
    }

    #[test]
    fn test_custom_rules() {
        let rules = ScoringRules {
            hit_points: 5,
            admin_access_multiplier: 3,
            chain_bonus_multiplier: 4,
        };
        assert_eq!(rules.hit_points(ResourceKind::Database, true), 15);
        assert_eq!(rules.destroy_bonus(ResourceKind::Database, true), 2000);
    }
}
