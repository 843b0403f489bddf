//! Resource kinds - static resource data.
//!
//! Six kinds exist. Each has a fixed size (cells) and a base point value
//! awarded to whoever destroys it. The table is a `static` and is shared
//! read-only by every session.

use serde::{Deserialize, Serialize};

/// One of the six resource categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Database,
    Backup,
    Server,
    Firewall,
    IotCluster,
    Router,
}

/// Static data for a resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    /// Display name.
    pub name: &'static str,
    /// Number of cells occupied.
    pub size: usize,
    /// Destroy bonus before multipliers.
    pub base_points: u32,
    pub description: &'static str,
}

/// The resource table, in descending value order.
pub static RESOURCE_TABLE: [ResourceSpec; 6] = [
    ResourceSpec {
        kind: ResourceKind::Database,
        name: "Database",
        size: 5,
        base_points: 500,
        description: "The crown jewel. Contains all the critical data.",
    },
    ResourceSpec {
        kind: ResourceKind::Backup,
        name: "Backup",
        size: 4,
        base_points: 300,
        description: "Offline data storage. A high-value secondary target.",
    },
    ResourceSpec {
        kind: ResourceKind::Server,
        name: "Server",
        size: 4,
        base_points: 250,
        description: "The main application server. Holds the logic.",
    },
    ResourceSpec {
        kind: ResourceKind::Firewall,
        name: "Firewall",
        size: 3,
        base_points: 150,
        description: "The network's main defense.",
    },
    ResourceSpec {
        kind: ResourceKind::IotCluster,
        name: "IoT Cluster",
        size: 3,
        base_points: 100,
        description: "A group of \"smart\" devices, often a weak point.",
    },
    ResourceSpec {
        kind: ResourceKind::Router,
        name: "Router",
        size: 2,
        base_points: 50,
        description: "Directs traffic. Small but essential.",
    },
];

impl ResourceKind {
    /// Every kind, in table order.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Database,
        ResourceKind::Backup,
        ResourceKind::Server,
        ResourceKind::Firewall,
        ResourceKind::IotCluster,
        ResourceKind::Router,
    ];

    /// Number of kinds a complete layout must contain.
    pub const COUNT: usize = Self::ALL.len();

    /// The kind boosted by admin access and the chain bonus.
    pub const HIGHEST_VALUE: ResourceKind = ResourceKind::Database;

    /// Static data for this kind.
    #[must_use]
    pub fn spec(self) -> &'static ResourceSpec {
        &RESOURCE_TABLE[self as usize]
    }

    /// Number of cells this kind occupies.
    #[must_use]
    pub fn size(self) -> usize {
        self.spec().size
    }

    /// Destroy bonus before multipliers.
    #[must_use]
    pub fn base_points(self) -> u32 {
        self.spec().base_points
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_kinds() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_sizes_and_points() {
        assert_eq!(ResourceKind::Database.size(), 5);
        assert_eq!(ResourceKind::Database.base_points(), 500);
        assert_eq!(ResourceKind::Server.size(), 4);
        assert_eq!(ResourceKind::Server.base_points(), 250);
        assert_eq!(ResourceKind::Router.size(), 2);
        assert_eq!(ResourceKind::Router.base_points(), 50);

        for kind in ResourceKind::ALL {
            assert!((2..=5).contains(&kind.size()));
            assert!((50..=500).contains(&kind.base_points()));
        }
    }

    #[test]
    fn test_highest_value_is_database() {
        let top = ResourceKind::ALL
            .iter()
            .max_by_key(|k| k.base_points())
            .copied();
        assert_eq!(top, Some(ResourceKind::HIGHEST_VALUE));
    }

    #[test]
    fn test_total_cells() {
        let total: usize = ResourceKind::ALL.iter().map(|k| k.size()).sum();
        assert_eq!(total, 21);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ResourceKind::IotCluster).unwrap(), "\"iot-cluster\"");
        let kind: ResourceKind = serde_json::from_str("\"database\"").unwrap();
        assert_eq!(kind, ResourceKind::Database);
    }
}
