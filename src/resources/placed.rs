//! Placed resources - runtime resource state on a grid.
//!
//! A `PlacedResource` remembers which of its cells have been struck. It is
//! destroyed once every occupied coordinate has been hit.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::ResourceKind;
use crate::core::Coordinate;

/// A resource instance on one player's grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedResource {
    pub kind: ResourceKind,

    /// Occupied coordinates in placement order. Length equals `kind.size()`.
    pub coordinates: SmallVec<[Coordinate; 5]>,

    /// Coordinates already struck. Always a subset of `coordinates`.
    pub hits: FxHashSet<Coordinate>,

    /// Set once `hits` covers every coordinate.
    pub destroyed: bool,
}

impl PlacedResource {
    /// Create an undamaged resource over the given run.
    #[must_use]
    pub fn new(kind: ResourceKind, coordinates: SmallVec<[Coordinate; 5]>) -> Self {
        debug_assert_eq!(coordinates.len(), kind.size());
        Self {
            kind,
            coordinates,
            hits: FxHashSet::default(),
            destroyed: false,
        }
    }

    /// Check whether this resource covers `coord`.
    #[must_use]
    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.coordinates.contains(&coord)
    }

    /// Record a strike on `coord`.
    ///
    /// Returns `true` if this strike destroyed the resource. Strikes on
    /// coordinates outside the resource, and repeated strikes, are ignored.
    pub fn register_hit(&mut self, coord: Coordinate) -> bool {
        if self.destroyed || !self.occupies(coord) {
            return false;
        }

        self.hits.insert(coord);
        if self.hits.len() == self.coordinates.len() {
            self.destroyed = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Orientation;

    fn router_at_origin() -> PlacedResource {
        let run = Orientation::Horizontal
            .run(Coordinate::new(0, 0), ResourceKind::Router.size())
            .unwrap();
        PlacedResource::new(ResourceKind::Router, run)
    }

    #[test]
    fn test_new_resource() {
        let r = router_at_origin();
        assert!(!r.destroyed);
        assert!(r.hits.is_empty());
        assert_eq!(r.coordinates.len(), 2);
        assert!(r.occupies(Coordinate::new(0, 1)));
        assert!(!r.occupies(Coordinate::new(1, 0)));
    }

    #[test]
    fn test_register_hits_until_destroyed() {
        let mut r = router_at_origin();

        assert!(!r.register_hit(Coordinate::new(0, 0)));
        assert_eq!(r.hits.len(), 1);
        assert!(!r.destroyed);

        assert!(r.register_hit(Coordinate::new(0, 1)));
        assert!(r.destroyed);
        assert_eq!(r.hits.len(), 2);
    }

    #[test]
    fn test_repeated_and_foreign_hits_ignored() {
        let mut r = router_at_origin();

        r.register_hit(Coordinate::new(0, 0));
        assert!(!r.register_hit(Coordinate::new(0, 0)));
        assert!(!r.register_hit(Coordinate::new(5, 5)));
        assert_eq!(r.hits.len(), 1);

        r.register_hit(Coordinate::new(0, 1));
        // Destruction is reported exactly once
        assert!(!r.register_hit(Coordinate::new(0, 1)));
    }
}
