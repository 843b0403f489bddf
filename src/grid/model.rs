//! Grid model: resource placement and cell state for one player's board.
//!
//! The `Grid` owns a 10x10 matrix of cells and the list of resources placed
//! on it. It supports:
//! - Placement with bounds and overlap checks (no mutation on failure)
//! - Completeness and destruction queries
//! - Cell and resource lookup by coordinate
//!
//! Targeting mutations (`mark`, `resource_mut`) are crate-internal; only the
//! battle engine drives them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::cell::{Cell, CellStatus};
use crate::core::{Coordinate, Orientation, GRID_SIZE};
use crate::resources::{PlacedResource, ResourceKind};

/// Why a placement was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("{kind} at {start} ({orientation:?}) leaves the grid")]
    OutOfBounds {
        kind: ResourceKind,
        start: Coordinate,
        orientation: Orientation,
    },

    #[error("{kind} overlaps {occupant} at {at}")]
    Overlap {
        kind: ResourceKind,
        at: Coordinate,
        occupant: ResourceKind,
    },
}

/// One requested resource placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(alias = "type")]
    pub kind: ResourceKind,
    pub start: Coordinate,
    pub orientation: Orientation,
}

impl Placement {
    /// Create a placement request.
    #[must_use]
    pub const fn new(kind: ResourceKind, start: Coordinate, orientation: Orientation) -> Self {
        Self {
            kind,
            start,
            orientation,
        }
    }
}

/// A player's board.
///
/// ## Usage
///
/// ```
/// use battlechip::core::{Coordinate, Orientation};
/// use battlechip::grid::Grid;
/// use battlechip::resources::ResourceKind;
///
/// let mut grid = Grid::new();
/// grid.place(ResourceKind::Router, Coordinate::new(0, 0), Orientation::Horizontal).unwrap();
///
/// // Overlapping placements are rejected
/// assert!(grid.place(ResourceKind::Firewall, Coordinate::new(0, 1), Orientation::Vertical).is_err());
/// assert_eq!(grid.resources().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    resources: Vec<PlacedResource>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid: every cell untargeted, no resources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[Cell::EMPTY; GRID_SIZE]; GRID_SIZE],
            resources: Vec::new(),
        }
    }

    /// Build a fresh grid from a list of placements.
    ///
    /// Placements are applied in order. Failed items are skipped and
    /// returned alongside the grid.
    #[must_use]
    pub fn from_layout(placements: &[Placement]) -> (Self, Vec<(Placement, PlacementError)>) {
        let mut grid = Self::new();
        let mut failures = Vec::new();

        for &placement in placements {
            if let Err(err) = grid.place(placement.kind, placement.start, placement.orientation) {
                failures.push((placement, err));
            }
        }

        (grid, failures)
    }

    // === Placement ===

    /// Compute the run `kind` would occupy, checking bounds and overlap.
    pub fn can_place(
        &self,
        kind: ResourceKind,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<SmallVec<[Coordinate; 5]>, PlacementError> {
        let run = orientation
            .run(start, kind.size())
            .ok_or(PlacementError::OutOfBounds {
                kind,
                start,
                orientation,
            })?;

        for &coord in &run {
            if let Some(occupant) = self.cells[coord.row as usize][coord.col as usize].resource {
                return Err(PlacementError::Overlap {
                    kind,
                    at: coord,
                    occupant,
                });
            }
        }

        Ok(run)
    }

    /// Place a resource of `kind` starting at `start`.
    ///
    /// On failure the grid is left untouched.
    pub fn place(
        &mut self,
        kind: ResourceKind,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let run = self.can_place(kind, start, orientation)?;
        let index = self.resources.len() as u8;

        for &coord in &run {
            let cell = &mut self.cells[coord.row as usize][coord.col as usize];
            cell.resource = Some(kind);
            cell.resource_index = Some(index);
        }
        self.resources.push(PlacedResource::new(kind, run));

        Ok(())
    }

    /// Check that exactly one resource of every kind is on the grid.
    #[must_use]
    pub fn all_placed(&self) -> bool {
        self.resources.len() == ResourceKind::COUNT
            && ResourceKind::ALL
                .iter()
                .all(|&kind| self.resources.iter().filter(|r| r.kind == kind).count() == 1)
    }

    /// Check that every placed resource is destroyed.
    #[must_use]
    pub fn all_destroyed(&self) -> bool {
        self.resources.iter().all(|r| r.destroyed)
    }

    /// The up-to-8 in-bounds neighbors of `coord`.
    #[must_use]
    pub fn neighbors(coord: Coordinate) -> SmallVec<[Coordinate; 8]> {
        coord.neighbors()
    }

    // === Lookup ===

    /// Get the cell at `coord`, or `None` if off the grid.
    #[must_use]
    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        if coord.in_bounds() {
            Some(&self.cells[coord.row as usize][coord.col as usize])
        } else {
            None
        }
    }

    /// All resources placed on this grid, in placement order.
    #[must_use]
    pub fn resources(&self) -> &[PlacedResource] {
        &self.resources
    }

    /// Number of resources placed.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.resources.len()
    }

    /// Index of the resource covering `coord`.
    #[must_use]
    pub fn resource_index_at(&self, coord: Coordinate) -> Option<usize> {
        self.cell(coord)?.resource_index.map(usize::from)
    }

    /// The resource covering `coord`.
    #[must_use]
    pub fn resource_at(&self, coord: Coordinate) -> Option<&PlacedResource> {
        self.resources.get(self.resource_index_at(coord)?)
    }

    // === Targeting (engine only) ===

    /// Advance the status of the cell at `coord`.
    ///
    /// Backward transitions are ignored and reported as `false`.
    pub(crate) fn mark(&mut self, coord: Coordinate, status: CellStatus) -> bool {
        if !coord.in_bounds() {
            return false;
        }
        let cell = &mut self.cells[coord.row as usize][coord.col as usize];
        if !cell.status.can_advance_to(status) {
            return false;
        }
        cell.status = status;
        true
    }

    /// Mutable access to a placed resource.
    pub(crate) fn resource_mut(&mut self, index: usize) -> Option<&mut PlacedResource> {
        self.resources.get_mut(index)
    }
}
