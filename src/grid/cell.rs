//! Grid cells.

use serde::{Deserialize, Serialize};

use crate::resources::ResourceKind;

/// Targeting status of a cell.
///
/// Only ever moves forward: `Empty -> Miss`, `Empty -> Hit -> Destroyed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    #[default]
    Empty,
    Miss,
    Hit,
    Destroyed,
}

impl CellStatus {
    /// Check whether moving to `next` respects forward-only progression.
    #[must_use]
    pub fn can_advance_to(self, next: CellStatus) -> bool {
        matches!(
            (self, next),
            (CellStatus::Empty, CellStatus::Miss)
                | (CellStatus::Empty, CellStatus::Hit)
                | (CellStatus::Hit, CellStatus::Destroyed)
        )
    }

    /// Has this cell already been attacked?
    #[must_use]
    pub fn is_targeted(self) -> bool {
        self != CellStatus::Empty
    }
}

/// One square of a player's grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub status: CellStatus,

    /// Kind of the resource covering this cell, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceKind>,

    /// Index into the owning grid's resource list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) resource_index: Option<u8>,
}

impl Cell {
    /// An untargeted, unoccupied cell.
    pub const EMPTY: Cell = Cell {
        status: CellStatus::Empty,
        resource: None,
        resource_index: None,
    };

    /// Check whether a resource covers this cell.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.resource.is_some()
    }

    /// Status as seen by a reconnaissance sweep.
    ///
    /// Untargeted occupied cells read as `Hit`; everything else reads as its
    /// real status. Reading never changes the cell.
    #[must_use]
    pub fn revealed_status(&self) -> CellStatus {
        match self.status {
            CellStatus::Empty if self.is_occupied() => CellStatus::Hit,
            status => status,
        }
    }
}
