//! Grid coordinates and placement orientation.
//!
//! ## Coordinate
//!
//! A `(row, col)` pair on the 10x10 board. Coordinates arrive from clients,
//! so out-of-range values are representable; every consumer checks
//! `in_bounds()` before indexing a grid.
//!
//! ## Orientation
//!
//! Horizontal runs increment the column, vertical runs increment the row.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Width and height of every player's grid.
pub const GRID_SIZE: usize = 10;

/// A cell position on a player's grid.
///
/// ```
/// use battlechip::core::Coordinate;
///
/// let c = Coordinate::new(3, 9);
/// assert!(c.in_bounds());
/// assert!(!Coordinate::new(3, 10).in_bounds());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: u8,
    pub col: u8,
}

impl Coordinate {
    /// Create a coordinate. No bounds check is performed.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check whether the coordinate lies on the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        (self.row as usize) < GRID_SIZE && (self.col as usize) < GRID_SIZE
    }

    /// Offset by a signed delta, returning `None` if the result leaves the grid.
    #[must_use]
    pub fn offset(self, d_row: i16, d_col: i16) -> Option<Self> {
        let row = i16::from(self.row) + d_row;
        let col = i16::from(self.col) + d_col;
        let limit = GRID_SIZE as i16;

        if (0..limit).contains(&row) && (0..limit).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// The up-to-8 in-bounds coordinates surrounding this one.
    ///
    /// The center itself is not included. Order is row-major.
    #[must_use]
    pub fn neighbors(self) -> SmallVec<[Coordinate; 8]> {
        let mut out = SmallVec::new();
        for d_row in -1..=1 {
            for d_col in -1..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }
                if let Some(c) = self.offset(d_row, d_col) {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Direction a resource extends from its start coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Increments the column.
    Horizontal,
    /// Increments the row.
    Vertical,
}

impl Orientation {
    /// Compute the `len`-long run starting at `start`.
    ///
    /// Returns `None` if any coordinate of the run leaves the grid.
    #[must_use]
    pub fn run(self, start: Coordinate, len: usize) -> Option<SmallVec<[Coordinate; 5]>> {
        if !start.in_bounds() {
            return None;
        }

        (0..len as i16)
            .map(|i| match self {
                Orientation::Horizontal => start.offset(0, i),
                Orientation::Vertical => start.offset(i, 0),
            })
            .collect()
    }
}
