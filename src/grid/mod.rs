//! Grid model for one player's board.
//!
//! ## Key Types
//!
//! - `Grid`: 10x10 cells plus placed resources
//! - `Cell` / `CellStatus`: per-square targeting state
//! - `Placement`: a requested (kind, start, orientation) triple
//! - `PlacementError`: why a placement was rejected

pub mod cell;
pub mod model;

pub use cell::{Cell, CellStatus};
pub use model::{Grid, Placement, PlacementError};
