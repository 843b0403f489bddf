//! Read-only observer projections.
//!
//! Observers see both grids in full, scores and whose turn it is. They
//! never act on a session.

pub mod view;

pub use view::{Observer, ObserverAttackUpdate, ObserverSnapshot, ObserverView, PlayerView};
