//! Core types: coordinates, slots, identities, RNG, configuration.
//!
//! These are the building blocks every other module shares. None of them
//! know about grids, sessions, or scoring.

pub mod coord;
pub mod player;
pub mod ids;
pub mod rng;
pub mod config;

pub use coord::{Coordinate, Orientation, GRID_SIZE};
pub use player::{Slot, SlotPair, SLOT_COUNT};
pub use ids::{ObserverId, PlayerId, SessionId};
pub use rng::SessionRng;
pub use config::{ConfigError, EngineConfig, DEFAULT_SESSION_CODE_LENGTH};
