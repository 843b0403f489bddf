//! Sessions: per-match state and the registry that owns it.
//!
//! ## Key Types
//!
//! - `SessionState`: phase, both player slots, turn and winner
//! - `PlayerSlot`: one combatant's grid, score and ability flags
//! - `SessionRegistry`: every live session, keyed by code

pub mod registry;
pub mod state;

pub use registry::{ReadyOutcome, RematchOutcome, SessionEntry, SessionRegistry};
pub use state::{AbilityFlags, Phase, PlayerSlot, SessionState};
