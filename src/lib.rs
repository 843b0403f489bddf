//! # battlechip
//!
//! Authoritative server-side engine for a two-player grid-combat game.
//!
//! Each player secretly places six resources on a 10x10 grid, then players
//! alternate attacks on the opponent's grid until one side is wiped out.
//! Destroying certain resources grants abilities; the database scores
//! double after the server falls.
//!
//! ## Design Principles
//!
//! 1. **One owner per session**: a `SessionState` lives in exactly one
//!    registry entry and is only mutated through the registry or engine.
//!
//! 2. **Refusals never mutate**: every admission failure leaves the
//!    session exactly as it was.
//!
//! 3. **Transport stays outside**: the gateway turns intents into replies
//!    and addressed events; sockets and rooms belong to the caller.
//!
//! ## Modules
//!
//! - `core`: Coordinates, slots, identities, RNG, configuration
//! - `resources`: Static resource table and placed resources
//! - `grid`: Per-player board and placement
//! - `session`: Session state and the registry
//! - `engine`: Attack, sweep and turn resolution plus scoring rules
//! - `observer`: Read-only projections for spectators
//! - `gateway`: Intent dispatch and outbound messages
//! - `error`: Admission errors

pub mod core;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod grid;
pub mod observer;
pub mod resources;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Coordinate, Orientation, GRID_SIZE,
    Slot, SlotPair,
    PlayerId, ObserverId, SessionId,
    SessionRng,
    EngineConfig, ConfigError,
};

pub use crate::resources::{ResourceKind, ResourceSpec, PlacedResource};

pub use crate::grid::{Cell, CellStatus, Grid, Placement, PlacementError};

pub use crate::session::{
    Phase, AbilityFlags, PlayerSlot, SessionState,
    SessionRegistry, SessionEntry, ReadyOutcome, RematchOutcome,
};

pub use crate::engine::{
    BattleEngine, ScoringRules, Ability, AbilityGrant,
    AttackResult, AttackOutcome, SweepResult, SweepReading,
};

pub use crate::observer::{Observer, ObserverView, ObserverSnapshot, ObserverAttackUpdate};

pub use crate::gateway::{Gateway, Intent, Identity, Dispatch, Delivery, Envelope, Outbound, Recipient, Reply};

pub use crate::error::{Result, SessionError};
