//! Resource system: the static kind table and placed resource instances.
//!
//! ## Key Types
//!
//! - `ResourceKind`: One of the six resource categories
//! - `ResourceSpec`: Static size, points and name for a kind
//! - `PlacedResource`: Runtime state of a resource on a grid (hits, destroyed)

pub mod kind;
pub mod placed;

pub use kind::{ResourceKind, ResourceSpec, RESOURCE_TABLE};
pub use placed::PlacedResource;
