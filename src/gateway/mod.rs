//! Messaging gateway, minus the transport.
//!
//! ## Flow
//!
//! 1. The transport decodes a client frame into an `Intent`
//! 2. `Gateway::handle` runs admission, the registry and the engine
//! 3. The returned `Dispatch` holds the originator's `Reply` and the
//!    ordered `Delivery` list; the transport maps each `Recipient` to a
//!    connection and sends `Envelope::to_json`
//!
//! Dropped connections go through `Gateway::disconnect`.

pub mod broadcast;
pub mod dispatcher;
pub mod intent;

pub use broadcast::{Delivery, Dispatch, Envelope, Outbound, PlacementFailure, Recipient, Reply};
pub use dispatcher::Gateway;
pub use intent::{Identity, Intent};
