//! Panel lifecycle state machine
//!
//! Bring-up runs `Uninitialized -> Resetting -> Replaying -> Ready`, with
//! `Error` reachable from any step that touches the transport.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, State};
