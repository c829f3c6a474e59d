//! Board-agnostic bring-up core for ILI9881C MIPI DSI panels
//!
//! This crate contains all panel logic that does not depend on a specific
//! host controller:
//!
//! - Timing/link model, geometry and appearance configuration
//! - Declarative configuration document and its resolution
//! - Init-sequence compiler and the vendor default sequence
//! - Panel lifecycle state machine
//! - Transport trait consumed by the sequence player
//! - Framebuffer with software rotation

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod panel;
pub mod sequence;
pub mod state;
pub mod traits;

pub use config::PanelConfig;
pub use error::{ConfigError, PanelError, SequenceError};
pub use framebuffer::{Framebuffer, Rgb888};
pub use panel::Panel;
pub use sequence::{InitInstruction, InitSequence};
pub use state::State;
pub use traits::{Region, Transport, TransportError};
