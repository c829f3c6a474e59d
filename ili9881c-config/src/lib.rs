//! Panel configuration front end
//!
//! Reads a panel description from TOML into the core document model and
//! resolves it into a validated [`PanelConfig`]. Validated configurations
//! can be stored as compact binary snapshots and loaded back without
//! re-parsing the TOML.
//!
//! ```toml
//! model = "custom"
//! data_lanes = 2
//! lane_bit_rate_mbps = 1000
//! init_sequence = [
//!     [0x11],
//!     { delay = "120ms" },
//!     [0x29],
//! ]
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod loader;
pub mod snapshot;

pub use error::LoadError;
pub use ili9881c_core::PanelConfig;
pub use loader::{document_from_toml, parse_config};
pub use snapshot::{load, save, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
