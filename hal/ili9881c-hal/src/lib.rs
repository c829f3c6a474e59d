//! ILI9881C Hardware Abstraction Layer
//!
//! This crate defines the display-link traits that chip-specific HALs
//! (ESP32-P4, STM32 DSIHOST, ...) implement. Panel drivers are written
//! against these traits only, so the same bring-up logic runs on any
//! controller that can put bytes on a MIPI DSI link.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ili9881c-core (sequence player)        │
//! └─────────────────────────────────────────┘
//!                     │ Transport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ili9881c-drivers (DsiTransport)        │
//! └─────────────────────────────────────────┘
//!                     │ DsiHost (this crate)
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  esp32-p4     │       │  stm32 dsi    │
//! │  host driver  │       │  host driver  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`dsi::DsiHost`] - Packet transmission on a configured DSI bus

#![no_std]
#![deny(unsafe_code)]

pub mod dsi;

// Re-export key types at crate root for convenience
pub use dsi::{BusConfig, DsiHost, PhyTimings, TransferMode, VideoTiming};
