//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ili9881c-core:
//!
//! - MIPI DSI transport over any [`DsiHost`](ili9881c_hal::DsiHost)
//! - D-PHY timing derivation from the lane bit rate

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod dsi;

pub use dsi::{CommandMode, DsiTransport, NoPin};
