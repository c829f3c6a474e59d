//! MIPI DSI packet layer for ILI9881C panels
//!
//! This crate defines the byte-level packets a DSI host sends to the panel
//! and the DCS command set carried inside them.
//!
//! # Packet Overview
//!
//! ```text
//! Short packet
//! ┌──────┬───────┬───────┬─────┐
//! │ DI   │ DATA0 │ DATA1 │ ECC │
//! │ 1B   │ 1B    │ 1B    │ 1B  │
//! └──────┴───────┴───────┴─────┘
//!
//! Long packet
//! ┌──────┬───────┬─────┬─────────────┬──────────┐
//! │ DI   │ WC    │ ECC │ PAYLOAD     │ CHECKSUM │
//! │ 1B   │ 2B LE │ 1B  │ WC bytes    │ 2B LE    │
//! └──────┴───────┴─────┴─────────────┴──────────┘
//! ```
//!
//! DI carries the virtual channel in its top two bits and the data type in
//! the remaining six.

#![no_std]
#![deny(unsafe_code)]

pub mod checksum;
pub mod dcs;
pub mod packet;

pub use checksum::{crc16, ecc};
pub use packet::{
    DataType, Packet, PacketDecoder, PacketError, MAX_CHANNEL, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE,
};
