//! MIPI DSI transport

pub mod phy;
pub mod transport;

pub use phy::{bus_config, phy_timings};
pub use transport::{CommandMode, DsiTransport, NoPin};
