//! Hardware abstraction traits
//!
//! These traits define the interface between the panel logic and the
//! link that carries commands and pixels to the glass.

pub mod transport;

pub use transport::{Region, Transport, TransportError};
