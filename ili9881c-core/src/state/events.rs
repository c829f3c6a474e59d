//! Events that trigger state transitions

use super::machine::ErrorKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Setup started and a reset line is wired
    BeginReset,
    /// Reset finished, or setup started without a reset line
    BeginReplay,
    /// Every instruction was written
    ReplayFinished,
    /// Transport failure
    Fault(ErrorKind),
}
