//! State machine definition

use super::events::Event;

/// Panel states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, nothing sent yet
    #[default]
    Uninitialized,
    /// Hard reset in progress
    Resetting,
    /// Walking the init sequence
    Replaying,
    /// Accepting pixel updates and utility commands
    Ready,
    /// A transport operation failed
    Error(ErrorKind),
}

/// What failed when the panel entered `Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Reset line could not be driven
    ResetFailed,
    /// A command write was rejected
    CommandFailed,
    /// Framebuffer push failed
    PushFailed,
    /// Backlight line could not be driven
    BacklightFailed,
}

impl State {
    pub fn is_ready(&self) -> bool {
        matches!(self, State::Ready)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, State::Error(_))
    }

    /// Whether a new bring-up may start from this state
    ///
    /// A completed or failed bring-up can be repeated; one in progress
    /// cannot be interrupted.
    pub fn can_begin_setup(&self) -> bool {
        matches!(self, State::Uninitialized | State::Ready | State::Error(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Uninitialized | Ready | Error(_), BeginReset) => Resetting,
            (Uninitialized | Ready | Error(_), BeginReplay) => Replaying,

            (Resetting, BeginReplay) => Replaying,
            (Resetting, Fault(kind)) => Error(kind),

            (Replaying, ReplayFinished) => Ready,
            (Replaying, Fault(kind)) => Error(kind),

            (Ready, Fault(kind)) => Error(kind),

            // Default: stay in current state
            _ => self,
        }
    }
}
