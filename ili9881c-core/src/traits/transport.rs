//! Transport capability consumed by the sequence player

use core::fmt;

use crate::config::{ColorOrder, PixelFormat};

/// Errors reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus or host controller rejected the transfer
    Bus,
    /// Reset line could not be driven
    ResetLine,
    /// Backlight line could not be driven
    Backlight,
    /// Payload does not fit the transport buffer
    BufferOverflow,
    /// Transfer did not complete in time
    Timeout,
    /// Link has not been configured yet
    NotConfigured,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TransportError::Bus => "bus transfer failed",
            TransportError::ResetLine => "reset line failure",
            TransportError::Backlight => "backlight line failure",
            TransportError::BufferOverflow => "payload exceeds transport buffer",
            TransportError::Timeout => "transfer timed out",
            TransportError::NotConfigured => "link not configured",
        };
        f.write_str(msg)
    }
}

/// Rectangle on the physical panel, offsets already applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    /// Last column covered by the region (inclusive), clamped to `u16::MAX`
    pub fn x_end(&self) -> u16 {
        self.x.saturating_add(self.width.saturating_sub(1))
    }

    /// Last row covered by the region (inclusive), clamped to `u16::MAX`
    pub fn y_end(&self) -> u16 {
        self.y.saturating_add(self.height.saturating_sub(1))
    }

    /// Number of pixels in the region
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Hardware access used by the panel
///
/// The core never touches registers; reset, command writes, delays and
/// framebuffer pushes all go through this trait, so the same sequencing
/// logic runs against a real DSI link or a recording fake.
///
/// Two concurrent writes to the same physical link are the
/// implementation's to serialize.
pub trait Transport {
    /// Whether a reset control line is wired
    ///
    /// When `false`, bring-up skips the `Resetting` state.
    fn has_reset_line(&self) -> bool;

    /// Drive the reset line (`true` = reset asserted)
    fn reset(&mut self, asserted: bool) -> Result<(), TransportError>;

    /// Write a command opcode followed by its payload
    fn write_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), TransportError>;

    /// Block for `duration_ms` milliseconds
    fn sleep_ms(&mut self, duration_ms: u32);

    /// Push encoded pixel data for `region`
    fn push_framebuffer(
        &mut self,
        region: Region,
        pixels: &[u8],
        format: PixelFormat,
        order: ColorOrder,
    ) -> Result<(), TransportError>;

    /// Switch the backlight, if the transport has one
    fn set_backlight(&mut self, _on: bool) -> Result<(), TransportError> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn has_reset_line(&self) -> bool {
        T::has_reset_line(self)
    }

    fn reset(&mut self, asserted: bool) -> Result<(), TransportError> {
        T::reset(self, asserted)
    }

    fn write_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), TransportError> {
        T::write_command(self, opcode, payload)
    }

    fn sleep_ms(&mut self, duration_ms: u32) {
        T::sleep_ms(self, duration_ms)
    }

    fn push_framebuffer(
        &mut self,
        region: Region,
        pixels: &[u8],
        format: PixelFormat,
        order: ColorOrder,
    ) -> Result<(), TransportError> {
        T::push_framebuffer(self, region, pixels, format, order)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), TransportError> {
        T::set_backlight(self, on)
    }
}
