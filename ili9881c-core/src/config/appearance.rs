//! Panel appearance: rotation, colour order, pixel format and flags

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Display rotation, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation given in degrees
    pub fn from_degrees(degrees: i64) -> Result<Self, ConfigError> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ConfigError::InvalidChoice { field: "rotation" }),
        }
    }

    /// Rotation in degrees
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turns swap the logical width and height
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Sub-pixel order on the glass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ColorOrder {
    /// Parse `rgb` / `bgr`, case-insensitive
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        if name.eq_ignore_ascii_case("rgb") {
            Ok(ColorOrder::Rgb)
        } else if name.eq_ignore_ascii_case("bgr") {
            Ok(ColorOrder::Bgr)
        } else {
            Err(ConfigError::InvalidChoice {
                field: "color_order",
            })
        }
    }
}

/// Framebuffer pixel encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelFormat {
    /// 16 bits per pixel, big-endian 5-6-5
    #[default]
    Rgb565,
    /// 24 bits per pixel, one byte per channel
    Rgb888,
}

impl PixelFormat {
    /// Parse `RGB565` / `RGB888`, case-insensitive
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        if name.eq_ignore_ascii_case("rgb565") {
            Ok(PixelFormat::Rgb565)
        } else if name.eq_ignore_ascii_case("rgb888") {
            Ok(PixelFormat::Rgb888)
        } else {
            Err(ConfigError::InvalidChoice {
                field: "pixel_format",
            })
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb888 => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Rgb888 => "RGB888",
        }
    }
}

/// Appearance settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelAppearance {
    pub rotation: Rotation,
    pub color_order: ColorOrder,
    pub pixel_format: PixelFormat,
    /// Invert every encoded colour
    pub invert_colors: bool,
    /// Zero the framebuffer once bring-up completes
    pub auto_clear_enabled: bool,
}

impl Default for PanelAppearance {
    fn default() -> Self {
        Self {
            rotation: Rotation::Deg0,
            color_order: ColorOrder::Rgb,
            pixel_format: PixelFormat::Rgb565,
            invert_colors: false,
            auto_clear_enabled: true,
        }
    }
}
