//! Pixel framebuffer
//!
//! Holds the physical panel contents in the configured pixel format.
//! Drawing uses logical coordinates; rotation is applied when a pixel is
//! stored, so the buffer can be pushed to the panel as-is.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{PanelAppearance, PanelGeometry, PixelFormat, Rotation};

/// 24-bit colour as drawn by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb888 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into 5-6-5
    pub fn to_rgb565(self) -> u16 {
        ((self.r as u16 >> 3) << 11) | ((self.g as u16 >> 2) << 5) | (self.b as u16 >> 3)
    }
}

/// Panel framebuffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u16,
    height: u16,
    format: PixelFormat,
    rotation: Rotation,
    invert: bool,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a zeroed buffer for the physical panel size
    pub fn new(geometry: &PanelGeometry, appearance: &PanelAppearance) -> Self {
        let len = geometry.pixel_count() * appearance.pixel_format.bytes_per_pixel();
        Self {
            width: geometry.width,
            height: geometry.height,
            format: appearance.pixel_format,
            rotation: appearance.rotation,
            invert: appearance.invert_colors,
            data: vec![0; len],
        }
    }

    /// Logical (width, height) after rotation
    pub fn size(&self) -> (u16, u16) {
        if self.rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Encoded pixel data, row-major in physical orientation
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Zero every byte
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Set one pixel; writes outside the logical area are ignored
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Rgb888) {
        let Some((px, py)) = self.to_physical(x, y) else {
            return;
        };
        let bpp = self.format.bytes_per_pixel();
        let pos = (py as usize * self.width as usize + px as usize) * bpp;
        let encoded = self.encode(color);
        if let Some(slot) = self.data.get_mut(pos..pos + bpp) {
            slot.copy_from_slice(&encoded[..bpp]);
        }
    }

    /// Set every pixel
    pub fn fill(&mut self, color: Rgb888) {
        let bpp = self.format.bytes_per_pixel();
        let encoded = self.encode(color);
        for chunk in self.data.chunks_exact_mut(bpp) {
            chunk.copy_from_slice(&encoded[..bpp]);
        }
    }

    /// Encoded bytes of the pixel at logical `(x, y)`
    pub fn pixel(&self, x: u16, y: u16) -> Option<&[u8]> {
        let (px, py) = self.to_physical(x, y)?;
        let bpp = self.format.bytes_per_pixel();
        let pos = (py as usize * self.width as usize + px as usize) * bpp;
        self.data.get(pos..pos + bpp)
    }

    /// Map logical coordinates to physical ones
    pub fn to_physical(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        let (lw, lh) = self.size();
        if x >= lw || y >= lh {
            return None;
        }
        let (w, h) = (self.width, self.height);
        Some(match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (w - 1 - y, x),
            Rotation::Deg180 => (w - 1 - x, h - 1 - y),
            Rotation::Deg270 => (y, h - 1 - x),
        })
    }

    /// Encode a colour; only the first `bytes_per_pixel` bytes are meaningful
    fn encode(&self, color: Rgb888) -> [u8; 3] {
        match self.format {
            PixelFormat::Rgb565 => {
                let mut c = color.to_rgb565();
                if self.invert {
                    c = !c;
                }
                let [hi, lo] = c.to_be_bytes();
                [hi, lo, 0]
            }
            PixelFormat::Rgb888 => {
                let [r, g, b] = [color.r, color.g, color.b];
                if self.invert {
                    [255 - r, 255 - g, 255 - b]
                } else {
                    [r, g, b]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u16, height: u16, appearance: PanelAppearance) -> Framebuffer {
        let geometry = PanelGeometry {
            width,
            height,
            offset_width: 0,
            offset_height: 0,
        };
        Framebuffer::new(&geometry, &appearance)
    }

    fn rotated(rotation: Rotation) -> PanelAppearance {
        PanelAppearance {
            rotation,
            ..PanelAppearance::default()
        }
    }

    #[test]
    fn test_sizes() {
        let fb = buffer(4, 2, PanelAppearance::default());
        assert_eq!(fb.as_bytes().len(), 16);
        assert_eq!(fb.size(), (4, 2));

        let fb = buffer(
            4,
            2,
            PanelAppearance {
                pixel_format: PixelFormat::Rgb888,
                rotation: Rotation::Deg90,
                ..PanelAppearance::default()
            },
        );
        assert_eq!(fb.as_bytes().len(), 24);
        assert_eq!(fb.size(), (2, 4));
    }

    #[test]
    fn test_rgb565_big_endian() {
        let mut fb = buffer(2, 2, PanelAppearance::default());
        fb.set_pixel(1, 0, Rgb888::new(255, 0, 0));
        assert_eq!(fb.as_bytes()[2..4], [0xF8, 0x00]);
        fb.set_pixel(0, 1, Rgb888::new(0, 0, 255));
        assert_eq!(fb.as_bytes()[4..6], [0x00, 0x1F]);
        assert_eq!(Rgb888::new(0, 255, 0).to_rgb565(), 0x07E0);
    }

    #[test]
    fn test_invert() {
        let mut fb = buffer(
            1,
            1,
            PanelAppearance {
                invert_colors: true,
                ..PanelAppearance::default()
            },
        );
        fb.set_pixel(0, 0, Rgb888::WHITE);
        assert_eq!(fb.as_bytes(), [0x00, 0x00]);

        let mut fb = buffer(
            1,
            1,
            PanelAppearance {
                invert_colors: true,
                pixel_format: PixelFormat::Rgb888,
                ..PanelAppearance::default()
            },
        );
        fb.set_pixel(0, 0, Rgb888::new(10, 20, 30));
        assert_eq!(fb.as_bytes(), [245, 235, 225]);
    }

    #[test]
    fn test_rotation_mapping_stays_in_bounds() {
        // Physical 4x2 panel
        let fb = buffer(4, 2, rotated(Rotation::Deg0));
        assert_eq!(fb.to_physical(3, 1), Some((3, 1)));
        assert_eq!(fb.to_physical(4, 0), None);

        let fb = buffer(4, 2, rotated(Rotation::Deg90));
        assert_eq!(fb.to_physical(0, 0), Some((3, 0)));
        assert_eq!(fb.to_physical(1, 3), Some((0, 1)));
        assert_eq!(fb.to_physical(2, 0), None);

        let fb = buffer(4, 2, rotated(Rotation::Deg180));
        assert_eq!(fb.to_physical(0, 0), Some((3, 1)));
        assert_eq!(fb.to_physical(3, 1), Some((0, 0)));

        let fb = buffer(4, 2, rotated(Rotation::Deg270));
        assert_eq!(fb.to_physical(0, 0), Some((0, 1)));
        assert_eq!(fb.to_physical(1, 3), Some((3, 0)));
        assert_eq!(fb.to_physical(0, 4), None);
    }

    #[test]
    fn test_every_logical_pixel_hits_a_distinct_physical_one() {
        for rotation in [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            let fb = buffer(5, 3, rotated(rotation));
            let (lw, lh) = fb.size();
            let mut seen = [false; 15];
            for y in 0..lh {
                for x in 0..lw {
                    let (px, py) = fb.to_physical(x, y).unwrap();
                    let idx = py as usize * 5 + px as usize;
                    assert!(!seen[idx]);
                    seen[idx] = true;
                }
            }
            assert!(seen.iter().all(|s| *s));
        }
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut fb = buffer(2, 2, PanelAppearance::default());
        fb.set_pixel(2, 0, Rgb888::WHITE);
        fb.set_pixel(0, 9, Rgb888::WHITE);
        assert!(fb.as_bytes().iter().all(|b| *b == 0));
        assert_eq!(fb.pixel(5, 5), None);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut fb = buffer(3, 3, PanelAppearance::default());
        fb.fill(Rgb888::WHITE);
        assert!(fb.as_bytes().iter().all(|b| *b == 0xFF));
        assert_eq!(fb.pixel(2, 2), Some(&[0xFF, 0xFF][..]));
        fb.clear();
        assert!(fb.as_bytes().iter().all(|b| *b == 0));
    }
}
