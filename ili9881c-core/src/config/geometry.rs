//! Panel geometry and model presets

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_range, Rotation};
use crate::error::ConfigError;

/// Known panel models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PanelModel {
    #[default]
    Custom,
    Custom720x1280,
}

impl PanelModel {
    /// Look a model up by name, case-insensitive
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        MODEL_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.model)
            .ok_or(ConfigError::UnknownModel)
    }

    pub fn name(&self) -> &'static str {
        self.preset().name
    }

    /// Preset entry for this model
    pub fn preset(&self) -> &'static ModelPreset {
        match self {
            PanelModel::Custom => &MODEL_PRESETS[0],
            PanelModel::Custom720x1280 => &MODEL_PRESETS[1],
        }
    }
}

/// Default geometry of a named model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelPreset {
    pub model: PanelModel,
    pub name: &'static str,
    pub width: u16,
    pub height: u16,
}

/// Model name to default geometry
pub const MODEL_PRESETS: &[ModelPreset] = &[
    ModelPreset {
        model: PanelModel::Custom,
        name: "custom",
        width: 720,
        height: 1280,
    },
    ModelPreset {
        model: PanelModel::Custom720x1280,
        name: "custom_720x1280",
        width: 720,
        height: 1280,
    },
];

/// Largest panel coordinate a column or page address can carry
const MAX_COORDINATE: i64 = u16::MAX as i64;

/// Physical panel size and the offset of the active area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
    pub offset_width: u16,
    pub offset_height: u16,
}

impl PanelGeometry {
    /// Geometry from a model preset, no offsets
    pub fn from_model(model: PanelModel) -> Self {
        let preset = model.preset();
        Self {
            width: preset.width,
            height: preset.height,
            offset_width: 0,
            offset_height: 0,
        }
    }

    /// Explicit dimensions, overriding any preset
    ///
    /// The offset area must stay inside the 16-bit address space, so the
    /// last column and row are addressable.
    pub fn explicit(
        width: i64,
        height: i64,
        offset_width: i64,
        offset_height: i64,
    ) -> Result<Self, ConfigError> {
        let width = check_range("width", width, 1, MAX_COORDINATE)?;
        let height = check_range("height", height, 1, MAX_COORDINATE)?;
        let offset_width = check_range(
            "offset_width",
            offset_width,
            0,
            MAX_COORDINATE + 1 - width,
        )?;
        let offset_height = check_range(
            "offset_height",
            offset_height,
            0,
            MAX_COORDINATE + 1 - height,
        )?;
        Ok(Self {
            width: width as u16,
            height: height as u16,
            offset_width: offset_width as u16,
            offset_height: offset_height as u16,
        })
    }

    /// Logical (width, height) seen by drawing code after rotation
    pub fn effective_size(&self, rotation: Rotation) -> (u16, u16) {
        if rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Number of physical pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_lookup() {
        assert_eq!(PanelModel::from_name("custom"), Ok(PanelModel::Custom));
        assert_eq!(
            PanelModel::from_name("CUSTOM_720x1280"),
            Ok(PanelModel::Custom720x1280)
        );
        assert_eq!(
            PanelModel::from_name("ili9341"),
            Err(ConfigError::UnknownModel)
        );
        assert_eq!(PanelModel::Custom720x1280.name(), "custom_720x1280");
    }

    #[test]
    fn test_from_model() {
        let g = PanelGeometry::from_model(PanelModel::Custom);
        assert_eq!((g.width, g.height), (720, 1280));
        assert_eq!((g.offset_width, g.offset_height), (0, 0));
        assert_eq!(g.pixel_count(), 921_600);
    }

    #[test]
    fn test_explicit_ranges() {
        let g = PanelGeometry::explicit(480, 854, 4, 8).unwrap();
        assert_eq!(g.offset_height, 8);

        let err = PanelGeometry::explicit(0, 854, 0, 0).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "width", .. }));
        assert!(PanelGeometry::explicit(480, 854, -1, 0).is_err());
        assert!(PanelGeometry::explicit(480, 70_000, 0, 0).is_err());
    }

    #[test]
    fn test_offset_keeps_area_addressable() {
        let g = PanelGeometry::explicit(100, 1, 65436, 0).unwrap();
        assert_eq!(g.offset_width, 65436);
        assert!(PanelGeometry::explicit(1, 65535, 0, 1).is_ok());

        let err = PanelGeometry::explicit(100, 1, 65437, 0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                field: "offset_width",
                value: 65437,
                min: 0,
                max: 65436
            }
        );
        let err = PanelGeometry::explicit(1, 65535, 0, 2).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "offset_height",
                ..
            }
        ));
    }

    #[test]
    fn test_effective_size_swaps_for_quarter_turns() {
        let g = PanelGeometry::from_model(PanelModel::Custom);
        assert_eq!(g.effective_size(Rotation::Deg0), (720, 1280));
        assert_eq!(g.effective_size(Rotation::Deg90), (1280, 720));
        assert_eq!(g.effective_size(Rotation::Deg180), (720, 1280));
        assert_eq!(g.effective_size(Rotation::Deg270), (1280, 720));
    }
}
