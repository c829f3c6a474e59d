//! Configuration types
//!
//! Validated panel configuration: link timing, geometry, appearance and the
//! declarative document the values are resolved from.

pub mod appearance;
pub mod document;
pub mod geometry;
pub mod link;
pub mod panel;

pub use appearance::{ColorOrder, PanelAppearance, PixelFormat, Rotation};
pub use document::ConfigValue;
pub use geometry::{ModelPreset, PanelGeometry, PanelModel, MODEL_PRESETS};
pub use link::{LinkConfig, LinkConfigBuilder};
pub use panel::PanelConfig;

use crate::error::ConfigError;

/// Check `value` against an inclusive range, naming `field` on failure
pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i64, ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}
