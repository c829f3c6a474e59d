//! Complete validated panel configuration
//!
//! [`PanelConfig::from_document`] resolves the configuration document into
//! typed records. The accepted keys are:
//!
//! | Key | Default |
//! |-----|---------|
//! | `model` | required (`custom`, `custom_720x1280`) |
//! | `dimensions` | model size; table with `width`, `height`, `offset_width`, `offset_height` |
//! | `rotation` | 0 |
//! | `color_order` | `rgb` |
//! | `pixel_format` | `RGB565` |
//! | `invert_colors` | false |
//! | `auto_clear_enabled` | true |
//! | `data_lanes` / `number_of_lanes` | 2 |
//! | `bit_rate` / `lane_bit_rate_mbps` | 1 Gbps |
//! | `phy_voltage` | 1800 mV |
//! | `dpi_clk_freq_mhz` | 80 |
//! | `hsync`, `hbp`, `hfp`, `vsync`, `vbp`, `vfp` | 40, 140, 40, 4, 16, 16 |
//! | `init_sequence` | vendor sequence |
//!
//! Keys owned by the host framework are ignored; anything else is rejected.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use alloc::vec::Vec;

use super::{
    check_range, ColorOrder, ConfigValue, LinkConfig, PanelAppearance, PanelGeometry, PanelModel,
    PixelFormat, Rotation,
};
use crate::error::{ConfigError, PanelError};
use crate::sequence::{self, InitSequence};

/// Keys consumed by the host framework rather than the panel
pub const HOST_KEYS: &[&str] = &[
    "id",
    "platform",
    "reset_pin",
    "dc_pin",
    "backlight_pin",
    "update_interval",
    "lambda",
];

/// Keys that may appear at most once in the panel table
///
/// The lane and bit-rate aliases are tracked separately so that mixing two
/// spellings is reported too.
const SCALAR_KEYS: &[&str] = &[
    "model",
    "dimensions",
    "rotation",
    "color_order",
    "pixel_format",
    "invert_colors",
    "auto_clear_enabled",
    "phy_voltage",
    "dpi_clk_freq_mhz",
    "hsync",
    "hbp",
    "hfp",
    "vsync",
    "vbp",
    "vfp",
    "init_sequence",
];

/// Keys of the `dimensions` table
const DIMENSION_KEYS: &[&str] = &["width", "height", "offset_width", "offset_height"];

/// Accepted range of `lane_bit_rate_mbps`
pub const LANE_BIT_RATE_MBPS_RANGE: (i64, i64) = (80, 2500);

/// Everything a panel instance needs, validated
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub model: PanelModel,
    pub geometry: PanelGeometry,
    pub appearance: PanelAppearance,
    pub link: LinkConfig,
    pub init_sequence: InitSequence,
}

impl PanelConfig {
    /// Defaults for `model`: preset geometry, default link, vendor sequence
    pub fn new(model: PanelModel) -> Self {
        Self {
            model,
            geometry: PanelGeometry::from_model(model),
            appearance: PanelAppearance::default(),
            link: LinkConfig::default(),
            init_sequence: sequence::vendor_sequence(),
        }
    }

    /// Resolve a configuration document
    ///
    /// All validation happens here; an `Ok` result is ready to hand to a
    /// panel without further checks.
    pub fn from_document(doc: &ConfigValue) -> Result<Self, PanelError> {
        let entries = doc.expect_table("panel")?;

        let mut model = None;
        let mut dimensions = None;
        let mut appearance = PanelAppearance::default();
        let mut link = LinkConfig::builder();
        let mut init_sequence = None;
        let mut lanes_key: Option<&'static str> = None;
        let mut rate_key: Option<&'static str> = None;
        let mut seen = Vec::new();

        for (key, value) in entries {
            mark_seen(&mut seen, SCALAR_KEYS, key)?;
            match key.as_str() {
                "model" => model = Some(PanelModel::from_name(value.expect_str("model")?)?),
                "dimensions" => dimensions = Some(resolve_dimensions(value)?),
                "rotation" => {
                    appearance.rotation =
                        Rotation::from_degrees(value.expect_integer("rotation")?)?
                }
                "color_order" => {
                    appearance.color_order =
                        ColorOrder::from_name(value.expect_str("color_order")?)?
                }
                "pixel_format" => {
                    appearance.pixel_format =
                        PixelFormat::from_name(value.expect_str("pixel_format")?)?
                }
                "invert_colors" => appearance.invert_colors = value.expect_bool("invert_colors")?,
                "auto_clear_enabled" => {
                    appearance.auto_clear_enabled = value.expect_bool("auto_clear_enabled")?
                }
                "data_lanes" | "number_of_lanes" => {
                    let name = if key == "data_lanes" {
                        "data_lanes"
                    } else {
                        "number_of_lanes"
                    };
                    claim(&mut lanes_key, name)?;
                    link = link.lane_count(value.expect_integer(name)?);
                }
                "bit_rate" => {
                    claim(&mut rate_key, "bit_rate")?;
                    link = link.bit_rate_bps(value.expect_integer("bit_rate")?);
                }
                "lane_bit_rate_mbps" => {
                    claim(&mut rate_key, "lane_bit_rate_mbps")?;
                    let (min, max) = LANE_BIT_RATE_MBPS_RANGE;
                    let mbps = check_range(
                        "lane_bit_rate_mbps",
                        value.expect_integer("lane_bit_rate_mbps")?,
                        min,
                        max,
                    )?;
                    link = link.bit_rate_bps(mbps * 1_000_000);
                }
                "phy_voltage" => link = link.phy_voltage_mv(value.expect_integer("phy_voltage")?),
                "dpi_clk_freq_mhz" => {
                    link = link.dpi_clock_mhz(value.expect_integer("dpi_clk_freq_mhz")?)
                }
                "hsync" => link = link.hsync(value.expect_integer("hsync")?),
                "hbp" => link = link.hbp(value.expect_integer("hbp")?),
                "hfp" => link = link.hfp(value.expect_integer("hfp")?),
                "vsync" => link = link.vsync(value.expect_integer("vsync")?),
                "vbp" => link = link.vbp(value.expect_integer("vbp")?),
                "vfp" => link = link.vfp(value.expect_integer("vfp")?),
                "init_sequence" => init_sequence = Some(sequence::compile(value)?),
                other if HOST_KEYS.contains(&other) => {}
                other => return Err(ConfigError::unknown_field(other).into()),
            }
        }

        let model = model.ok_or(ConfigError::MissingField("model"))?;

        Ok(Self {
            model,
            geometry: dimensions.unwrap_or_else(|| PanelGeometry::from_model(model)),
            appearance,
            link: link.build()?,
            init_sequence: init_sequence.unwrap_or_else(sequence::vendor_sequence),
        })
    }

    /// Logical (width, height) after rotation
    pub fn effective_size(&self) -> (u16, u16) {
        self.geometry.effective_size(self.appearance.rotation)
    }
}

/// Record that one of two mutually exclusive keys was set
fn claim(slot: &mut Option<&'static str>, name: &'static str) -> Result<(), ConfigError> {
    match slot.replace(name) {
        Some(first) => Err(ConfigError::Conflicting {
            first,
            second: name,
        }),
        None => Ok(()),
    }
}

/// Reject a schema key that appears twice in the same table
fn mark_seen(
    seen: &mut Vec<&'static str>,
    schema: &[&'static str],
    key: &str,
) -> Result<(), ConfigError> {
    let Some(name) = schema.iter().copied().find(|k| *k == key) else {
        return Ok(());
    };
    if seen.contains(&name) {
        return Err(ConfigError::Conflicting {
            first: name,
            second: name,
        });
    }
    seen.push(name);
    Ok(())
}

fn resolve_dimensions(value: &ConfigValue) -> Result<PanelGeometry, ConfigError> {
    let mut width = None;
    let mut height = None;
    let mut offset_width = 0;
    let mut offset_height = 0;
    let mut seen = Vec::new();

    for (key, value) in value.expect_table("dimensions")? {
        mark_seen(&mut seen, DIMENSION_KEYS, key)?;
        match key.as_str() {
            "width" => width = Some(value.expect_integer("width")?),
            "height" => height = Some(value.expect_integer("height")?),
            "offset_width" => offset_width = value.expect_integer("offset_width")?,
            "offset_height" => offset_height = value.expect_integer("offset_height")?,
            other => return Err(ConfigError::unknown_field(other)),
        }
    }

    PanelGeometry::explicit(
        width.ok_or(ConfigError::MissingField("width"))?,
        height.ok_or(ConfigError::MissingField("height"))?,
        offset_width,
        offset_height,
    )
}
