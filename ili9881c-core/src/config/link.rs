//! Timing/link model
//!
//! Flat record of the DSI lane, clock and DPI porch parameters. Every field
//! is range-checked on its own when the record is built; nothing is derived
//! from other fields here. Transports compute whatever the PHY needs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::check_range;
use crate::error::ConfigError;

/// Valid data lane counts
pub const LANE_COUNT_RANGE: (i64, i64) = (1, 4);
/// Valid per-lane bit rates in bits per second
pub const BIT_RATE_RANGE: (i64, i64) = (80_000_000, 2_500_000_000);
/// Valid PHY supply voltages in millivolts
pub const PHY_VOLTAGE_RANGE: (i64, i64) = (1200, 3300);
/// Valid DPI pixel clock frequencies in MHz
pub const DPI_CLOCK_RANGE: (i64, i64) = (10, 200);
/// Valid sync pulse and porch widths
pub const TIMING_RANGE: (i64, i64) = (1, 65535);

pub const DEFAULT_LANE_COUNT: u8 = 2;
pub const DEFAULT_BIT_RATE_BPS: u32 = 1_000_000_000;
pub const DEFAULT_PHY_VOLTAGE_MV: u16 = 1800;
pub const DEFAULT_DPI_CLOCK_MHZ: u16 = 80;
pub const DEFAULT_HSYNC: u16 = 40;
pub const DEFAULT_HBP: u16 = 140;
pub const DEFAULT_HFP: u16 = 40;
pub const DEFAULT_VSYNC: u16 = 4;
pub const DEFAULT_VBP: u16 = 16;
pub const DEFAULT_VFP: u16 = 16;

/// Validated DSI link and DPI timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Number of DSI data lanes (1-4)
    pub lane_count: u8,
    /// Per-lane bit rate in bits per second
    pub bit_rate_bps: u32,
    /// PHY supply voltage in millivolts
    pub phy_voltage_mv: u16,
    /// DPI pixel clock in MHz
    pub dpi_clock_mhz: u16,
    /// Horizontal sync pulse width (pixel clocks)
    pub hsync: u16,
    /// Horizontal back porch (pixel clocks)
    pub hbp: u16,
    /// Horizontal front porch (pixel clocks)
    pub hfp: u16,
    /// Vertical sync pulse width (lines)
    pub vsync: u16,
    /// Vertical back porch (lines)
    pub vbp: u16,
    /// Vertical front porch (lines)
    pub vfp: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            lane_count: DEFAULT_LANE_COUNT,
            bit_rate_bps: DEFAULT_BIT_RATE_BPS,
            phy_voltage_mv: DEFAULT_PHY_VOLTAGE_MV,
            dpi_clock_mhz: DEFAULT_DPI_CLOCK_MHZ,
            hsync: DEFAULT_HSYNC,
            hbp: DEFAULT_HBP,
            hfp: DEFAULT_HFP,
            vsync: DEFAULT_VSYNC,
            vbp: DEFAULT_VBP,
            vfp: DEFAULT_VFP,
        }
    }
}

impl LinkConfig {
    /// Start building a link configuration from raw values
    pub fn builder() -> LinkConfigBuilder {
        LinkConfigBuilder::default()
    }

    /// DPI pixel clock in Hz
    pub fn dpi_clock_hz(&self) -> u32 {
        self.dpi_clock_mhz as u32 * 1_000_000
    }
}

/// Collects raw link parameters and validates them in [`build`](Self::build)
///
/// Omitted fields take the documented defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkConfigBuilder {
    lane_count: Option<i64>,
    bit_rate_bps: Option<i64>,
    phy_voltage_mv: Option<i64>,
    dpi_clock_mhz: Option<i64>,
    hsync: Option<i64>,
    hbp: Option<i64>,
    hfp: Option<i64>,
    vsync: Option<i64>,
    vbp: Option<i64>,
    vfp: Option<i64>,
}

impl LinkConfigBuilder {
    pub fn lane_count(mut self, value: i64) -> Self {
        self.lane_count = Some(value);
        self
    }

    pub fn bit_rate_bps(mut self, value: i64) -> Self {
        self.bit_rate_bps = Some(value);
        self
    }

    pub fn phy_voltage_mv(mut self, value: i64) -> Self {
        self.phy_voltage_mv = Some(value);
        self
    }

    pub fn dpi_clock_mhz(mut self, value: i64) -> Self {
        self.dpi_clock_mhz = Some(value);
        self
    }

    pub fn hsync(mut self, value: i64) -> Self {
        self.hsync = Some(value);
        self
    }

    pub fn hbp(mut self, value: i64) -> Self {
        self.hbp = Some(value);
        self
    }

    pub fn hfp(mut self, value: i64) -> Self {
        self.hfp = Some(value);
        self
    }

    pub fn vsync(mut self, value: i64) -> Self {
        self.vsync = Some(value);
        self
    }

    pub fn vbp(mut self, value: i64) -> Self {
        self.vbp = Some(value);
        self
    }

    pub fn vfp(mut self, value: i64) -> Self {
        self.vfp = Some(value);
        self
    }

    /// Validate every field against its range
    ///
    /// Fails on the first out-of-range field, reported under its
    /// configuration key.
    pub fn build(self) -> Result<LinkConfig, ConfigError> {
        let d = LinkConfig::default();

        let lane_count = pick("data_lanes", self.lane_count, d.lane_count, LANE_COUNT_RANGE)?;
        let bit_rate_bps = pick("bit_rate", self.bit_rate_bps, d.bit_rate_bps, BIT_RATE_RANGE)?;
        let phy_voltage_mv = pick(
            "phy_voltage",
            self.phy_voltage_mv,
            d.phy_voltage_mv,
            PHY_VOLTAGE_RANGE,
        )?;
        let dpi_clock_mhz = pick(
            "dpi_clk_freq_mhz",
            self.dpi_clock_mhz,
            d.dpi_clock_mhz,
            DPI_CLOCK_RANGE,
        )?;

        Ok(LinkConfig {
            lane_count: lane_count as u8,
            bit_rate_bps: bit_rate_bps as u32,
            phy_voltage_mv: phy_voltage_mv as u16,
            dpi_clock_mhz: dpi_clock_mhz as u16,
            hsync: pick("hsync", self.hsync, d.hsync, TIMING_RANGE)? as u16,
            hbp: pick("hbp", self.hbp, d.hbp, TIMING_RANGE)? as u16,
            hfp: pick("hfp", self.hfp, d.hfp, TIMING_RANGE)? as u16,
            vsync: pick("vsync", self.vsync, d.vsync, TIMING_RANGE)? as u16,
            vbp: pick("vbp", self.vbp, d.vbp, TIMING_RANGE)? as u16,
            vfp: pick("vfp", self.vfp, d.vfp, TIMING_RANGE)? as u16,
        })
    }
}

fn pick(
    field: &'static str,
    value: Option<i64>,
    default: impl Into<i64>,
    (min, max): (i64, i64),
) -> Result<i64, ConfigError> {
    match value {
        Some(v) => check_range(field, v, min, max),
        None => Ok(default.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let link = LinkConfig::builder().build().unwrap();
        assert_eq!(link, LinkConfig::default());
        assert_eq!(link.lane_count, 2);
        assert_eq!(link.bit_rate_bps, 1_000_000_000);
        assert_eq!(link.hbp, 140);
        assert_eq!(link.dpi_clock_hz(), 80_000_000);
    }

    #[test]
    fn test_lane_count_bounds() {
        let err = LinkConfig::builder().lane_count(5).build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                field: "data_lanes",
                value: 5,
                min: 1,
                max: 4,
            }
        );

        let link = LinkConfig::builder().lane_count(4).build().unwrap();
        assert_eq!(link.lane_count, 4);

        assert!(LinkConfig::builder().lane_count(0).build().is_err());
    }

    #[test]
    fn test_bit_rate_bounds() {
        assert!(LinkConfig::builder().bit_rate_bps(79_999_999).build().is_err());
        assert!(LinkConfig::builder().bit_rate_bps(2_500_000_001).build().is_err());

        let link = LinkConfig::builder()
            .bit_rate_bps(2_500_000_000)
            .build()
            .unwrap();
        assert_eq!(link.bit_rate_bps, 2_500_000_000);
    }

    #[test]
    fn test_phy_and_dpi_bounds() {
        assert!(LinkConfig::builder().phy_voltage_mv(1199).build().is_err());
        assert!(LinkConfig::builder().phy_voltage_mv(3300).build().is_ok());
        assert!(LinkConfig::builder().dpi_clock_mhz(9).build().is_err());
        assert!(LinkConfig::builder().dpi_clock_mhz(201).build().is_err());
        assert!(LinkConfig::builder().dpi_clock_mhz(200).build().is_ok());
    }

    #[test]
    fn test_timing_must_be_positive() {
        let err = LinkConfig::builder().vbp(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "vbp", .. }));
        assert!(LinkConfig::builder().hsync(-3).build().is_err());
        assert!(LinkConfig::builder().hfp(65_536).build().is_err());
    }

    #[test]
    fn test_no_cross_field_checks() {
        // A porch longer than any sane line is still accepted
        let link = LinkConfig::builder()
            .lane_count(1)
            .bit_rate_bps(80_000_000)
            .dpi_clock_mhz(200)
            .hbp(65_535)
            .build()
            .unwrap();
        assert_eq!(link.hbp, 65_535);
    }
}
