//! D-PHY timing derivation
//!
//! Minimum HS and clock-lane intervals required by MIPI D-PHY,
//! converted to unit intervals (one bit period) at the lane bit rate.
//! Fractions are truncated.

use ili9881c_core::config::{LinkConfig, PanelGeometry};
use ili9881c_hal::{BusConfig, PhyTimings, VideoTiming};

const HS_PREPARE_NS: u64 = 40;
const HS_ZERO_NS: u64 = 105;
const HS_TRAIL_NS: u64 = 60;
/// HS trail is never shorter than this many unit intervals
const HS_TRAIL_MIN_UI: u16 = 8;
const HS_EXIT_NS: u64 = 100;
const CLK_PREPARE_NS: u64 = 38;
const CLK_ZERO_NS: u64 = 262;
const CLK_TRAIL_NS: u64 = 60;
const CLK_POST_NS: u64 = 60;
const CLK_PRE_NS: u64 = 8;

fn ns_to_ui(ns: u64, bit_rate_bps: u32) -> u16 {
    let ui = ns * bit_rate_bps as u64 / 1_000_000_000;
    ui.min(u16::MAX as u64) as u16
}

/// D-PHY timings for a lane bit rate
pub fn phy_timings(bit_rate_bps: u32) -> PhyTimings {
    let ui = |ns| ns_to_ui(ns, bit_rate_bps);
    PhyTimings {
        hs_prepare: ui(HS_PREPARE_NS),
        hs_zero: ui(HS_ZERO_NS),
        hs_trail: ui(HS_TRAIL_NS).max(HS_TRAIL_MIN_UI),
        hs_exit: ui(HS_EXIT_NS),
        clk_prepare: ui(CLK_PREPARE_NS),
        clk_zero: ui(CLK_ZERO_NS),
        clk_trail: ui(CLK_TRAIL_NS),
        clk_post: ui(CLK_POST_NS),
        clk_pre: ui(CLK_PRE_NS),
    }
}

/// Host bus configuration for a panel
///
/// The clock lane runs at half the bit rate (DDR).
pub fn bus_config(link: &LinkConfig, geometry: &PanelGeometry) -> BusConfig {
    BusConfig {
        lanes: link.lane_count,
        lane_bit_rate_bps: link.bit_rate_bps,
        clock_lane_hz: link.bit_rate_bps / 2,
        phy_voltage_mv: link.phy_voltage_mv,
        dpi_clock_hz: link.dpi_clock_hz(),
        video: VideoTiming {
            h_active: geometry.width,
            v_active: geometry.height,
            hsync: link.hsync,
            hbp: link.hbp,
            hfp: link.hfp,
            vsync: link.vsync,
            vbp: link.vbp,
            vfp: link.vfp,
        },
        phy: phy_timings(link.bit_rate_bps),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ili9881c_core::config::PanelModel;

    #[test]
    fn test_timings_at_1gbps() {
        // One UI is exactly 1 ns
        let t = phy_timings(1_000_000_000);
        assert_eq!(
            t,
            PhyTimings {
                hs_prepare: 40,
                hs_zero: 105,
                hs_trail: 60,
                hs_exit: 100,
                clk_prepare: 38,
                clk_zero: 262,
                clk_trail: 60,
                clk_post: 60,
                clk_pre: 8,
            }
        );
    }

    #[test]
    fn test_timings_at_minimum_rate() {
        // 12.5 ns per UI
        let t = phy_timings(80_000_000);
        assert_eq!(t.hs_prepare, 3);
        assert_eq!(t.hs_zero, 8);
        assert_eq!(t.hs_trail, HS_TRAIL_MIN_UI);
        assert_eq!(t.clk_zero, 20);
        assert_eq!(t.clk_pre, 0);
    }

    #[test]
    fn test_timings_at_maximum_rate() {
        let t = phy_timings(2_500_000_000);
        assert_eq!(t.hs_prepare, 100);
        assert_eq!(t.hs_zero, 262);
        assert_eq!(t.hs_trail, 150);
        assert_eq!(t.clk_zero, 655);
        assert_eq!(t.clk_pre, 20);
    }

    #[test]
    fn test_bus_config_from_link() {
        let link = LinkConfig::default();
        let geometry = PanelGeometry::from_model(PanelModel::Custom);
        let bus = bus_config(&link, &geometry);

        assert_eq!(bus.lanes, 2);
        assert_eq!(bus.clock_lane_hz, 500_000_000);
        assert_eq!(bus.dpi_clock_hz, 80_000_000);
        assert_eq!(bus.video.h_active, 720);
        assert_eq!(bus.video.v_total(), 1316);
        assert_eq!(bus.video.frame_rate_millihz(bus.dpi_clock_hz), 64_670);
        assert_eq!(bus.phy, phy_timings(1_000_000_000));
    }
}
