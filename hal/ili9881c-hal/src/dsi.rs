//! MIPI DSI host abstractions
//!
//! Provides the trait a DSI host controller implements to carry encoded
//! packets to the panel, plus the plain configuration records handed to the
//! controller when the bus is brought up.

/// Link state used for a transfer
///
/// Commands are normally sent in low-power escape mode; pixel streams go
/// out in high-speed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    /// Low-power (LP) escape mode
    LowPower,
    /// High-speed (HS) mode
    HighSpeed,
}

/// DSI host controller
///
/// Implementations own the PHY and the packet FIFO. Packets arrive fully
/// encoded (header, ECC, payload and checksum); the host only moves bytes.
pub trait DsiHost {
    /// Error type for host operations
    type Error;

    /// Configure lanes, clocks and video timing
    ///
    /// Called once before any packet is transmitted.
    fn configure(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Transmit one encoded packet
    fn transmit(&mut self, packet: &[u8], mode: TransferMode) -> Result<(), Self::Error>;
}

impl<T: DsiHost + ?Sized> DsiHost for &mut T {
    type Error = T::Error;

    fn configure(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        T::configure(self, config)
    }

    fn transmit(&mut self, packet: &[u8], mode: TransferMode) -> Result<(), Self::Error> {
        T::transmit(self, packet, mode)
    }
}

/// D-PHY timing parameters, in byte-clock (UI) counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyTimings {
    pub hs_prepare: u16,
    pub hs_zero: u16,
    pub hs_trail: u16,
    pub hs_exit: u16,
    pub clk_prepare: u16,
    pub clk_zero: u16,
    pub clk_trail: u16,
    pub clk_post: u16,
    pub clk_pre: u16,
}

/// DPI video timing
///
/// Active area plus sync pulse and porch widths, in pixel clocks
/// (horizontal) and lines (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VideoTiming {
    pub h_active: u16,
    pub v_active: u16,
    pub hsync: u16,
    pub hbp: u16,
    pub hfp: u16,
    pub vsync: u16,
    pub vbp: u16,
    pub vfp: u16,
}

impl VideoTiming {
    /// Total pixel clocks per line, blanking included
    pub fn h_total(&self) -> u32 {
        self.h_active as u32 + self.hsync as u32 + self.hbp as u32 + self.hfp as u32
    }

    /// Total lines per frame, blanking included
    pub fn v_total(&self) -> u32 {
        self.v_active as u32 + self.vsync as u32 + self.vbp as u32 + self.vfp as u32
    }

    /// Frame rate in millihertz for a given DPI pixel clock
    ///
    /// Returns 0 for an empty frame.
    pub fn frame_rate_millihz(&self, dpi_clock_hz: u32) -> u32 {
        let pixels = self.h_total() as u64 * self.v_total() as u64;
        if pixels == 0 {
            return 0;
        }
        (dpi_clock_hz as u64 * 1000 / pixels) as u32
    }
}

/// Complete bus configuration handed to [`DsiHost::configure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Number of data lanes (1-4)
    pub lanes: u8,
    /// Per-lane bit rate in bits per second
    pub lane_bit_rate_bps: u32,
    /// Clock lane frequency in Hz (DDR, half the bit rate)
    pub clock_lane_hz: u32,
    /// PHY supply voltage in millivolts
    pub phy_voltage_mv: u16,
    /// DPI pixel clock in Hz
    pub dpi_clock_hz: u32,
    /// Video timing of the active area
    pub video: VideoTiming,
    /// D-PHY timing derived from the bit rate
    pub phy: PhyTimings,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing_720x1280() -> VideoTiming {
        VideoTiming {
            h_active: 720,
            v_active: 1280,
            hsync: 40,
            hbp: 140,
            hfp: 40,
            vsync: 4,
            vbp: 16,
            vfp: 16,
        }
    }

    #[test]
    fn test_totals() {
        let t = timing_720x1280();
        assert_eq!(t.h_total(), 940);
        assert_eq!(t.v_total(), 1316);
    }

    #[test]
    fn test_frame_rate() {
        let t = timing_720x1280();
        // 80 MHz / (940 * 1316) = 64.670 Hz
        assert_eq!(t.frame_rate_millihz(80_000_000), 64_670);
    }

    #[test]
    fn test_frame_rate_empty_frame() {
        let t = VideoTiming {
            h_active: 0,
            v_active: 0,
            hsync: 0,
            hbp: 0,
            hfp: 0,
            vsync: 0,
            vbp: 0,
            vfp: 0,
        };
        assert_eq!(t.frame_rate_millihz(80_000_000), 0);
    }
}
