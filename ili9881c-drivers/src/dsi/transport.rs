//! DSI transport
//!
//! Implements the core [`Transport`] on top of a [`DsiHost`]. Commands are
//! framed as DCS or generic writes and sent in low-power mode; framebuffer
//! pushes set the address window and stream the pixels as write-memory
//! packets in high-speed mode.
//!
//! The reset line is active-low. Reset and backlight pins are optional;
//! without a reset pin the panel skips the hardware reset.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use ili9881c_core::config::{ColorOrder, LinkConfig, PanelGeometry, PixelFormat};
use ili9881c_core::{Region, Transport, TransportError};
use ili9881c_hal::{BusConfig, DsiHost, TransferMode};
use ili9881c_protocol::dcs;
use ili9881c_protocol::{Packet, PacketError, MAX_CHANNEL, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE};

use super::phy::bus_config;

/// Placeholder for an unwired reset or backlight line
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Packet family used for init commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandMode {
    /// DCS short/long writes (0x05, 0x15, 0x39)
    #[default]
    Dcs,
    /// Generic short/long writes (0x03, 0x13, 0x23, 0x29)
    Generic,
}

/// [`Transport`] over a MIPI DSI host controller
pub struct DsiTransport<H, RST, BL, D> {
    host: H,
    delay: D,
    reset: Option<RST>,
    backlight: Option<BL>,
    mode: CommandMode,
    channel: u8,
    bus: Option<BusConfig>,
    /// Last pixel format sent to the controller
    pixel_format: Option<PixelFormat>,
    /// Last colour order sent to the controller
    color_order: Option<ColorOrder>,
    buffer: [u8; MAX_PACKET_SIZE],
}

impl<H, D> DsiTransport<H, NoPin, NoPin, D>
where
    H: DsiHost,
    D: DelayNs,
{
    /// Transport with no reset or backlight line
    pub fn new(host: H, delay: D) -> Self {
        Self {
            host,
            delay,
            reset: None,
            backlight: None,
            mode: CommandMode::Dcs,
            channel: 0,
            bus: None,
            pixel_format: None,
            color_order: None,
            buffer: [0; MAX_PACKET_SIZE],
        }
    }
}

impl<H, RST, BL, D> DsiTransport<H, RST, BL, D>
where
    H: DsiHost,
    RST: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    /// Attach an active-low reset line
    pub fn with_reset<P: OutputPin>(self, pin: P) -> DsiTransport<H, P, BL, D> {
        DsiTransport {
            host: self.host,
            delay: self.delay,
            reset: Some(pin),
            backlight: self.backlight,
            mode: self.mode,
            channel: self.channel,
            bus: self.bus,
            pixel_format: self.pixel_format,
            color_order: self.color_order,
            buffer: self.buffer,
        }
    }

    /// Attach an active-high backlight enable line
    pub fn with_backlight<P: OutputPin>(self, pin: P) -> DsiTransport<H, RST, P, D> {
        DsiTransport {
            host: self.host,
            delay: self.delay,
            reset: self.reset,
            backlight: Some(pin),
            mode: self.mode,
            channel: self.channel,
            bus: self.bus,
            pixel_format: self.pixel_format,
            color_order: self.color_order,
            buffer: self.buffer,
        }
    }

    pub fn with_command_mode(mut self, mode: CommandMode) -> Self {
        self.mode = mode;
        self
    }

    /// Virtual channel for every packet (masked to 0-3)
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel & MAX_CHANNEL;
        self
    }

    /// Bring up the bus for a panel
    ///
    /// Must be called before any command is written.
    pub fn configure(
        &mut self,
        link: &LinkConfig,
        geometry: &PanelGeometry,
    ) -> Result<BusConfig, TransportError> {
        let bus = bus_config(link, geometry);

        #[cfg(feature = "defmt")]
        {
            defmt::debug!(
                "DSI bus: {} lanes at {} bps, DPI clock {} Hz",
                bus.lanes,
                bus.lane_bit_rate_bps,
                bus.dpi_clock_hz
            );
            defmt::debug!("D-PHY timings: {}", bus.phy);
            defmt::debug!(
                "Frame rate {} mHz",
                bus.video.frame_rate_millihz(bus.dpi_clock_hz)
            );
        }

        self.host
            .configure(&bus)
            .map_err(|_| TransportError::Bus)?;
        self.bus = Some(bus);
        self.pixel_format = None;
        self.color_order = None;
        Ok(bus)
    }

    /// Bus configuration in effect, if configured
    pub fn bus_config(&self) -> Option<&BusConfig> {
        self.bus.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Give back the host, delay and pins
    pub fn release(self) -> (H, D, Option<RST>, Option<BL>) {
        (self.host, self.delay, self.reset, self.backlight)
    }

    fn send(&mut self, packet: &Packet, mode: TransferMode) -> Result<(), TransportError> {
        let len = packet.encode(&mut self.buffer).map_err(packet_error)?;
        self.host
            .transmit(&self.buffer[..len], mode)
            .map_err(|_| TransportError::Bus)
    }

    fn send_dcs(
        &mut self,
        opcode: u8,
        params: &[u8],
        mode: TransferMode,
    ) -> Result<(), TransportError> {
        let packet = Packet::dcs_write(self.channel, opcode, params).map_err(packet_error)?;
        self.send(&packet, mode)
    }

    /// Program pixel format and colour order when they differ from what
    /// the controller already has
    fn sync_pixel_mode(
        &mut self,
        format: PixelFormat,
        order: ColorOrder,
    ) -> Result<(), TransportError> {
        if self.pixel_format != Some(format) {
            let value = match format {
                PixelFormat::Rgb565 => dcs::PIXEL_FORMAT_16BPP,
                PixelFormat::Rgb888 => dcs::PIXEL_FORMAT_24BPP,
            };
            self.send_dcs(dcs::SET_PIXEL_FORMAT, &[value], TransferMode::LowPower)?;
            self.pixel_format = Some(format);
        }
        if self.color_order != Some(order) {
            let value = match order {
                ColorOrder::Rgb => 0,
                ColorOrder::Bgr => dcs::ADDRESS_MODE_BGR,
            };
            self.send_dcs(dcs::SET_ADDRESS_MODE, &[value], TransferMode::LowPower)?;
            self.color_order = Some(order);
        }
        Ok(())
    }
}

fn packet_error(e: PacketError) -> TransportError {
    match e {
        PacketError::PayloadTooLarge | PacketError::BufferTooSmall => {
            TransportError::BufferOverflow
        }
        _ => TransportError::Bus,
    }
}

/// Pixel bytes per write-memory packet, a whole number of pixels
fn pixel_chunk_len(bytes_per_pixel: usize) -> usize {
    let room = MAX_PAYLOAD_SIZE - 1;
    room - room % bytes_per_pixel
}

impl<H, RST, BL, D> Transport for DsiTransport<H, RST, BL, D>
where
    H: DsiHost,
    RST: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    fn has_reset_line(&self) -> bool {
        self.reset.is_some()
    }

    fn reset(&mut self, asserted: bool) -> Result<(), TransportError> {
        let Some(pin) = self.reset.as_mut() else {
            return Ok(());
        };
        // Controller registers return to their defaults
        self.pixel_format = None;
        self.color_order = None;
        let result = if asserted {
            pin.set_low()
        } else {
            pin.set_high()
        };
        result.map_err(|_| TransportError::ResetLine)
    }

    fn write_command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), TransportError> {
        if self.bus.is_none() {
            return Err(TransportError::NotConfigured);
        }
        let packet = match self.mode {
            CommandMode::Dcs => Packet::dcs_write(self.channel, opcode, payload),
            CommandMode::Generic => {
                let mut bytes: heapless::Vec<u8, MAX_PAYLOAD_SIZE> = heapless::Vec::new();
                bytes
                    .push(opcode)
                    .map_err(|_| TransportError::BufferOverflow)?;
                bytes
                    .extend_from_slice(payload)
                    .map_err(|_| TransportError::BufferOverflow)?;
                Packet::generic_write(self.channel, &bytes)
            }
        }
        .map_err(packet_error)?;
        if opcode == dcs::SET_PIXEL_FORMAT {
            self.pixel_format = None;
        } else if opcode == dcs::SET_ADDRESS_MODE {
            self.color_order = None;
        }
        self.send(&packet, TransferMode::LowPower)
    }

    fn sleep_ms(&mut self, duration_ms: u32) {
        self.delay.delay_ms(duration_ms);
    }

    fn push_framebuffer(
        &mut self,
        region: Region,
        pixels: &[u8],
        format: PixelFormat,
        order: ColorOrder,
    ) -> Result<(), TransportError> {
        if self.bus.is_none() {
            return Err(TransportError::NotConfigured);
        }
        let bpp = format.bytes_per_pixel();
        if pixels.len() != region.pixel_count() * bpp {
            return Err(TransportError::BufferOverflow);
        }

        self.sync_pixel_mode(format, order)?;
        self.send_dcs(
            dcs::SET_COLUMN_ADDRESS,
            &dcs::address_window(region.x, region.x_end()),
            TransferMode::LowPower,
        )?;
        self.send_dcs(
            dcs::SET_PAGE_ADDRESS,
            &dcs::address_window(region.y, region.y_end()),
            TransferMode::LowPower,
        )?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Streaming {} pixel bytes", pixels.len());

        let mut opcode = dcs::WRITE_MEMORY_START;
        for chunk in pixels.chunks(pixel_chunk_len(bpp)) {
            self.send_dcs(opcode, chunk, TransferMode::HighSpeed)?;
            opcode = dcs::WRITE_MEMORY_CONTINUE;
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), TransportError> {
        let Some(pin) = self.backlight.as_mut() else {
            return Ok(());
        };
        let result = if on { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| TransportError::Backlight)
    }
}
