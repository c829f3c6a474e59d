//! Sequence player and panel lifecycle
//!
//! [`Panel`] owns the validated configuration, the framebuffer and the
//! transport. `setup()` performs the hard reset and replays the init
//! sequence; once `Ready`, the panel accepts framebuffer pushes and a few
//! DCS utility commands. Any transport failure moves it to `Error`, from
//! where the caller may run `setup()` again.

use ili9881c_protocol::dcs;

use crate::config::PanelConfig;
use crate::error::PanelError;
use crate::framebuffer::{Framebuffer, Rgb888};
use crate::sequence::{InitInstruction, InitSequence};
use crate::state::{ErrorKind, Event, State};
use crate::traits::{Region, Transport, TransportError};

/// Reset pulse width
pub const RESET_PULSE_MS: u32 = 10;
/// Wait after releasing reset before the controller accepts commands
pub const RESET_SETTLE_MS: u32 = 120;
/// Wait after Sleep Out before further commands
pub const SLEEP_OUT_DELAY_MS: u32 = 120;

/// A panel driven through a [`Transport`]
pub struct Panel<T> {
    transport: T,
    config: PanelConfig,
    framebuffer: Framebuffer,
    state: State,
}

impl<T: Transport> Panel<T> {
    /// Create a panel from a validated configuration
    ///
    /// Nothing is sent until [`setup`](Self::setup).
    pub fn new(transport: T, config: PanelConfig) -> Self {
        let framebuffer = Framebuffer::new(&config.geometry, &config.appearance);
        Self {
            transport,
            config,
            framebuffer,
            state: State::Uninitialized,
        }
    }

    /// Bring the panel from reset to `Ready`
    ///
    /// Runs to completion or to the first failure; instructions after a
    /// failing one are never sent.
    pub fn setup(&mut self) -> Result<(), PanelError> {
        if !self.state.can_begin_setup() {
            return Err(PanelError::NotReady);
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Setting up ILI9881C ({} instructions)",
            self.config.init_sequence.len()
        );

        if self.transport.has_reset_line() {
            self.state = self.state.transition(Event::BeginReset);
            if let Err(e) = self.hard_reset() {
                self.fault(ErrorKind::ResetFailed);
                return Err(e.into());
            }
        }

        self.state = self.state.transition(Event::BeginReplay);
        self.replay()?;
        self.state = self.state.transition(Event::ReplayFinished);

        if let Err(e) = self.transport.set_backlight(true) {
            self.fault(ErrorKind::BacklightFailed);
            return Err(e.into());
        }
        if self.config.appearance.auto_clear_enabled {
            self.framebuffer.clear();
        }

        #[cfg(feature = "defmt")]
        defmt::info!("ILI9881C setup completed");

        Ok(())
    }

    fn hard_reset(&mut self) -> Result<(), TransportError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Performing hardware reset");

        self.transport.reset(true)?;
        self.transport.sleep_ms(RESET_PULSE_MS);
        self.transport.reset(false)?;
        self.transport.sleep_ms(RESET_SETTLE_MS);
        Ok(())
    }

    fn replay(&mut self) -> Result<(), PanelError> {
        for (index, instruction) in self.config.init_sequence.iter().enumerate() {
            match instruction {
                InitInstruction::Command { opcode, payload } => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Command {=u8:#x} with {} data bytes", *opcode, payload.len());

                    if let Err(error) = self.transport.write_command(*opcode, payload) {
                        #[cfg(feature = "defmt")]
                        defmt::error!("Init instruction {} failed: {}", index, error);

                        self.state = self
                            .state
                            .transition(Event::Fault(ErrorKind::CommandFailed));
                        return Err(PanelError::Replay { index, error });
                    }
                }
                InitInstruction::Delay { duration_ms } => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Delay {}ms", duration_ms);

                    self.transport.sleep_ms(*duration_ms);
                }
            }
        }
        Ok(())
    }

    /// Push the framebuffer to the panel
    pub fn update(&mut self) -> Result<(), PanelError> {
        if !self.state.is_ready() {
            return Err(PanelError::NotReady);
        }
        let region = self.region();
        let result = self.transport.push_framebuffer(
            region,
            self.framebuffer.as_bytes(),
            self.config.appearance.pixel_format,
            self.config.appearance.color_order,
        );
        if let Err(e) = result {
            self.fault(ErrorKind::PushFailed);
            return Err(e.into());
        }
        Ok(())
    }

    /// Zero the framebuffer
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Draw one pixel in logical coordinates
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Rgb888) {
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Fill the whole framebuffer
    pub fn fill(&mut self, color: Rgb888) {
        self.framebuffer.fill(color);
    }

    /// Replace the stored init sequence
    ///
    /// Takes effect on the next [`setup`](Self::setup); nothing is sent now.
    pub fn rebuild_sequence(&mut self, sequence: InitSequence) {
        self.config.init_sequence = sequence;
    }

    pub fn set_display_on(&mut self, on: bool) -> Result<(), PanelError> {
        let opcode = if on { dcs::SET_DISPLAY_ON } else { dcs::SET_DISPLAY_OFF };
        self.command(opcode, &[])
    }

    /// Enter sleep mode
    pub fn sleep(&mut self) -> Result<(), PanelError> {
        self.command(dcs::ENTER_SLEEP_MODE, &[])
    }

    /// Leave sleep mode and wait for the controller to settle
    pub fn wake(&mut self) -> Result<(), PanelError> {
        self.command(dcs::EXIT_SLEEP_MODE, &[])?;
        self.transport.sleep_ms(SLEEP_OUT_DELAY_MS);
        Ok(())
    }

    pub fn set_brightness(&mut self, level: u8) -> Result<(), PanelError> {
        self.command(dcs::SET_DISPLAY_BRIGHTNESS, &[level])
    }

    /// Controller-side colour inversion
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), PanelError> {
        let opcode = if inverted {
            dcs::ENTER_INVERT_MODE
        } else {
            dcs::EXIT_INVERT_MODE
        };
        self.command(opcode, &[])
    }

    fn command(&mut self, opcode: u8, payload: &[u8]) -> Result<(), PanelError> {
        if !self.state.is_ready() {
            return Err(PanelError::NotReady);
        }
        if let Err(e) = self.transport.write_command(opcode, payload) {
            self.fault(ErrorKind::CommandFailed);
            return Err(e.into());
        }
        Ok(())
    }

    fn fault(&mut self, kind: ErrorKind) {
        #[cfg(feature = "defmt")]
        defmt::error!("ILI9881C fault: {}", kind);

        self.state = self.state.transition(Event::Fault(kind));
    }

    /// Physical region covered by the framebuffer, offsets applied
    pub fn region(&self) -> Region {
        let g = &self.config.geometry;
        Region {
            x: g.offset_width,
            y: g.offset_height,
            width: g.width,
            height: g.height,
        }
    }

    /// Log the effective configuration
    pub fn dump_config(&self) {
        #[cfg(feature = "defmt")]
        {
            let c = &self.config;
            let (ew, eh) = c.effective_size();
            defmt::info!("ILI9881C Display:");
            defmt::info!("  Model: {}", c.model.name());
            defmt::info!("  Physical Size: {}x{}", c.geometry.width, c.geometry.height);
            defmt::info!("  Effective Size: {}x{}", ew, eh);
            defmt::info!("  Rotation: {}", c.appearance.rotation.degrees());
            defmt::info!(
                "  Offsets: {}, {}",
                c.geometry.offset_width,
                c.geometry.offset_height
            );
            defmt::info!(
                "  Link: {} lanes @ {} bps, PHY {} mV, DPI {} MHz",
                c.link.lane_count,
                c.link.bit_rate_bps,
                c.link.phy_voltage_mv,
                c.link.dpi_clock_mhz
            );
            defmt::info!(
                "  Timing: hsync {} hbp {} hfp {} vsync {} vbp {} vfp {}",
                c.link.hsync,
                c.link.hbp,
                c.link.hfp,
                c.link.vsync,
                c.link.vbp,
                c.link.vfp
            );
            defmt::info!("  Pixel Format: {}", c.appearance.pixel_format.name());
            defmt::info!("  Invert Colors: {}", c.appearance.invert_colors);
            defmt::info!("  Auto Clear Enabled: {}", c.appearance.auto_clear_enabled);
            defmt::info!("  Init Instructions: {}", c.init_sequence.len());
            if self.state.is_error() {
                defmt::error!("  Failed to initialize display");
            }
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Logical (width, height) after rotation
    pub fn size(&self) -> (u16, u16) {
        self.framebuffer.size()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }
}
