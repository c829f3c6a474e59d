//! MIPI Display Command Set opcodes
//!
//! Standard DCS commands understood by the ILI9881C, plus the vendor
//! page-select extension.

pub const NOP: u8 = 0x00;
pub const SOFT_RESET: u8 = 0x01;
pub const GET_POWER_MODE: u8 = 0x0A;
pub const GET_ADDRESS_MODE: u8 = 0x0B;
pub const GET_PIXEL_FORMAT: u8 = 0x0C;
pub const GET_DISPLAY_MODE: u8 = 0x0D;
pub const GET_SIGNAL_MODE: u8 = 0x0E;
pub const GET_DIAGNOSTIC_RESULT: u8 = 0x0F;
pub const ENTER_SLEEP_MODE: u8 = 0x10;
pub const EXIT_SLEEP_MODE: u8 = 0x11;
pub const ENTER_PARTIAL_MODE: u8 = 0x12;
pub const ENTER_NORMAL_MODE: u8 = 0x13;
pub const EXIT_INVERT_MODE: u8 = 0x20;
pub const ENTER_INVERT_MODE: u8 = 0x21;
pub const SET_GAMMA_CURVE: u8 = 0x26;
pub const SET_DISPLAY_OFF: u8 = 0x28;
pub const SET_DISPLAY_ON: u8 = 0x29;
pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
pub const SET_PAGE_ADDRESS: u8 = 0x2B;
pub const WRITE_MEMORY_START: u8 = 0x2C;
pub const READ_MEMORY_START: u8 = 0x2E;
pub const SET_PARTIAL_ROWS: u8 = 0x30;
pub const SET_TEAR_OFF: u8 = 0x34;
pub const SET_TEAR_ON: u8 = 0x35;
pub const SET_ADDRESS_MODE: u8 = 0x36;
pub const EXIT_IDLE_MODE: u8 = 0x38;
pub const ENTER_IDLE_MODE: u8 = 0x39;
pub const SET_PIXEL_FORMAT: u8 = 0x3A;
pub const WRITE_MEMORY_CONTINUE: u8 = 0x3C;
pub const READ_MEMORY_CONTINUE: u8 = 0x3E;
pub const SET_TEAR_SCANLINE: u8 = 0x44;
pub const GET_SCANLINE: u8 = 0x45;
pub const SET_DISPLAY_BRIGHTNESS: u8 = 0x51;
pub const GET_DISPLAY_BRIGHTNESS: u8 = 0x52;
pub const WRITE_CONTROL_DISPLAY: u8 = 0x53;
pub const GET_CONTROL_DISPLAY: u8 = 0x54;
pub const WRITE_POWER_SAVE: u8 = 0x55;
pub const READ_DDB_START: u8 = 0xA1;
pub const READ_DDB_CONTINUE: u8 = 0xA8;

/// ILI9881C page select: `0xFF 0x98 0x81 <page>`
pub const SET_PAGE: u8 = 0xFF;

/// `SET_ADDRESS_MODE` bit selecting BGR sub-pixel order
pub const ADDRESS_MODE_BGR: u8 = 0x08;

/// `SET_PIXEL_FORMAT` value for 16 bits per pixel on both interfaces
pub const PIXEL_FORMAT_16BPP: u8 = 0x55;
/// `SET_PIXEL_FORMAT` value for 24 bits per pixel on both interfaces
pub const PIXEL_FORMAT_24BPP: u8 = 0x77;

/// Payload for `SET_PAGE` selecting register page `page`
pub const fn page_select(page: u8) -> [u8; 3] {
    [0x98, 0x81, page]
}

/// Big-endian `[start, end]` payload for column/page address commands
pub const fn address_window(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}
