//! ILI9881C vendor bring-up sequence
//!
//! Used when the configuration carries no `init_sequence`. Register pages
//! are selected with the `0xFF 0x98 0x81 <page>` extension command.

use super::{InitInstruction, InitSequence};

/// Number of instructions in the vendor sequence
pub const VENDOR_SEQUENCE_LEN: usize = VENDOR_SEQUENCE.len();

enum Step {
    Command(u8, &'static [u8]),
    Delay(u32),
}

/// Build the vendor sequence
pub fn vendor_sequence() -> InitSequence {
    let mut seq = InitSequence::with_capacity(VENDOR_SEQUENCE.len());
    for step in VENDOR_SEQUENCE {
        seq.push(match step {
            Step::Command(opcode, payload) => InitInstruction::command(*opcode, payload),
            Step::Delay(ms) => InitInstruction::delay(*ms),
        });
    }
    seq
}

#[rustfmt::skip]
const VENDOR_SEQUENCE: &[Step] = &[
    // Page 3: GIP timing
    Step::Command(0xFF, &[0x98, 0x81, 0x03]),
    Step::Command(0x01, &[0x00]),
    Step::Command(0x02, &[0x00]),
    Step::Command(0x03, &[0x73]),
    Step::Command(0x04, &[0x73]),
    Step::Command(0x05, &[0x00]),
    Step::Command(0x06, &[0x06]),
    Step::Command(0x07, &[0x02]),
    Step::Command(0x08, &[0x00]),
    Step::Command(0x09, &[0x01]),
    Step::Command(0x0A, &[0x00]),
    Step::Command(0x0B, &[0x00]),
    Step::Command(0x0C, &[0x01]),
    Step::Command(0x0D, &[0x00]),
    Step::Command(0x0E, &[0x00]),
    Step::Command(0x0F, &[0x00]),
    Step::Command(0x10, &[0x00]),
    Step::Command(0x11, &[0x00]),
    Step::Command(0x12, &[0x00]),
    Step::Command(0x13, &[0x00]),
    Step::Command(0x14, &[0x00]),
    Step::Command(0x15, &[0x00]),
    Step::Command(0x16, &[0x00]),
    Step::Command(0x17, &[0x00]),
    Step::Command(0x18, &[0x00]),
    Step::Command(0x19, &[0x00]),
    Step::Command(0x1A, &[0x00]),
    Step::Command(0x1B, &[0x00]),
    Step::Command(0x1C, &[0x00]),
    Step::Command(0x1D, &[0x00]),
    Step::Command(0x1E, &[0x40]),
    Step::Command(0x1F, &[0x80]),
    Step::Command(0x20, &[0x05]),
    Step::Command(0x21, &[0x02]),
    Step::Command(0x22, &[0x00]),
    Step::Command(0x23, &[0x00]),
    Step::Command(0x24, &[0x00]),
    Step::Command(0x25, &[0x00]),
    Step::Command(0x26, &[0x00]),
    Step::Command(0x27, &[0x00]),
    Step::Command(0x28, &[0x55]),
    Step::Command(0x29, &[0x03]),
    Step::Command(0x2A, &[0x00]),
    Step::Command(0x2B, &[0x00]),
    Step::Command(0x2C, &[0x00]),
    Step::Command(0x2D, &[0x00]),
    Step::Command(0x2E, &[0x00]),
    Step::Command(0x2F, &[0x00]),
    Step::Command(0x30, &[0x00]),
    Step::Command(0x31, &[0x00]),
    Step::Command(0x32, &[0x00]),
    Step::Command(0x33, &[0x00]),
    Step::Command(0x34, &[0x03]),
    Step::Command(0x35, &[0x00]),
    Step::Command(0x36, &[0x05]),
    Step::Command(0x37, &[0x00]),
    Step::Command(0x38, &[0x3C]),
    Step::Command(0x39, &[0x00]),
    Step::Command(0x3A, &[0x40]),
    Step::Command(0x3B, &[0x40]),
    Step::Command(0x3C, &[0x00]),
    Step::Command(0x3D, &[0x00]),
    Step::Command(0x3E, &[0x00]),
    Step::Command(0x3F, &[0x00]),
    Step::Command(0x40, &[0x00]),
    Step::Command(0x41, &[0x00]),
    Step::Command(0x42, &[0x00]),
    Step::Command(0x43, &[0x00]),
    Step::Command(0x44, &[0x00]),

    // GIP pin mapping
    Step::Command(0x50, &[0x01]),
    Step::Command(0x51, &[0x23]),
    Step::Command(0x52, &[0x45]),
    Step::Command(0x53, &[0x67]),
    Step::Command(0x54, &[0x89]),
    Step::Command(0x55, &[0xAB]),
    Step::Command(0x56, &[0x01]),
    Step::Command(0x57, &[0x23]),
    Step::Command(0x58, &[0x45]),
    Step::Command(0x59, &[0x67]),
    Step::Command(0x5A, &[0x89]),
    Step::Command(0x5B, &[0xAB]),
    Step::Command(0x5C, &[0xCD]),
    Step::Command(0x5D, &[0xEF]),
    Step::Command(0x5E, &[0x01]),
    Step::Command(0x5F, &[0x14]),
    Step::Command(0x60, &[0x15]),
    Step::Command(0x61, &[0x0C]),
    Step::Command(0x62, &[0x0D]),
    Step::Command(0x63, &[0x0E]),
    Step::Command(0x64, &[0x0F]),
    Step::Command(0x65, &[0x10]),
    Step::Command(0x66, &[0x11]),
    Step::Command(0x67, &[0x08]),
    Step::Command(0x68, &[0x02]),
    Step::Command(0x69, &[0x0A]),
    Step::Command(0x6A, &[0x02]),
    Step::Command(0x6B, &[0x02]),
    Step::Command(0x6C, &[0x02]),
    Step::Command(0x6D, &[0x02]),
    Step::Command(0x6E, &[0x02]),
    Step::Command(0x6F, &[0x02]),
    Step::Command(0x70, &[0x02]),
    Step::Command(0x71, &[0x02]),
    Step::Command(0x72, &[0x06]),
    Step::Command(0x73, &[0x02]),
    Step::Command(0x74, &[0x02]),
    Step::Command(0x75, &[0x14]),
    Step::Command(0x76, &[0x15]),
    Step::Command(0x77, &[0x0F]),
    Step::Command(0x78, &[0x0E]),
    Step::Command(0x79, &[0x0D]),
    Step::Command(0x7A, &[0x0C]),
    Step::Command(0x7B, &[0x11]),
    Step::Command(0x7C, &[0x10]),
    Step::Command(0x7D, &[0x06]),
    Step::Command(0x7E, &[0x02]),
    Step::Command(0x7F, &[0x0A]),
    Step::Command(0x80, &[0x02]),
    Step::Command(0x81, &[0x02]),
    Step::Command(0x82, &[0x02]),
    Step::Command(0x83, &[0x02]),
    Step::Command(0x84, &[0x02]),
    Step::Command(0x85, &[0x02]),
    Step::Command(0x86, &[0x02]),
    Step::Command(0x87, &[0x02]),
    Step::Command(0x88, &[0x08]),
    Step::Command(0x89, &[0x02]),
    Step::Command(0x8A, &[0x02]),

    // Page 4: power
    Step::Command(0xFF, &[0x98, 0x81, 0x04]),
    Step::Command(0x6C, &[0x15]),
    Step::Command(0x6E, &[0x2A]),
    Step::Command(0x6F, &[0x33]),
    Step::Command(0x8D, &[0x1F]),
    Step::Command(0x87, &[0xBA]),
    Step::Command(0x26, &[0x76]),
    Step::Command(0xB2, &[0xD1]),
    Step::Command(0xB5, &[0x27]),

    // Page 1: panel and VCOM
    Step::Command(0xFF, &[0x98, 0x81, 0x01]),
    Step::Command(0x22, &[0x0A]),
    Step::Command(0x31, &[0x00]),
    Step::Command(0x53, &[0x78]),
    Step::Command(0x55, &[0x7B]),
    Step::Command(0x50, &[0x87]),
    Step::Command(0x51, &[0x82]),
    Step::Command(0x60, &[0x15]),
    Step::Command(0x61, &[0x01]),
    Step::Command(0x62, &[0x0C]),
    Step::Command(0x63, &[0x00]),

    // Positive gamma
    Step::Command(0xA0, &[0x00]),
    Step::Command(0xA1, &[0x13]),
    Step::Command(0xA2, &[0x23]),
    Step::Command(0xA3, &[0x14]),
    Step::Command(0xA4, &[0x16]),
    Step::Command(0xA5, &[0x29]),
    Step::Command(0xA6, &[0x1E]),
    Step::Command(0xA7, &[0x1D]),
    Step::Command(0xA8, &[0x86]),
    Step::Command(0xA9, &[0x1E]),
    Step::Command(0xAA, &[0x29]),
    Step::Command(0xAB, &[0x74]),
    Step::Command(0xAC, &[0x19]),
    Step::Command(0xAD, &[0x17]),
    Step::Command(0xAE, &[0x4B]),
    Step::Command(0xAF, &[0x20]),

    // Negative gamma
    Step::Command(0xC0, &[0x00]),
    Step::Command(0xC1, &[0x13]),
    Step::Command(0xC2, &[0x23]),
    Step::Command(0xC3, &[0x14]),
    Step::Command(0xC4, &[0x16]),
    Step::Command(0xC5, &[0x29]),
    Step::Command(0xC6, &[0x1E]),
    Step::Command(0xC7, &[0x1D]),
    Step::Command(0xC8, &[0x86]),
    Step::Command(0xC9, &[0x1E]),
    Step::Command(0xCA, &[0x29]),
    Step::Command(0xCB, &[0x74]),
    Step::Command(0xCC, &[0x19]),
    Step::Command(0xCD, &[0x17]),
    Step::Command(0xCE, &[0x4B]),
    Step::Command(0xCF, &[0x20]),

    // Back to page 0
    Step::Command(0xFF, &[0x98, 0x81, 0x00]),

    // Sleep out, display on
    Step::Command(0x11, &[]),
    Step::Delay(120),
    Step::Command(0x29, &[]),
    Step::Delay(20),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_sequence_shape() {
        let seq = vendor_sequence();
        assert_eq!(seq.len(), VENDOR_SEQUENCE_LEN);
        assert_eq!(seq.len(), 185);

        // Starts by selecting page 3
        assert_eq!(
            seq.get(0),
            Some(&InitInstruction::command(0xFF, &[0x98, 0x81, 0x03]))
        );
    }

    #[test]
    fn test_vendor_sequence_ends_with_sleep_out_and_display_on() {
        let seq = vendor_sequence();
        let tail: alloc::vec::Vec<_> = seq.iter().skip(seq.len() - 5).cloned().collect();
        assert_eq!(
            tail,
            [
                InitInstruction::command(0xFF, &[0x98, 0x81, 0x00]),
                InitInstruction::command(0x11, &[]),
                InitInstruction::delay(120),
                InitInstruction::command(0x29, &[]),
                InitInstruction::delay(20),
            ]
        );
    }

    #[test]
    fn test_vendor_sequence_visits_pages_in_order() {
        let pages: alloc::vec::Vec<u8> = vendor_sequence()
            .iter()
            .filter_map(|i| match i {
                InitInstruction::Command { opcode: 0xFF, payload } => payload.get(2).copied(),
                _ => None,
            })
            .collect();
        assert_eq!(pages, [3, 4, 1, 0]);
    }
}
