//! Packet header ECC and payload checksum
//!
//! The header ECC is the MIPI DSI 6-bit Hamming code over the 24 header
//! bits (DI, WC/data low, WC/data high). Each parity bit covers the header
//! bits set in its mask. The payload checksum is CRC-16 with the reflected
//! polynomial 0x8408 and initial value 0xFFFF.

/// Header bits covered by parity bits P0..P5
const ECC_MASKS: [u32; 6] = [0xF1_2CB7, 0xF2_555B, 0x74_9A6D, 0xB8_E38E, 0xDF_03F0, 0xEF_FC00];

/// ECC byte for a three-byte packet header
pub fn ecc(header: [u8; 3]) -> u8 {
    let data = header[0] as u32 | (header[1] as u32) << 8 | (header[2] as u32) << 16;
    ECC_MASKS
        .iter()
        .enumerate()
        .fold(0u8, |ecc, (bit, mask)| {
            ecc | (((data & mask).count_ones() & 1) as u8) << bit
        })
}

/// CRC-16 over a long packet payload
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= byte as u16;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0x8408
            } else {
                crc >> 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecc_known_headers() {
        // DCS short write, no parameter: Sleep Out, Display On
        assert_eq!(ecc([0x05, 0x11, 0x00]), 0x36);
        assert_eq!(ecc([0x05, 0x29, 0x00]), 0x1C);
        // DCS short write, one parameter: MADCTL, COLMOD 16bpp
        assert_eq!(ecc([0x15, 0x36, 0x00]), 0x29);
        assert_eq!(ecc([0x15, 0x3A, 0x55]), 0x02);
        // DCS long write, word count 4
        assert_eq!(ecc([0x39, 0x04, 0x00]), 0x2C);
    }

    #[test]
    fn test_ecc_zero_header() {
        assert_eq!(ecc([0, 0, 0]), 0);
    }

    #[test]
    fn test_ecc_single_bit_flip_changes_code() {
        let base = ecc([0x39, 0x05, 0x00]);
        for bit in 0..24 {
            let mut header = [0x39u8, 0x05, 0x00];
            header[bit / 8] ^= 1 << (bit % 8);
            assert_ne!(ecc(header), base, "bit {}", bit);
        }
    }

    #[test]
    fn test_crc16_check_value() {
        assert_eq!(crc16(b"123456789"), 0x6F91);
        assert_eq!(crc16(&[]), 0xFFFF);
    }

    #[test]
    fn test_crc16_caset_payload() {
        assert_eq!(crc16(&[0x2A, 0x00, 0x00, 0x02, 0xCF]), 0x11FA);
    }
}
