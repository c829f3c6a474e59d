//! Binary configuration snapshots
//!
//! A validated [`PanelConfig`] serialized with postcard behind a fixed
//! header:
//!
//! ```text
//! ┌──────────┬─────────┬─────────┬──────────────────┐
//! │ magic    │ version │ CRC-16  │ postcard body    │
//! │ 4 B (LE) │ 2 B (LE)│ 2 B (LE)│ ...              │
//! └──────────┴─────────┴─────────┴──────────────────┘
//! ```
//!
//! The CRC covers the body only.

use ili9881c_core::PanelConfig;
use ili9881c_protocol::crc16;

use crate::error::LoadError;

/// Marks a panel configuration snapshot ("I98C")
pub const SNAPSHOT_MAGIC: u32 = 0x4338_3949;

/// Bumped whenever the serialized layout of [`PanelConfig`] changes
pub const SNAPSHOT_VERSION: u16 = 1;

const HEADER_LEN: usize = 8;

/// Serialize `config` into `buffer`
///
/// Returns the written prefix of `buffer`.
pub fn save<'a>(config: &PanelConfig, buffer: &'a mut [u8]) -> Result<&'a [u8], LoadError> {
    if buffer.len() < HEADER_LEN {
        return Err(LoadError::Serialize);
    }
    let (header, body) = buffer.split_at_mut(HEADER_LEN);
    let body_len = postcard::to_slice(config, body)
        .map_err(|_| LoadError::Serialize)?
        .len();

    header[..4].copy_from_slice(&SNAPSHOT_MAGIC.to_le_bytes());
    header[4..6].copy_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    header[6..8].copy_from_slice(&crc16(&body[..body_len]).to_le_bytes());

    #[cfg(feature = "defmt")]
    defmt::debug!("Saved {} bytes of panel configuration", HEADER_LEN + body_len);

    Ok(&buffer[..HEADER_LEN + body_len])
}

/// Restore a configuration written by [`save`]
pub fn load(bytes: &[u8]) -> Result<PanelConfig, LoadError> {
    if bytes.len() < HEADER_LEN {
        return Err(LoadError::Truncated);
    }
    let (header, body) = bytes.split_at(HEADER_LEN);

    let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    if magic != SNAPSHOT_MAGIC {
        return Err(LoadError::BadMagic);
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != SNAPSHOT_VERSION {
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Snapshot version mismatch: found {}, expected {}",
            version,
            SNAPSHOT_VERSION
        );
        return Err(LoadError::VersionMismatch { found: version });
    }
    let crc = u16::from_le_bytes([header[6], header[7]]);
    if crc != crc16(body) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Snapshot CRC mismatch");
        return Err(LoadError::CrcMismatch);
    }

    postcard::from_bytes(body).map_err(|_| LoadError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ili9881c_core::config::{PanelModel, Rotation};
    use ili9881c_core::{InitInstruction, InitSequence};

    fn sample() -> PanelConfig {
        let mut config = PanelConfig::new(PanelModel::Custom);
        config.appearance.rotation = Rotation::Deg270;
        config.link.lane_count = 4;
        config.init_sequence = InitSequence::from(alloc::vec![
            InitInstruction::command(0x11, &[]),
            InitInstruction::delay(120),
            InitInstruction::command(0xFF, &[0x98, 0x81, 0x03]),
        ]);
        config
    }

    #[test]
    fn test_save_then_load() {
        let config = sample();
        let mut buffer = [0u8; 256];
        let bytes = save(&config, &mut buffer).unwrap();
        assert_eq!(&bytes[..4], b"I98C");
        assert_eq!(load(bytes).unwrap(), config);
    }

    #[test]
    fn test_vendor_sequence_fits_small_buffer() {
        let config = PanelConfig::new(PanelModel::Custom720x1280);
        let mut buffer = [0u8; 2048];
        let bytes = save(&config, &mut buffer).unwrap();
        assert_eq!(load(bytes).unwrap(), config);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buffer = [0u8; 16];
        assert_eq!(save(&sample(), &mut buffer), Err(LoadError::Serialize));
        assert_eq!(save(&sample(), &mut buffer[..4]), Err(LoadError::Serialize));
    }

    #[test]
    fn test_rejects_bad_header() {
        let mut buffer = [0u8; 256];
        let len = save(&sample(), &mut buffer).unwrap().len();

        let mut wrong_magic = buffer;
        wrong_magic[0] ^= 0xFF;
        assert_eq!(load(&wrong_magic[..len]), Err(LoadError::BadMagic));

        let mut wrong_version = buffer;
        wrong_version[4] = 9;
        assert_eq!(
            load(&wrong_version[..len]),
            Err(LoadError::VersionMismatch { found: 9 })
        );

        assert_eq!(load(&buffer[..5]), Err(LoadError::Truncated));
    }

    #[test]
    fn test_rejects_corrupt_body() {
        let mut buffer = [0u8; 256];
        let len = save(&sample(), &mut buffer).unwrap().len();
        buffer[len - 1] ^= 0x01;
        assert_eq!(load(&buffer[..len]), Err(LoadError::CrcMismatch));
    }

    #[test]
    fn test_truncated_body() {
        let mut buffer = [0u8; 256];
        let len = save(&sample(), &mut buffer).unwrap().len();
        // Re-stamp the CRC so only the body shape is wrong
        let body_crc = crc16(&buffer[HEADER_LEN..len - 3]).to_le_bytes();
        buffer[6..8].copy_from_slice(&body_crc);
        assert_eq!(load(&buffer[..len - 3]), Err(LoadError::Deserialize));
    }
}
