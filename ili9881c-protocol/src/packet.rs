//! DSI packet encoding and decoding
//!
//! Short packet:
//! - DI (1 byte): virtual channel (bits 7-6) and data type (bits 5-0)
//! - DATA0, DATA1 (2 bytes)
//! - ECC (1 byte)
//!
//! Long packet:
//! - DI (1 byte)
//! - WC (2 bytes): payload length, little-endian
//! - ECC (1 byte)
//! - PAYLOAD (WC bytes)
//! - CHECKSUM (2 bytes): CRC-16 of the payload, little-endian

use heapless::Vec;

use crate::checksum::{crc16, ecc};

/// Maximum long packet payload carried by this crate
pub const MAX_PAYLOAD_SIZE: usize = 1024;

/// Header size shared by both packet kinds
pub const HEADER_SIZE: usize = 4;

/// Maximum encoded packet size (header + payload + checksum)
pub const MAX_PACKET_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + 2;

/// Highest virtual channel number
pub const MAX_CHANNEL: u8 = 3;

/// Errors that can occur during packet encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Virtual channel above 3
    InvalidChannel,
    /// Data type not defined by MIPI DSI
    UnknownDataType(u8),
    /// Data type used with the wrong packet kind
    WrongPacketKind,
    /// Header ECC mismatch
    InvalidEcc,
    /// Payload checksum mismatch
    InvalidChecksum,
}

/// Processor-to-peripheral data types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataType {
    VSyncStart = 0x01,
    VSyncEnd = 0x11,
    HSyncStart = 0x21,
    HSyncEnd = 0x31,
    EndOfTransmission = 0x08,
    ColorModeOff = 0x02,
    ColorModeOn = 0x12,
    ShutdownPeripheral = 0x22,
    TurnOnPeripheral = 0x32,
    GenericShortWrite0 = 0x03,
    GenericShortWrite1 = 0x13,
    GenericShortWrite2 = 0x23,
    GenericRead0 = 0x04,
    GenericRead1 = 0x14,
    GenericRead2 = 0x24,
    DcsShortWrite0 = 0x05,
    DcsShortWrite1 = 0x15,
    DcsRead = 0x06,
    SetMaxReturnPacketSize = 0x37,
    NullPacket = 0x09,
    BlankingPacket = 0x19,
    GenericLongWrite = 0x29,
    DcsLongWrite = 0x39,
    PackedPixelStream16 = 0x0E,
    PackedPixelStream18 = 0x1E,
    LooselyPackedPixelStream18 = 0x2E,
    PackedPixelStream24 = 0x3E,
}

impl DataType {
    /// Parse the six data-type bits of a DI byte
    pub fn from_u8(value: u8) -> Option<Self> {
        use DataType::*;
        let dt = match value {
            0x01 => VSyncStart,
            0x11 => VSyncEnd,
            0x21 => HSyncStart,
            0x31 => HSyncEnd,
            0x08 => EndOfTransmission,
            0x02 => ColorModeOff,
            0x12 => ColorModeOn,
            0x22 => ShutdownPeripheral,
            0x32 => TurnOnPeripheral,
            0x03 => GenericShortWrite0,
            0x13 => GenericShortWrite1,
            0x23 => GenericShortWrite2,
            0x04 => GenericRead0,
            0x14 => GenericRead1,
            0x24 => GenericRead2,
            0x05 => DcsShortWrite0,
            0x15 => DcsShortWrite1,
            0x06 => DcsRead,
            0x37 => SetMaxReturnPacketSize,
            0x09 => NullPacket,
            0x19 => BlankingPacket,
            0x29 => GenericLongWrite,
            0x39 => DcsLongWrite,
            0x0E => PackedPixelStream16,
            0x1E => PackedPixelStream18,
            0x2E => LooselyPackedPixelStream18,
            0x3E => PackedPixelStream24,
            _ => return None,
        };
        Some(dt)
    }

    /// Whether packets of this type carry a word count and payload
    pub fn is_long(&self) -> bool {
        matches!(
            self,
            DataType::NullPacket
                | DataType::BlankingPacket
                | DataType::GenericLongWrite
                | DataType::DcsLongWrite
                | DataType::PackedPixelStream16
                | DataType::PackedPixelStream18
                | DataType::LooselyPackedPixelStream18
                | DataType::PackedPixelStream24
        )
    }
}

/// A DSI packet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    Short {
        channel: u8,
        data_type: DataType,
        data: [u8; 2],
    },
    Long {
        channel: u8,
        data_type: DataType,
        payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    },
}

impl Packet {
    /// Create a short packet
    pub fn short(channel: u8, data_type: DataType, data: [u8; 2]) -> Result<Self, PacketError> {
        check_channel(channel)?;
        if data_type.is_long() {
            return Err(PacketError::WrongPacketKind);
        }
        Ok(Packet::Short {
            channel,
            data_type,
            data,
        })
    }

    /// Create a long packet
    pub fn long(channel: u8, data_type: DataType, payload: &[u8]) -> Result<Self, PacketError> {
        check_channel(channel)?;
        if !data_type.is_long() {
            return Err(PacketError::WrongPacketKind);
        }
        let mut vec = Vec::new();
        vec.extend_from_slice(payload)
            .map_err(|_| PacketError::PayloadTooLarge)?;
        Ok(Packet::Long {
            channel,
            data_type,
            payload: vec,
        })
    }

    /// DCS write of `opcode` with `params`
    ///
    /// No parameter uses a short write (0x05), one parameter a short write
    /// with parameter (0x15), more a long write (0x39).
    pub fn dcs_write(channel: u8, opcode: u8, params: &[u8]) -> Result<Self, PacketError> {
        match params {
            [] => Self::short(channel, DataType::DcsShortWrite0, [opcode, 0]),
            [p] => Self::short(channel, DataType::DcsShortWrite1, [opcode, *p]),
            _ => {
                let mut payload: Vec<u8, MAX_PAYLOAD_SIZE> = Vec::new();
                payload
                    .push(opcode)
                    .map_err(|_| PacketError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(params)
                    .map_err(|_| PacketError::PayloadTooLarge)?;
                Self::long(channel, DataType::DcsLongWrite, &payload)
            }
        }
    }

    /// Generic write of `bytes`
    ///
    /// Up to two bytes fit a short packet (0x03, 0x13, 0x23); longer
    /// writes use a generic long write (0x29).
    pub fn generic_write(channel: u8, bytes: &[u8]) -> Result<Self, PacketError> {
        match bytes {
            [] => Self::short(channel, DataType::GenericShortWrite0, [0, 0]),
            [a] => Self::short(channel, DataType::GenericShortWrite1, [*a, 0]),
            [a, b] => Self::short(channel, DataType::GenericShortWrite2, [*a, *b]),
            _ => Self::long(channel, DataType::GenericLongWrite, bytes),
        }
    }

    pub fn channel(&self) -> u8 {
        match self {
            Packet::Short { channel, .. } | Packet::Long { channel, .. } => *channel,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Packet::Short { data_type, .. } | Packet::Long { data_type, .. } => *data_type,
        }
    }

    /// Data identifier byte
    pub fn data_id(&self) -> u8 {
        (self.channel() << 6) | self.data_type() as u8
    }

    /// Number of bytes [`encode`](Self::encode) writes
    pub fn encoded_len(&self) -> usize {
        match self {
            Packet::Short { .. } => HEADER_SIZE,
            Packet::Long { payload, .. } => HEADER_SIZE + payload.len() + 2,
        }
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(PacketError::BufferTooSmall);
        }

        let di = self.data_id();
        match self {
            Packet::Short { data, .. } => {
                let header = [di, data[0], data[1]];
                buffer[..3].copy_from_slice(&header);
                buffer[3] = ecc(header);
            }
            Packet::Long { payload, .. } => {
                let [wc_lo, wc_hi] = (payload.len() as u16).to_le_bytes();
                let header = [di, wc_lo, wc_hi];
                buffer[..3].copy_from_slice(&header);
                buffer[3] = ecc(header);
                buffer[HEADER_SIZE..HEADER_SIZE + payload.len()].copy_from_slice(payload);
                let [crc_lo, crc_hi] = crc16(payload).to_le_bytes();
                buffer[len - 2] = crc_lo;
                buffer[len - 1] = crc_hi;
            }
        }

        Ok(len)
    }

    /// Encode this packet into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_PACKET_SIZE>, PacketError> {
        let mut vec: Vec<u8, MAX_PACKET_SIZE> = Vec::new();
        vec.resize_default(self.encoded_len())
            .map_err(|_| PacketError::BufferTooSmall)?;
        let len = self.encode(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }
}

fn check_channel(channel: u8) -> Result<(), PacketError> {
    if channel > MAX_CHANNEL {
        return Err(PacketError::InvalidChannel);
    }
    Ok(())
}

/// State machine for decoding a stream of packets
///
/// DSI has no start-of-packet marker: after an error the decoder drops
/// what it has and treats the next byte as a new header.
#[derive(Debug, Clone)]
pub struct PacketDecoder {
    state: DecodeState,
    header: [u8; HEADER_SIZE],
    header_len: usize,
    data_type: DataType,
    word_count: usize,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    crc_lo: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Collecting DI, two header bytes and ECC
    ReadingHeader,
    /// Reading long packet payload
    ReadingPayload,
    /// Waiting for checksum low byte
    WaitingForCrcLow,
    /// Waiting for checksum high byte
    WaitingForCrcHigh,
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::ReadingHeader,
            header: [0; HEADER_SIZE],
            header_len: 0,
            data_type: DataType::NullPacket,
            word_count: 0,
            payload: Vec::new(),
            crc_lo: 0,
        }
    }

    /// Reset the decoder state
    pub fn reset(&mut self) {
        self.state = DecodeState::ReadingHeader;
        self.header_len = 0;
        self.word_count = 0;
        self.payload.clear();
        self.crc_lo = 0;
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(packet))` when a complete valid packet is decoded,
    /// `Ok(None)` when more bytes are needed, or `Err` on a decode error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        match self.state {
            DecodeState::ReadingHeader => {
                self.header[self.header_len] = byte;
                self.header_len += 1;
                if self.header_len < HEADER_SIZE {
                    return Ok(None);
                }
                self.finish_header()
            }
            DecodeState::ReadingPayload => {
                // Cannot overflow: word count was checked in the header
                let _ = self.payload.push(byte);
                if self.payload.len() == self.word_count {
                    self.state = DecodeState::WaitingForCrcLow;
                }
                Ok(None)
            }
            DecodeState::WaitingForCrcLow => {
                self.crc_lo = byte;
                self.state = DecodeState::WaitingForCrcHigh;
                Ok(None)
            }
            DecodeState::WaitingForCrcHigh => {
                let received = u16::from_le_bytes([self.crc_lo, byte]);
                if received != crc16(&self.payload) {
                    self.reset();
                    return Err(PacketError::InvalidChecksum);
                }
                let packet = Packet::Long {
                    channel: self.header[0] >> 6,
                    data_type: self.data_type,
                    payload: self.payload.clone(),
                };
                self.reset();
                Ok(Some(packet))
            }
        }
    }

    fn finish_header(&mut self) -> Result<Option<Packet>, PacketError> {
        let [di, d0, d1, received_ecc] = self.header;
        if ecc([di, d0, d1]) != received_ecc {
            self.reset();
            return Err(PacketError::InvalidEcc);
        }

        let raw_type = di & 0x3F;
        let Some(data_type) = DataType::from_u8(raw_type) else {
            self.reset();
            return Err(PacketError::UnknownDataType(raw_type));
        };
        let channel = di >> 6;

        if !data_type.is_long() {
            self.reset();
            return Ok(Some(Packet::Short {
                channel,
                data_type,
                data: [d0, d1],
            }));
        }

        self.data_type = data_type;
        self.word_count = u16::from_le_bytes([d0, d1]) as usize;
        if self.word_count > MAX_PAYLOAD_SIZE {
            self.reset();
            return Err(PacketError::PayloadTooLarge);
        }
        self.payload.clear();
        self.state = if self.word_count == 0 {
            DecodeState::WaitingForCrcLow
        } else {
            DecodeState::ReadingPayload
        };
        Ok(None)
    }

    /// Feed multiple bytes to the decoder
    ///
    /// Returns the first complete packet found, if any.
    /// Remaining bytes after a complete packet are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Packet>, PacketError> {
        for &byte in bytes {
            if let Some(packet) = self.feed(byte)? {
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dcs_write_no_param() {
        let packet = Packet::dcs_write(0, 0x11, &[]).unwrap();
        assert_eq!(packet.data_type(), DataType::DcsShortWrite0);
        assert_eq!(packet.encode_to_vec().unwrap(), [0x05, 0x11, 0x00, 0x36]);
    }

    #[test]
    fn test_dcs_write_one_param() {
        let packet = Packet::dcs_write(0, 0x3A, &[0x55]).unwrap();
        assert_eq!(packet.data_type(), DataType::DcsShortWrite1);
        assert_eq!(packet.encode_to_vec().unwrap(), [0x15, 0x3A, 0x55, 0x02]);
    }

    #[test]
    fn test_dcs_write_long() {
        let packet = Packet::dcs_write(0, 0x2A, &[0x00, 0x00, 0x02, 0xCF]).unwrap();
        assert_eq!(packet.data_type(), DataType::DcsLongWrite);
        assert_eq!(
            packet.encode_to_vec().unwrap(),
            [0x39, 0x05, 0x00, 0x36, 0x2A, 0x00, 0x00, 0x02, 0xCF, 0xFA, 0x11]
        );
    }

    #[test]
    fn test_generic_write_types() {
        let t = |bytes: &[u8]| Packet::generic_write(0, bytes).unwrap().data_type();
        assert_eq!(t(&[]), DataType::GenericShortWrite0);
        assert_eq!(t(&[0x11]), DataType::GenericShortWrite1);
        assert_eq!(t(&[0x36, 0x08]), DataType::GenericShortWrite2);
        assert_eq!(t(&[0xFF, 0x98, 0x81, 0x03]), DataType::GenericLongWrite);
    }

    #[test]
    fn test_virtual_channel_in_data_id() {
        let packet = Packet::dcs_write(2, 0x29, &[]).unwrap();
        assert_eq!(packet.data_id(), 0x85);
        assert_eq!(
            Packet::dcs_write(4, 0x29, &[]),
            Err(PacketError::InvalidChannel)
        );
    }

    #[test]
    fn test_kind_checked() {
        assert_eq!(
            Packet::short(0, DataType::DcsLongWrite, [0, 0]),
            Err(PacketError::WrongPacketKind)
        );
        assert_eq!(
            Packet::long(0, DataType::DcsShortWrite0, &[]),
            Err(PacketError::WrongPacketKind)
        );
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE];
        assert_eq!(
            Packet::dcs_write(0, 0x2C, &large),
            Err(PacketError::PayloadTooLarge)
        );
        assert!(Packet::long(0, DataType::DcsLongWrite, &large).is_ok());
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let packet = Packet::dcs_write(0, 0x2A, &[1, 2, 3, 4]).unwrap();
        let mut buffer = [0u8; 8];
        assert_eq!(packet.encode(&mut buffer), Err(PacketError::BufferTooSmall));
    }

    #[test]
    fn test_decode_short_and_long() {
        let short = Packet::dcs_write(0, 0x11, &[]).unwrap();
        let long = Packet::dcs_write(1, 0xFF, &[0x98, 0x81, 0x03]).unwrap();

        let mut decoder = PacketDecoder::new();
        let got = decoder
            .feed_bytes(&short.encode_to_vec().unwrap())
            .unwrap();
        assert_eq!(got, Some(short));
        let got = decoder.feed_bytes(&long.encode_to_vec().unwrap()).unwrap();
        assert_eq!(got, Some(long));
    }

    #[test]
    fn test_decode_empty_long_packet() {
        let packet = Packet::long(0, DataType::NullPacket, &[]).unwrap();
        let bytes = packet.encode_to_vec().unwrap();
        assert_eq!(bytes.len(), 6);

        let mut decoder = PacketDecoder::new();
        assert_eq!(decoder.feed_bytes(&bytes).unwrap(), Some(packet));
    }

    #[test]
    fn test_decode_bad_ecc_then_resync() {
        let packet = Packet::dcs_write(0, 0x29, &[]).unwrap();
        let mut bytes = packet.encode_to_vec().unwrap();
        bytes[3] ^= 0x01;

        let mut decoder = PacketDecoder::new();
        assert_eq!(decoder.feed_bytes(&bytes), Err(PacketError::InvalidEcc));

        let good = packet.encode_to_vec().unwrap();
        assert_eq!(decoder.feed_bytes(&good).unwrap(), Some(packet));
    }

    #[test]
    fn test_decode_bad_checksum() {
        let packet = Packet::dcs_write(0, 0x2B, &[0, 0, 0x04, 0xFF]).unwrap();
        let mut bytes = packet.encode_to_vec().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        let mut decoder = PacketDecoder::new();
        assert_eq!(decoder.feed_bytes(&bytes), Err(PacketError::InvalidChecksum));
    }

    #[test]
    fn test_decode_unknown_type() {
        // Data type 0x3F is reserved
        let header = [0x3F, 0x00, 0x00];
        let bytes = [header[0], header[1], header[2], ecc(header)];
        let mut decoder = PacketDecoder::new();
        assert_eq!(
            decoder.feed_bytes(&bytes),
            Err(PacketError::UnknownDataType(0x3F))
        );
    }

    #[test]
    fn test_data_type_table_matches_discriminants() {
        for raw in 0u8..64 {
            if let Some(dt) = DataType::from_u8(raw) {
                assert_eq!(dt as u8, raw);
            }
        }
    }

    proptest! {
        #[test]
        fn test_dcs_packets_decode_to_themselves(
            channel in 0u8..=3,
            opcode in any::<u8>(),
            params in proptest::collection::vec(any::<u8>(), 0..64),
        ) {
            let packet = Packet::dcs_write(channel, opcode, &params).unwrap();
            let bytes = packet.encode_to_vec().unwrap();
            prop_assert_eq!(bytes.len(), packet.encoded_len());

            let mut decoder = PacketDecoder::new();
            prop_assert_eq!(decoder.feed_bytes(&bytes).unwrap(), Some(packet));
        }
    }
}
