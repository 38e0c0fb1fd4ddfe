use log::debug;

use super::error::ArtNetError;
use super::layout;
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::tod::TodData;

/// Binary codec implemented by every supported Art-Net packet type.
///
/// `encode_payload` / `decode_payload` see only the bytes after the opcode;
/// the envelope ([`Packet`]) owns the opcode field.
pub trait ArtNetPacket: Sized {
    const OP_CODE: OpCode;

    fn encode_payload(&self) -> Vec<u8>;

    fn decode_payload(payload: &[u8]) -> Result<Self, ArtNetError>;
}

/// Decoded Art-Net packet, one variant per entry of the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Packet {
    TodData(TodData),
}

type Decoder = fn(&[u8]) -> Result<Packet, ArtNetError>;

/// Opcode to decoder mapping. Fixed at compile time.
static DECODERS: &[(OpCode, Decoder)] =
    &[(OpCode::TodData, decode_as::<TodData> as Decoder)];

fn decode_as<P>(payload: &[u8]) -> Result<Packet, ArtNetError>
where
    P: ArtNetPacket + Into<Packet>,
{
    P::decode_payload(payload).map(Into::into)
}

fn decoder_for(raw: u16) -> Option<Decoder> {
    DECODERS
        .iter()
        .find(|(op, _)| op.raw() == raw)
        .map(|(_, decoder)| *decoder)
}

impl Packet {
    /// Decode an envelope: little-endian opcode followed by the payload.
    ///
    /// # Examples
    /// ```
    /// use artwire_core::protocols::artnet::error::ArtNetError;
    /// use artwire_core::protocols::artnet::packet::Packet;
    ///
    /// let err = Packet::decode(&[0x00, 0x50]).unwrap_err();
    /// assert_eq!(err, ArtNetError::UnknownOpCode { raw: 0x5000 });
    /// ```
    pub fn decode(envelope: &[u8]) -> Result<Self, ArtNetError> {
        let reader = ArtNetReader::new(envelope);
        let raw = reader.read_u16_le(layout::OP_CODE_RANGE)?;
        let decoder = decoder_for(raw).ok_or(ArtNetError::UnknownOpCode { raw })?;
        debug!("dispatching opcode 0x{raw:04x} ({} bytes)", envelope.len());
        decoder(reader.read_from(layout::ENVELOPE_PAYLOAD_OFFSET)?)
    }

    /// Encode as opcode (little-endian) followed by the payload.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Packet::TodData(packet) => encode_envelope(packet),
        }
    }

    pub fn op_code(&self) -> OpCode {
        match self {
            Packet::TodData(_) => TodData::OP_CODE,
        }
    }
}

impl From<TodData> for Packet {
    fn from(packet: TodData) -> Self {
        Packet::TodData(packet)
    }
}

/// Encode any packet type with its opcode prefix.
pub fn encode_envelope<P: ArtNetPacket>(packet: &P) -> Vec<u8> {
    let payload = packet.encode_payload();
    let mut envelope = Vec::with_capacity(layout::ENVELOPE_PAYLOAD_OFFSET + payload.len());
    envelope.extend_from_slice(&P::OP_CODE.raw().to_le_bytes());
    envelope.extend_from_slice(&payload);
    envelope
}
