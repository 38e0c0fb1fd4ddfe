use log::debug;

use super::error::ArtNetError;
use super::layout;
use super::packet::Packet;
use super::reader::ArtNetReader;

/// Parse a full UDP payload (`Art-Net\0` identifier + envelope).
///
/// Returns `Ok(None)` when the payload does not carry the Art-Net
/// identifier. Once the identifier matches, envelope errors are returned.
///
/// # Examples
/// ```
/// use artwire_core::protocols::artnet::parser::{encode_datagram, parse_datagram};
/// use artwire_core::protocols::artnet::packet::Packet;
/// use artwire_core::protocols::artnet::tod::TodData;
///
/// let packet = Packet::from(TodData::builder().build()?);
/// let datagram = encode_datagram(&packet);
/// assert!(datagram.starts_with(b"Art-Net\0"));
/// assert_eq!(parse_datagram(&datagram)?, Some(packet));
/// assert_eq!(parse_datagram(b"not art-net")?, None);
/// # Ok::<(), artwire_core::protocols::artnet::error::ArtNetError>(())
/// ```
pub fn parse_datagram(payload: &[u8]) -> Result<Option<Packet>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    let signature = match reader.read_signature() {
        Ok(signature) => signature,
        Err(_) => return Ok(None),
    };
    if signature != layout::ARTNET_ID {
        return Ok(None);
    }
    debug!("Art-Net datagram of {} bytes", payload.len());
    Packet::decode(reader.read_from(layout::ARTNET_ID.len())?).map(Some)
}

/// Encode a packet as a complete UDP payload.
pub fn encode_datagram(packet: &Packet) -> Vec<u8> {
    let envelope = packet.encode();
    let mut datagram = Vec::with_capacity(layout::ARTNET_ID.len() + envelope.len());
    datagram.extend_from_slice(layout::ARTNET_ID);
    datagram.extend_from_slice(&envelope);
    datagram
}
