use std::net::IpAddr;

use etherparse::{NetSlice, SlicedPacket, TransportSlice};
use pcap_parser::Linktype;
use thiserror::Error;

use crate::address::NetworkAddress;

const UDP_HEADER_LEN: usize = 8;

/// Errors returned while slicing a frame down to its UDP payload.
#[derive(Debug, Error)]
pub(crate) enum UdpError {
    #[error("packet slice error: {0}")]
    Slice(String),
    #[error("missing IP payload in packet")]
    MissingIpPayload,
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}

/// UDP datagram with both endpoints.
#[derive(Debug)]
pub(crate) struct UdpDatagram<'a> {
    pub source: NetworkAddress,
    pub source_port: u16,
    pub destination: NetworkAddress,
    pub destination_port: u16,
    pub payload: &'a [u8],
}

/// Parse a UDP datagram from a link-layer frame.
///
/// Returns `Ok(None)` for frames that are not IP/UDP or use an
/// unsupported link type.
pub(crate) fn parse_udp_datagram(
    linktype: Linktype,
    data: &[u8],
) -> Result<Option<UdpDatagram<'_>>, UdpError> {
    let sliced = match linktype {
        Linktype::ETHERNET => {
            SlicedPacket::from_ethernet(data).map_err(|e| UdpError::Slice(e.to_string()))?
        }
        Linktype::RAW => SlicedPacket::from_ip(data).map_err(|e| UdpError::Slice(e.to_string()))?,
        _ => return Ok(None),
    };

    let (Some(net), Some(TransportSlice::Udp(udp))) = (sliced.net, sliced.transport) else {
        return Ok(None);
    };

    let (source, destination) = match net {
        NetSlice::Ipv4(ref ipv4) => (
            NetworkAddress::from(IpAddr::V4(ipv4.header().source_addr())),
            NetworkAddress::from(IpAddr::V4(ipv4.header().destination_addr())),
        ),
        NetSlice::Ipv6(ref ipv6) => (
            NetworkAddress::from(IpAddr::V6(ipv6.header().source_addr())),
            NetworkAddress::from(IpAddr::V6(ipv6.header().destination_addr())),
        ),
    };

    let ip_payload = net.ip_payload_ref().ok_or(UdpError::MissingIpPayload)?.payload;
    if ip_payload.len() < UDP_HEADER_LEN {
        return Err(UdpError::TooShort {
            needed: UDP_HEADER_LEN,
            actual: ip_payload.len(),
        });
    }

    Ok(Some(UdpDatagram {
        source,
        source_port: udp.source_port(),
        destination,
        destination_port: udp.destination_port(),
        payload: &ip_payload[UDP_HEADER_LEN..],
    }))
}
