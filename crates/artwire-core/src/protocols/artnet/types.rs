//! Small value types that keep Art-Net fields from being mixed up.

use std::fmt;

use super::error::ArtNetError;
use super::layout;

/// Art-Net protocol revision carried in every packet.
///
/// Decoding passes whatever the sender wrote through unchanged; only
/// constructors default to [`ProtocolVersion::CURRENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolVersion(u16);

impl ProtocolVersion {
    pub const CURRENT: ProtocolVersion = ProtocolVersion(layout::PROTOCOL_VERSION);

    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total number of UIDs in a node's table of devices.
///
/// Kept distinct from the per-packet `u8` counters (`block_count`,
/// `uid_count`) so a table size cannot be passed where a block number is
/// expected. Renders as hexadecimal.
///
/// # Examples
/// ```
/// use artwire_core::protocols::artnet::types::UidTotal;
///
/// let total = UidTotal::new(0x01f4);
/// assert_eq!(total.to_string(), "0x01F4");
/// assert_eq!(format!("{total:x}"), "1f4");
/// assert_eq!(total.get(), 500);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UidTotal(u16);

impl UidTotal {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for UidTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl fmt::LowerHex for UidTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for UidTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// 15-bit Port-Address: Net (7 bits), Sub-Net (4 bits), Universe (4 bits).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortAddress(u16);

impl PortAddress {
    pub const MAX: u16 = 0x7fff;

    /// Compose from the Net byte and the low address byte. Bit 7 of `net`
    /// is not part of the Port-Address and is dropped.
    pub const fn from_parts(net: u8, address: u8) -> Self {
        Self((((net & layout::NET_MASK) as u16) << 8) | address as u16)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn net(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn sub_net(self) -> u8 {
        ((self.0 >> 4) & 0x0f) as u8
    }

    pub const fn universe(self) -> u8 {
        (self.0 & 0x0f) as u8
    }

    /// Low byte as carried in the `address` field of ToD packets.
    pub const fn low_byte(self) -> u8 {
        (self.0 & 0xff) as u8
    }
}

impl fmt::Display for PortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.net(), self.sub_net(), self.universe())
    }
}

/// `CommandResponse` of an ArtTodData packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TodCommand {
    /// The packet carries (part of) the full table.
    #[default]
    FullTod,
    /// The node could not supply its table.
    TodNak,
}

impl TodCommand {
    pub const fn raw(self) -> u8 {
        match self {
            TodCommand::FullTod => 0x00,
            TodCommand::TodNak => 0xff,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TodCommand::FullTod => "full_tod",
            TodCommand::TodNak => "tod_nak",
        }
    }
}

impl TryFrom<u8> for TodCommand {
    type Error = ArtNetError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0x00 => Ok(TodCommand::FullTod),
            0xff => Ok(TodCommand::TodNak),
            raw => Err(ArtNetError::InvalidEnumValue {
                field: "command",
                raw,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PortAddress, ProtocolVersion, TodCommand, UidTotal};
    use crate::protocols::artnet::error::ArtNetError;

    #[test]
    fn command_accepts_only_two_values() {
        assert_eq!(TodCommand::try_from(0x00), Ok(TodCommand::FullTod));
        assert_eq!(TodCommand::try_from(0xff), Ok(TodCommand::TodNak));
        for raw in 0x01..=0xfe {
            assert_eq!(
                TodCommand::try_from(raw),
                Err(ArtNetError::InvalidEnumValue {
                    field: "command",
                    raw
                })
            );
        }
    }

    #[test]
    fn port_address_splits_into_net_subnet_universe() {
        let port = PortAddress::from_parts(0x12, 0x34);
        assert_eq!(port.raw(), 0x1234);
        assert_eq!(port.net(), 0x12);
        assert_eq!(port.sub_net(), 0x3);
        assert_eq!(port.universe(), 0x4);
        assert_eq!(port.low_byte(), 0x34);
        assert_eq!(port.to_string(), "18:3:4");
    }

    #[test]
    fn port_address_drops_net_high_bit() {
        assert_eq!(PortAddress::from_parts(0xff, 0xff).raw(), PortAddress::MAX);
    }

    #[test]
    fn uid_total_hex_rendering() {
        let total = UidTotal::new(2);
        assert_eq!(total.to_string(), "0x0002");
        assert_eq!(format!("{total:#06X}"), "0x0002");
    }

    #[test]
    fn protocol_version_defaults_to_current() {
        assert_eq!(ProtocolVersion::default().raw(), 14);
    }
}
