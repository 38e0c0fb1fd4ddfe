use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use super::error::AddressError;
use super::layout::IPV6_LEN;

/// IPv6 address with text and raw-byte views.
///
/// Text is rendered in the compressed colon-hex form, so `"2001:0db8::0001"`
/// parses to the same value that renders back as `"2001:db8::1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv6Address(Ipv6Addr);

impl Ipv6Address {
    pub const fn new(addr: Ipv6Addr) -> Self {
        Self(addr)
    }

    pub fn from_text(text: &str) -> Option<Self> {
        text.parse::<Ipv6Addr>().ok().map(Self)
    }

    pub fn to_text(&self) -> String {
        self.0.to_string()
    }

    /// Build an address from exactly sixteen network-order bytes.
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let octets = <[u8; IPV6_LEN]>::try_from(bytes).map_err(|_| {
            AddressError::InvalidLength {
                expected: IPV6_LEN,
                actual: bytes.len(),
            }
        })?;
        Ok(Self(Ipv6Addr::from(octets)))
    }

    pub fn to_raw_bytes(&self) -> [u8; IPV6_LEN] {
        self.0.octets()
    }

    pub const fn addr(&self) -> Ipv6Addr {
        self.0
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Ipv6Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s).ok_or_else(|| AddressError::InvalidText {
            text: s.to_string(),
        })
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self(addr)
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Self {
        addr.0
    }
}
