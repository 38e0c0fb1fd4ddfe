use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::error::AddressError;
use super::layout::IPV4_LEN;

/// IPv4 address with text and raw-byte views.
///
/// # Examples
/// ```
/// use artwire_core::address::Ipv4Address;
///
/// let addr = Ipv4Address::from_raw_bytes(&[10, 0, 0, 1]).unwrap();
/// assert_eq!(addr.to_text(), "10.0.0.1");
/// assert_eq!(Ipv4Address::from_text("10.0.0.1"), Some(addr));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    pub const fn new(addr: Ipv4Addr) -> Self {
        Self(addr)
    }

    /// Parse dotted-quad text. Returns `None` for anything that is not an
    /// IPv4 address.
    pub fn from_text(text: &str) -> Option<Self> {
        text.parse::<Ipv4Addr>().ok().map(Self)
    }

    pub fn to_text(&self) -> String {
        self.0.to_string()
    }

    /// Build an address from exactly four network-order bytes.
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        let octets = <[u8; IPV4_LEN]>::try_from(bytes).map_err(|_| {
            AddressError::InvalidLength {
                expected: IPV4_LEN,
                actual: bytes.len(),
            }
        })?;
        Ok(Self(Ipv4Addr::from(octets)))
    }

    pub fn to_raw_bytes(&self) -> [u8; IPV4_LEN] {
        self.0.octets()
    }

    pub const fn addr(&self) -> Ipv4Addr {
        self.0
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Ipv4Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s).ok_or_else(|| AddressError::InvalidText {
            text: s.to_string(),
        })
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr)
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        addr.0
    }
}
