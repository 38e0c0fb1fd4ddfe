use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use super::error::AddressError;
use super::ipv4::Ipv4Address;
use super::ipv6::Ipv6Address;
use super::layout::{IPV4_LEN, IPV6_LEN};

/// An IPv4 or IPv6 address.
///
/// # Examples
/// ```
/// use artwire_core::address::NetworkAddress;
///
/// let addr: NetworkAddress = "192.168.1.20".parse().unwrap();
/// assert_eq!(addr.to_raw_bytes(), vec![192, 168, 1, 20]);
/// assert_eq!(addr.family(), "ipv4");
///
/// let v6 = NetworkAddress::from_raw_bytes(&[0u8; 16]).unwrap();
/// assert_eq!(v6.to_text(), "::");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetworkAddress {
    V4(Ipv4Address),
    V6(Ipv6Address),
}

impl NetworkAddress {
    /// Parse either family from presentation text.
    pub fn from_text(text: &str) -> Option<Self> {
        Ipv4Address::from_text(text)
            .map(Self::V4)
            .or_else(|| Ipv6Address::from_text(text).map(Self::V6))
    }

    pub fn to_text(&self) -> String {
        match self {
            Self::V4(addr) => addr.to_text(),
            Self::V6(addr) => addr.to_text(),
        }
    }

    /// Build an address from raw bytes, picking the family by length.
    ///
    /// Lengths other than 4 or 16 fail; the error names the family the input
    /// was closest to (IPv4 up to four bytes, IPv6 above).
    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        match bytes.len() {
            IPV4_LEN => Ipv4Address::from_raw_bytes(bytes).map(Self::V4),
            IPV6_LEN => Ipv6Address::from_raw_bytes(bytes).map(Self::V6),
            actual => Err(AddressError::InvalidLength {
                expected: if actual <= IPV4_LEN { IPV4_LEN } else { IPV6_LEN },
                actual,
            }),
        }
    }

    pub fn to_raw_bytes(&self) -> Vec<u8> {
        match self {
            Self::V4(addr) => addr.to_raw_bytes().to_vec(),
            Self::V6(addr) => addr.to_raw_bytes().to_vec(),
        }
    }

    pub fn raw_len(&self) -> usize {
        match self {
            Self::V4(_) => IPV4_LEN,
            Self::V6(_) => IPV6_LEN,
        }
    }

    /// Family label used in reports (`"ipv4"` or `"ipv6"`).
    pub fn family(&self) -> &'static str {
        match self {
            Self::V4(_) => "ipv4",
            Self::V6(_) => "ipv6",
        }
    }

    /// Render as `ip:port`, bracketing IPv6 addresses.
    pub fn endpoint(&self, port: u16) -> String {
        match self {
            Self::V4(addr) => format!("{}:{}", addr, port),
            Self::V6(addr) => format!("[{}]:{}", addr, port),
        }
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4(addr) => fmt::Display::fmt(addr, f),
            Self::V6(addr) => fmt::Display::fmt(addr, f),
        }
    }
}

impl FromStr for NetworkAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s).ok_or_else(|| AddressError::InvalidText {
            text: s.to_string(),
        })
    }
}

impl From<IpAddr> for NetworkAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(addr) => Self::V4(addr.into()),
            IpAddr::V6(addr) => Self::V6(addr.into()),
        }
    }
}

impl From<NetworkAddress> for IpAddr {
    fn from(addr: NetworkAddress) -> Self {
        match addr {
            NetworkAddress::V4(addr) => IpAddr::V4(addr.into()),
            NetworkAddress::V6(addr) => IpAddr::V6(addr.into()),
        }
    }
}

impl From<Ipv4Address> for NetworkAddress {
    fn from(addr: Ipv4Address) -> Self {
        Self::V4(addr)
    }
}

impl From<Ipv6Address> for NetworkAddress {
    fn from(addr: Ipv6Address) -> Self {
        Self::V6(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::NetworkAddress;
    use crate::address::AddressError;
    use std::collections::HashSet;
    use std::net::IpAddr;

    #[test]
    fn family_follows_raw_length() {
        let v4 = NetworkAddress::from_raw_bytes(&[10, 0, 0, 1]).unwrap();
        assert!(matches!(v4, NetworkAddress::V4(_)));
        assert_eq!(v4.raw_len(), 4);

        let v6 = NetworkAddress::from_raw_bytes(&[0xfe; 16]).unwrap();
        assert!(matches!(v6, NetworkAddress::V6(_)));
        assert_eq!(v6.raw_len(), 16);
    }

    #[test]
    fn odd_lengths_report_the_closest_family() {
        let short = NetworkAddress::from_raw_bytes(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            short,
            AddressError::InvalidLength {
                expected: 4,
                actual: 3
            }
        );
        let long = NetworkAddress::from_raw_bytes(&[0u8; 5]).unwrap_err();
        assert_eq!(
            long,
            AddressError::InvalidLength {
                expected: 16,
                actual: 5
            }
        );
    }

    #[test]
    fn hashing_uses_the_bit_pattern() {
        let mut seen = HashSet::new();
        seen.insert(NetworkAddress::from_text("fe80:0:0:0:0:0:0:1").unwrap());
        seen.insert(NetworkAddress::from_text("fe80::1").unwrap());
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn converts_to_and_from_std() {
        let ip: IpAddr = "2001:db8::2".parse().unwrap();
        let addr = NetworkAddress::from(ip);
        assert_eq!(IpAddr::from(addr), ip);
    }

    #[test]
    fn endpoint_brackets_ipv6() {
        let v4 = NetworkAddress::from_text("10.0.0.1").unwrap();
        let v6 = NetworkAddress::from_text("::1").unwrap();
        assert_eq!(v4.endpoint(6454), "10.0.0.1:6454");
        assert_eq!(v6.endpoint(6454), "[::1]:6454");
    }

    #[test]
    fn garbage_text_is_rejected_by_both_families() {
        assert_eq!(NetworkAddress::from_text("art-net"), None);
        assert!(matches!(
            "art-net".parse::<NetworkAddress>(),
            Err(AddressError::InvalidText { .. })
        ));
    }
}
