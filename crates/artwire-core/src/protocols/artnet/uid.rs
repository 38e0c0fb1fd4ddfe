use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::layout::UID_LEN;

/// 48-bit RDM device UID: 16-bit manufacturer id followed by a 32-bit
/// device id, big-endian on the wire.
///
/// # Examples
/// ```
/// use artwire_core::protocols::artnet::uid::Uid;
///
/// let uid: Uid = "0102:030405AA".parse().unwrap();
/// assert_eq!(uid.raw(), 0x0102_0304_05aa);
/// assert_eq!(uid.manufacturer_id(), 0x0102);
/// assert_eq!(uid.to_string(), "0102:030405AA");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid RDM UID {text:?}: expected MMMM:DDDDDDDD or 12 hex digits")]
pub struct ParseUidError {
    text: String,
}

impl Uid {
    pub const MAX: u64 = 0xffff_ffff_ffff;

    pub const fn new(manufacturer_id: u16, device_id: u32) -> Self {
        Self(((manufacturer_id as u64) << 32) | device_id as u64)
    }

    /// `None` when `raw` does not fit in 48 bits.
    pub const fn from_raw(raw: u64) -> Option<Self> {
        if raw > Self::MAX {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn manufacturer_id(self) -> u16 {
        (self.0 >> 32) as u16
    }

    pub const fn device_id(self) -> u32 {
        self.0 as u32
    }

    pub fn from_be_bytes(bytes: [u8; UID_LEN]) -> Self {
        let mut wide = [0u8; 8];
        wide[8 - UID_LEN..].copy_from_slice(&bytes);
        Self(u64::from_be_bytes(wide))
    }

    pub fn to_be_bytes(self) -> [u8; UID_LEN] {
        let wide = self.0.to_be_bytes();
        let mut out = [0u8; UID_LEN];
        out.copy_from_slice(&wide[8 - UID_LEN..]);
        out
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:08X}", self.manufacturer_id(), self.device_id())
    }
}

impl FromStr for Uid {
    type Err = ParseUidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseUidError {
            text: s.to_string(),
        };
        let trimmed = s.trim();
        let (manufacturer, device) = match trimmed.split_once(':') {
            Some((m, d)) if m.len() == 4 && d.len() == 8 => (m, d),
            Some(_) => return Err(err()),
            None => {
                let compact = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                    .unwrap_or(trimmed);
                if compact.len() != 12 || !compact.is_ascii() {
                    return Err(err());
                }
                compact.split_at(4)
            }
        };
        if !manufacturer
            .chars()
            .chain(device.chars())
            .all(|c| c.is_ascii_hexdigit())
        {
            return Err(err());
        }
        let manufacturer = u16::from_str_radix(manufacturer, 16).map_err(|_| err())?;
        let device = u32::from_str_radix(device, 16).map_err(|_| err())?;
        Ok(Uid::new(manufacturer, device))
    }
}
