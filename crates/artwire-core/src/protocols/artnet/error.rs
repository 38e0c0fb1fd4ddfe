use thiserror::Error;

/// Errors returned by Art-Net decoding and packet construction.
///
/// # Examples
/// ```
/// use artwire_core::protocols::artnet::error::ArtNetError;
///
/// let err = ArtNetError::UnknownOpCode { raw: 0x5000 };
/// assert!(err.to_string().contains("0x5000"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtNetError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TruncatedBuffer { needed: usize, actual: usize },
    #[error("unknown opcode: 0x{raw:04x}")]
    UnknownOpCode { raw: u16 },
    #[error("invalid {field} value: 0x{raw:02x}")]
    InvalidEnumValue { field: &'static str, raw: u8 },
    #[error("too many UIDs: {count} exceeds the limit of {max}")]
    TooManyUids { count: usize, max: usize },
}
