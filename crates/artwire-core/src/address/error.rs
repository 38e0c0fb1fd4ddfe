use thiserror::Error;

/// Errors returned when building an address from raw bytes or text.
///
/// # Examples
/// ```
/// use artwire_core::address::{AddressError, Ipv4Address};
///
/// let err = Ipv4Address::from_raw_bytes(&[10, 0, 0, 1, 7]).unwrap_err();
/// assert_eq!(err, AddressError::InvalidLength { expected: 4, actual: 5 });
/// assert!(err.to_string().contains("invalid address length"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("invalid address length: need {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid address text: {text:?}")]
    InvalidText { text: String },
}
