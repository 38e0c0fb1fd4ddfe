//! Network address values.
//!
//! Each address family wraps a single canonical bit pattern and exposes three
//! views of it: the structured `std::net` value, presentation text, and the
//! fixed-length network-order bytes embedded in packets. Character-level text
//! parsing is delegated to `std::net`; this module adds the fixed-length byte
//! contract and the family dispatch on top.
//!
//! Equality and hashing follow the bit pattern, so two spellings of the same
//! address compare equal once parsed.

pub mod error;
pub mod layout;

mod ipv4;
mod ipv6;
mod network;

pub use error::AddressError;
pub use ipv4::Ipv4Address;
pub use ipv6::Ipv6Address;
pub use network::NetworkAddress;
