//! Art-Net protocol codec.
//!
//! An Art-Net UDP payload is the `Art-Net\0` identifier, a little-endian
//! opcode and a type-specific payload. `packet` owns the opcode envelope and
//! the read-only dispatch table; each packet type implements `ArtNetPacket`
//! for its payload. Only ArtTodData (`OpTodData`) is decodable; every other
//! opcode is rejected as unknown.
//!
//! Payload fields are big-endian unless the protocol splits a value into
//! separate bytes (the Port-Address travels as `net` + `address`). Byte
//! offsets live in `layout`, bounded reads in `reader`, and the identifier
//! check in `parser`. Reserved bytes are never validated and always encoded
//! as zero.

pub mod error;
pub mod layout;
pub mod opcode;
pub mod packet;
pub mod paging;
pub mod parser;
pub mod reader;
pub mod tod;
pub mod types;
pub mod uid;

pub use error::ArtNetError;
pub use opcode::OpCode;
pub use packet::{ArtNetPacket, Packet};
pub use parser::{encode_datagram, parse_datagram};
pub use tod::{TodData, TodDataBuilder};
pub use types::{PortAddress, ProtocolVersion, TodCommand, UidTotal};
pub use uid::Uid;
