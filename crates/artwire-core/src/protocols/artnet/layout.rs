use std::ops::Range;

pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";
pub const ARTNET_PORT: u16 = 6454;

/// Protocol revision written by default (Art-Net 4).
pub const PROTOCOL_VERSION: u16 = 14;

// Envelope offsets, relative to the end of the identifier.
pub const OP_CODE_RANGE: Range<usize> = 0..2;
pub const ENVELOPE_PAYLOAD_OFFSET: usize = 2;

// OpTodData payload offsets, relative to the end of the opcode.
pub const TOD_PROTOCOL_VERSION_RANGE: Range<usize> = 0..2;
pub const TOD_RDM_VERSION_OFFSET: usize = 2;
pub const TOD_PORT_OFFSET: usize = 3;
pub const TOD_RESERVED_RANGE: Range<usize> = 4..10;
pub const TOD_BINDING_INDEX_OFFSET: usize = 10;
pub const TOD_NET_OFFSET: usize = 11;
pub const TOD_COMMAND_OFFSET: usize = 12;
pub const TOD_ADDRESS_OFFSET: usize = 13;
pub const TOD_UID_TOTAL_RANGE: Range<usize> = 14..16;
pub const TOD_BLOCK_COUNT_OFFSET: usize = 16;
pub const TOD_UID_COUNT_OFFSET: usize = 17;
pub const TOD_UIDS_OFFSET: usize = 18;

pub const TOD_FIXED_LEN: usize = TOD_UIDS_OFFSET;
pub const UID_LEN: usize = 6;
pub const MAX_UIDS_PER_PACKET: usize = 200;
/// Largest table the 8-bit block counter can page.
pub const MAX_TOD_UIDS: usize = MAX_UIDS_PER_PACKET * 256;

pub const RDM_VERSION_STANDARD: u8 = 0x01;
pub const NET_MASK: u8 = 0x7f;
