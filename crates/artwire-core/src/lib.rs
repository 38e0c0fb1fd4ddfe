//! artwire core library: Art-Net table-of-devices codec and capture scanner.
//!
//! The codec decodes and encodes Art-Net envelopes (little-endian opcode +
//! payload) through a closed, compile-time dispatch table; ArtTodData is the
//! decodable packet type. Network addresses carry interchangeable text,
//! structured and raw-byte views. All codec functions are pure and
//! synchronous; file I/O lives in `source` and aggregation in `scan`.
//!
//! Invariants:
//! - `decode(encode(packet)) == packet` for every packet value.
//! - Reserved bytes are encoded as zero and never validated on decode.
//! - UID order is preserved end to end; tables are never sorted.
//! - Scan reports are deterministic and stable across runs.
//!
//! # Examples
//! ```
//! use artwire_core::{Packet, TodData, Uid, encode_datagram, parse_datagram};
//!
//! let tod = TodData::builder()
//!     .tod(vec![Uid::new(0x0102, 0x0304_05aa), Uid::new(0x0102, 0x0304_05bb)])
//!     .build()?;
//! let datagram = encode_datagram(&Packet::from(tod.clone()));
//! assert_eq!(parse_datagram(&datagram)?, Some(Packet::TodData(tod)));
//! # Ok::<(), artwire_core::ArtNetError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod address;
pub mod protocols;
mod scan;
mod source;

pub use address::{AddressError, Ipv4Address, Ipv6Address, NetworkAddress};
pub use protocols::artnet::{
    ArtNetError, ArtNetPacket, OpCode, Packet, PortAddress, ProtocolVersion, TodCommand, TodData,
    TodDataBuilder, Uid, UidTotal, encode_datagram, parse_datagram,
};
pub use protocols::common::hex::{format_hex, parse_hex};
pub use scan::{ScanError, scan_capture_file, scan_source};
pub use source::{CaptureFile, CapturedFrame, FrameSource, MemorySource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used when no capture time is available.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Result of scanning a capture for table-of-devices reports.
///
/// # Examples
/// ```
/// use artwire_core::make_stub_report;
///
/// let report = make_stub_report("capture.pcapng", 123);
/// assert_eq!(report.report_version, artwire_core::REPORT_VERSION);
/// assert!(report.nodes.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp: last capture time, or the epoch when unknown.
    pub generated_at: String,
    pub input: InputInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_summary: Option<CaptureSummary>,
    /// One entry per reporting node, sorted by source then Port-Address.
    pub nodes: Vec<NodeSummary>,
    /// Decode problems, sorted by ID.
    pub issues: Vec<IssueSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the scanner.
    pub path: String,
    pub bytes: u64,
}

/// Frame and packet counters for a capture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureSummary {
    pub frames_total: u64,
    pub udp_datagrams: u64,
    /// Datagrams carrying the Art-Net identifier.
    pub artnet_packets: u64,
    /// Art-Net packets decoded as ArtTodData.
    pub tod_packets: u64,
    /// Art-Net packets with an opcode this codec does not decode.
    pub other_artnet_packets: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_end: Option<String>,
}

/// Table of devices reported by one node output.
///
/// A node is identified by its source address, bind index and
/// Port-Address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSummary {
    pub source_ip: String,
    pub binding_index: u8,
    pub port: u8,
    /// 15-bit Port-Address.
    pub port_address: u16,
    pub net: u8,
    pub sub_net: u8,
    pub universe: u8,
    pub rdm_version: u8,
    pub tod_packets: u64,
    pub nak_packets: u64,
    /// `uid_total` of the most recent block.
    pub uid_total: u16,
    /// Whether `uids` holds a fully reassembled table.
    pub complete: bool,
    /// Last complete table in discovery order, `MMMM:DDDDDDDD` form.
    pub uids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

/// Aggregated decode problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueSummary {
    /// Stable identifier (e.g. `AW-ARTNET-TRUNCATED`).
    pub id: String,
    /// `error` or `warning`.
    pub severity: String,
    pub message: String,
    pub count: u64,
    /// At most three examples, formatted as `ip:port @ ts: detail`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// JSON view of a decoded packet.
///
/// # Examples
/// ```
/// use artwire_core::{Packet, PacketSummary, TodData};
///
/// let packet = Packet::from(TodData::builder().port(2).build().unwrap());
/// let summary = PacketSummary::from_packet(&packet);
/// assert_eq!(summary.op_code, "OpTodData");
/// assert_eq!(summary.tod.unwrap().port, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketSummary {
    pub op_code: String,
    pub op_code_raw: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tod: Option<TodSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodSummary {
    pub protocol_version: u16,
    pub rdm_version: u8,
    pub port: u8,
    pub binding_index: u8,
    pub net: u8,
    pub command: String,
    pub address: u8,
    pub port_address: u16,
    pub uid_total: u16,
    pub block_count: u8,
    pub uid_count: u8,
    pub uids: Vec<String>,
}

/// JSON view of the three forms of an address.
///
/// # Examples
/// ```
/// use artwire_core::{AddressSummary, NetworkAddress};
///
/// let addr = NetworkAddress::from_text("10.0.0.1").unwrap();
/// let summary = AddressSummary::from_address(&addr);
/// assert_eq!(summary.bytes, "0a000001");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressSummary {
    pub family: String,
    pub text: String,
    /// Raw network-order bytes as lower-case hex.
    pub bytes: String,
}

impl PacketSummary {
    pub fn from_packet(packet: &Packet) -> Self {
        let op_code = packet.op_code();
        let tod = match packet {
            Packet::TodData(tod) => Some(TodSummary::from_tod(tod)),
        };
        Self {
            op_code: op_code.name().to_string(),
            op_code_raw: op_code.raw(),
            tod,
        }
    }
}

impl TodSummary {
    pub fn from_tod(tod: &TodData) -> Self {
        Self {
            protocol_version: tod.protocol_version().raw(),
            rdm_version: tod.rdm_version(),
            port: tod.port(),
            binding_index: tod.binding_index(),
            net: tod.net(),
            command: tod.command().name().to_string(),
            address: tod.address(),
            port_address: tod.port_address().raw(),
            uid_total: tod.uid_total().get(),
            block_count: tod.block_count(),
            uid_count: tod.uid_count(),
            uids: tod.tod().iter().map(Uid::to_string).collect(),
        }
    }
}

impl AddressSummary {
    pub fn from_address(address: &NetworkAddress) -> Self {
        Self {
            family: address.family().to_string(),
            text: address.to_text(),
            bytes: format_hex(&address.to_raw_bytes()),
        }
    }
}

/// Build a report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> ScanReport {
    ScanReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "artwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        capture_summary: None,
        nodes: vec![],
        issues: vec![],
    }
}
