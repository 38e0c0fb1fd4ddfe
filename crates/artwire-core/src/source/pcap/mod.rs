//! PCAP/PCAPNG capture files.
//!
//! `CaptureFile` detects the format from the magic bytes, follows the
//! link type declared by the file (per interface for PCAPNG), and emits raw
//! frames for the scanner.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::CaptureFile;
