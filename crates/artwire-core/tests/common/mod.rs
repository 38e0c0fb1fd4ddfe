#![allow(dead_code)]

use std::fs;
use std::path::Path;

use artwire_core::protocols::artnet::layout::ARTNET_PORT;
use etherparse::PacketBuilder;

const LINKTYPE_ETHERNET: u16 = 1;

/// Captured frame: timestamp in microseconds and link-layer bytes.
pub type Frame = (u64, Vec<u8>);

/// Ethernet/IPv4/UDP frame carrying `payload`.
pub fn build_ipv4_udp_frame(
    src_ip: [u8; 4],
    dst_ip: [u8; 4],
    src_port: u16,
    dst_port: u16,
    payload: &[u8],
) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2([0x02, 0, 0, 0, 0, 0x01], [0xff; 6])
        .ipv4(src_ip, dst_ip, 64)
        .udp(src_port, dst_port);
    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload).expect("build frame");
    frame
}

/// Art-Net datagram sent from `src_ip` to the directed broadcast address.
pub fn artnet_frame(src_ip: [u8; 4], datagram: &[u8]) -> Vec<u8> {
    build_ipv4_udp_frame(src_ip, [10, 255, 255, 255], ARTNET_PORT, ARTNET_PORT, datagram)
}

/// Big-endian PCAPNG writer with one Ethernet interface.
struct PcapngWriter {
    bytes: Vec<u8>,
}

impl PcapngWriter {
    const SECTION_HEADER: u32 = 0x0A0D_0D0A;
    const INTERFACE_DESCRIPTION: u32 = 1;
    const ENHANCED_PACKET: u32 = 6;

    fn new() -> Self {
        let mut writer = Self { bytes: Vec::new() };
        let mut shb = Vec::new();
        shb.extend_from_slice(&0x1A2B_3C4Du32.to_be_bytes());
        shb.extend_from_slice(&1u16.to_be_bytes());
        shb.extend_from_slice(&0u16.to_be_bytes());
        shb.extend_from_slice(&(-1i64).to_be_bytes());
        writer.block(Self::SECTION_HEADER, &shb);

        let mut idb = Vec::new();
        idb.extend_from_slice(&LINKTYPE_ETHERNET.to_be_bytes());
        idb.extend_from_slice(&0u16.to_be_bytes());
        idb.extend_from_slice(&65535u32.to_be_bytes());
        writer.block(Self::INTERFACE_DESCRIPTION, &idb);
        writer
    }

    fn packet(&mut self, ts_us: u64, data: &[u8]) {
        let mut epb = Vec::new();
        epb.extend_from_slice(&0u32.to_be_bytes());
        epb.extend_from_slice(&((ts_us >> 32) as u32).to_be_bytes());
        epb.extend_from_slice(&(ts_us as u32).to_be_bytes());
        epb.extend_from_slice(&(data.len() as u32).to_be_bytes());
        epb.extend_from_slice(&(data.len() as u32).to_be_bytes());
        epb.extend_from_slice(data);
        epb.resize(epb.len().next_multiple_of(4), 0);
        self.block(Self::ENHANCED_PACKET, &epb);
    }

    fn block(&mut self, block_type: u32, body: &[u8]) {
        let total_len = (body.len() + 12) as u32;
        self.bytes.extend_from_slice(&block_type.to_be_bytes());
        self.bytes.extend_from_slice(&total_len.to_be_bytes());
        self.bytes.extend_from_slice(body);
        self.bytes.extend_from_slice(&total_len.to_be_bytes());
    }
}

pub fn write_pcapng(path: &Path, frames: &[Frame]) {
    let mut writer = PcapngWriter::new();
    for (ts_us, data) in frames {
        writer.packet(*ts_us, data);
    }
    fs::write(path, writer.bytes).expect("write pcapng");
}

/// Little-endian legacy pcap with microsecond timestamps.
pub fn write_legacy_pcap(path: &Path, frames: &[Frame]) {
    let mut output = Vec::new();
    output.extend_from_slice(&0xa1b2_c3d4u32.to_le_bytes());
    output.extend_from_slice(&2u16.to_le_bytes());
    output.extend_from_slice(&4u16.to_le_bytes());
    for field in [0u32, 0, 65535, u32::from(LINKTYPE_ETHERNET)] {
        output.extend_from_slice(&field.to_le_bytes());
    }
    for (ts_us, data) in frames {
        let len = data.len() as u32;
        let secs = (ts_us / 1_000_000) as u32;
        let micros = (ts_us % 1_000_000) as u32;
        for field in [secs, micros, len, len] {
            output.extend_from_slice(&field.to_le_bytes());
        }
        output.extend_from_slice(data);
    }
    fs::write(path, output).expect("write pcap");
}
