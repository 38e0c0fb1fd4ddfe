//! Offline scan of a capture for ArtTodData reports.
//!
//! Frames are sliced down to UDP, payloads carrying the Art-Net identifier
//! are decoded, and table-of-devices blocks are reassembled per node.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::artnet::{ArtNetError, Packet, layout, parse_datagram};
use crate::source::{CaptureFile, CapturedFrame, FrameSource, SourceError};
use crate::{CaptureSummary, DEFAULT_GENERATED_AT, ScanReport, make_stub_report};

mod issues;
mod nodes;
mod udp;

use issues::{IssueKind, IssueLog};
use nodes::{NodeKey, NodeState, add_tod_block, build_node_summaries};
use udp::parse_udp_datagram;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Scan a PCAP/PCAPNG file.
pub fn scan_capture_file(path: &Path) -> Result<ScanReport, ScanError> {
    let source = CaptureFile::open(path)?;
    let bytes = path.metadata()?.len();
    scan_source(&path.display().to_string(), bytes, source)
}

/// Scan frames from any source; `input_path` and `input_bytes` are copied
/// into the report as given.
pub fn scan_source<S: FrameSource>(
    input_path: &str,
    input_bytes: u64,
    mut source: S,
) -> Result<ScanReport, ScanError> {
    let mut summary = CaptureSummary::default();
    let mut first_ts = None;
    let mut last_ts = None;
    let mut nodes: BTreeMap<NodeKey, NodeState> = BTreeMap::new();
    let mut issues = IssueLog::default();

    while let Some(CapturedFrame { ts, linktype, data }) = source.next_frame()? {
        summary.frames_total += 1;
        update_ts_bounds(&mut first_ts, &mut last_ts, ts);

        let udp = match parse_udp_datagram(linktype, &data) {
            Ok(Some(udp)) => udp,
            Ok(None) => continue,
            Err(err) => {
                debug!("frame {}: {err}", summary.frames_total);
                issues.record(
                    IssueKind::MalformedFrame,
                    &format!("frame {}", summary.frames_total),
                    &err.to_string(),
                    ts,
                );
                continue;
            }
        };
        summary.udp_datagrams += 1;

        let packet = match parse_datagram(udp.payload) {
            Ok(None) => continue,
            Ok(Some(packet)) => packet,
            Err(err) => {
                summary.artnet_packets += 1;
                record_decode_error(&mut summary, &mut issues, &err, &udp, ts);
                continue;
            }
        };
        summary.artnet_packets += 1;
        if udp.destination_port != layout::ARTNET_PORT {
            debug!("Art-Net packet to non-standard port {}", udp.destination_port);
        }

        match packet {
            Packet::TodData(tod) => {
                summary.tod_packets += 1;
                add_tod_block(&mut nodes, udp.source, &tod, ts);
            }
        }
    }

    let mut report = make_stub_report(input_path, input_bytes);
    summary.time_start = ts_to_rfc3339(first_ts);
    summary.time_end = ts_to_rfc3339(last_ts);
    report.generated_at = summary
        .time_end
        .clone()
        .or_else(|| summary.time_start.clone())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.capture_summary = Some(summary);
    report.nodes = build_node_summaries(nodes);
    report.issues = issues.into_summaries();
    Ok(report)
}

fn record_decode_error(
    summary: &mut CaptureSummary,
    issues: &mut IssueLog,
    err: &ArtNetError,
    udp: &udp::UdpDatagram<'_>,
    ts: Option<f64>,
) {
    let context = udp.source.endpoint(udp.source_port);
    match IssueKind::from_artnet(err) {
        Some(kind) => {
            warn!(
                "{context} -> {}: {err}",
                udp.destination.endpoint(udp.destination_port)
            );
            issues.record(kind, &context, &err.to_string(), ts);
        }
        None => {
            debug!("{context}: {err}");
            summary.other_artnet_packets += 1;
        }
    }
}

pub(crate) fn update_ts_bounds(first: &mut Option<f64>, last: &mut Option<f64>, ts: Option<f64>) {
    let Some(ts) = ts else {
        return;
    };
    if first.is_none_or(|existing| ts < existing) {
        *first = Some(ts);
    }
    if last.is_none_or(|existing| ts > existing) {
        *last = Some(ts);
    }
}

pub(crate) fn ts_to_rfc3339(ts: Option<f64>) -> Option<String> {
    let ts = ts?;
    let nanos = (ts * 1_000_000_000.0) as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
