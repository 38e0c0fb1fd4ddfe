mod common;

use artwire_core::protocols::artnet::paging::paginate_tod;
use artwire_core::{Packet, TodData, Uid, encode_datagram, scan_capture_file};
use tempfile::TempDir;

use common::{artnet_frame, write_pcapng};

fn datagrams(template: &TodData, uids: &[Uid]) -> Vec<Vec<u8>> {
    paginate_tod(template, uids)
        .unwrap()
        .into_iter()
        .map(|block| encode_datagram(&Packet::from(block)))
        .collect()
}

#[test]
fn scan_reassembles_paged_tables_per_node() {
    let table: Vec<Uid> = (0..230).map(|id| Uid::new(0x7a70, 0x1000 + id)).collect();
    let node_a = TodData::builder().net(1).address(0x23).build().unwrap();
    let node_b = TodData::builder().port(2).address(0x01).build().unwrap();

    let mut frames = Vec::new();
    let mut ts_us = 1_000_000;
    for datagram in datagrams(&node_a, &table).into_iter().rev() {
        frames.push((ts_us, artnet_frame([10, 0, 0, 7], &datagram)));
        ts_us += 1_000_000;
    }
    for datagram in datagrams(&node_b, &[Uid::new(0x4c55, 1)]) {
        frames.push((ts_us, artnet_frame([10, 0, 0, 3], &datagram)));
        ts_us += 1_000_000;
    }
    let nak = node_b.to_builder().nak().build().unwrap();
    frames.push((
        ts_us,
        artnet_frame([10, 0, 0, 9], &encode_datagram(&Packet::from(nak))),
    ));

    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tod.pcapng");
    write_pcapng(&path, &frames);

    let report = scan_capture_file(&path).unwrap();
    let summary = report.capture_summary.as_ref().expect("capture summary");
    assert_eq!(summary.frames_total, 4);
    assert_eq!(summary.udp_datagrams, 4);
    assert_eq!(summary.artnet_packets, 4);
    assert_eq!(summary.tod_packets, 4);
    assert!(summary.time_start.is_some());
    assert_eq!(Some(&report.generated_at), summary.time_end.as_ref());
    assert!(report.issues.is_empty());

    let sources: Vec<&str> = report.nodes.iter().map(|n| n.source_ip.as_str()).collect();
    assert_eq!(sources, vec!["10.0.0.3", "10.0.0.7", "10.0.0.9"]);

    let b = &report.nodes[0];
    assert!(b.complete);
    assert_eq!(b.port, 2);
    assert_eq!(b.uids, vec!["4C55:00000001"]);

    let a = &report.nodes[1];
    assert!(a.complete);
    assert_eq!(a.tod_packets, 2);
    assert_eq!((a.net, a.sub_net, a.universe), (1, 2, 3));
    assert_eq!(a.uid_total, 230);
    let expected: Vec<String> = table.iter().map(Uid::to_string).collect();
    assert_eq!(a.uids, expected);

    let nak_node = &report.nodes[2];
    assert_eq!(nak_node.nak_packets, 1);
    assert!(!nak_node.complete);
}

#[test]
fn scan_reports_malformed_tod_packets() {
    let mut bad_command = encode_datagram(&Packet::from(TodData::builder().build().unwrap()));
    // Art-Net ID (8) + opcode (2) + command offset (12).
    bad_command[22] = 0x01;
    let mut short = encode_datagram(&Packet::from(TodData::builder().build().unwrap()));
    short.truncate(20);

    let frames = vec![
        (1_000_000, artnet_frame([10, 0, 0, 1], &bad_command)),
        (2_000_000, artnet_frame([10, 0, 0, 1], &short)),
        (3_000_000, artnet_frame([10, 0, 0, 1], &short)),
    ];
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("bad.pcapng");
    write_pcapng(&path, &frames);

    let report = scan_capture_file(&path).unwrap();
    assert!(report.nodes.is_empty());
    let issues: Vec<(&str, u64)> = report
        .issues
        .iter()
        .map(|issue| (issue.id.as_str(), issue.count))
        .collect();
    assert_eq!(
        issues,
        vec![("AW-ARTNET-INVALID-ENUM", 1), ("AW-ARTNET-TRUNCATED", 2)]
    );
    assert!(report.issues[1].examples[0].starts_with("10.0.0.1:6454"));
}

#[test]
fn scan_reports_blocks_over_the_packet_limit() {
    let mut oversized = encode_datagram(&Packet::from(TodData::builder().build().unwrap()));
    // Art-Net ID (8) + opcode (2) + uid count offset (17).
    oversized[27] = 201;
    oversized.extend(std::iter::repeat_n(0x11, 201 * 6));

    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("oversized.pcapng");
    write_pcapng(&path, &[(1_000_000, artnet_frame([10, 0, 0, 4], &oversized))]);

    let report = scan_capture_file(&path).unwrap();
    assert!(report.nodes.is_empty());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].id, "AW-ARTNET-TOO-MANY-UIDS");
    assert_eq!(report.issues[0].severity, "error");
}

#[test]
fn scan_report_is_deterministic() {
    let datagram = encode_datagram(&Packet::from(
        TodData::builder()
            .tod(vec![Uid::new(1, 1), Uid::new(1, 2)])
            .build()
            .unwrap(),
    ));
    let frames = vec![
        (1_000_000, artnet_frame([10, 0, 0, 2], &datagram)),
        (2_000_000, artnet_frame([10, 0, 0, 1], &datagram)),
    ];
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("stable.pcapng");
    write_pcapng(&path, &frames);

    let first = serde_json::to_string(&scan_capture_file(&path).unwrap()).unwrap();
    let second = serde_json::to_string(&scan_capture_file(&path).unwrap()).unwrap();
    assert_eq!(first, second);
}
