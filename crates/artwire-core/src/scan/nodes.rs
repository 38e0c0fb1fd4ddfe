use std::collections::BTreeMap;

use log::debug;

use crate::NodeSummary;
use crate::address::NetworkAddress;
use crate::protocols::artnet::paging::{AssemblyProgress, TodAssembler};
use crate::protocols::artnet::{PortAddress, TodData, Uid};

use super::{ts_to_rfc3339, update_ts_bounds};

/// Identity of one reporting node output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct NodeKey {
    pub source: NetworkAddress,
    pub binding_index: u8,
    pub port_address: PortAddress,
}

#[derive(Debug, Default)]
pub(crate) struct NodeState {
    assembler: TodAssembler,
    table: Option<Vec<Uid>>,
    port: u8,
    rdm_version: u8,
    uid_total: u16,
    tod_packets: u64,
    nak_packets: u64,
    first_ts: Option<f64>,
    last_ts: Option<f64>,
}

pub(crate) fn add_tod_block(
    nodes: &mut BTreeMap<NodeKey, NodeState>,
    source: NetworkAddress,
    tod: &TodData,
    ts: Option<f64>,
) {
    let key = NodeKey {
        source,
        binding_index: tod.binding_index(),
        port_address: tod.port_address(),
    };
    let state = nodes.entry(key).or_default();
    state.tod_packets += 1;
    state.port = tod.port();
    state.rdm_version = tod.rdm_version();
    state.uid_total = tod.uid_total().get();
    update_ts_bounds(&mut state.first_ts, &mut state.last_ts, ts);

    match state.assembler.push(tod) {
        AssemblyProgress::Complete(table) => {
            debug!("{} port {}: table of {} uids", source, key.port_address, table.len());
            state.table = Some(table);
        }
        AssemblyProgress::Nak => {
            state.nak_packets += 1;
            state.table = None;
        }
        AssemblyProgress::Incomplete { .. } => {}
    }
}

pub(crate) fn build_node_summaries(nodes: BTreeMap<NodeKey, NodeState>) -> Vec<NodeSummary> {
    nodes
        .into_iter()
        .map(|(key, state)| NodeSummary {
            source_ip: key.source.to_text(),
            binding_index: key.binding_index,
            port: state.port,
            port_address: key.port_address.raw(),
            net: key.port_address.net(),
            sub_net: key.port_address.sub_net(),
            universe: key.port_address.universe(),
            rdm_version: state.rdm_version,
            tod_packets: state.tod_packets,
            nak_packets: state.nak_packets,
            uid_total: state.uid_total,
            complete: state.table.is_some(),
            uids: state
                .table
                .unwrap_or_default()
                .iter()
                .map(Uid::to_string)
                .collect(),
            first_seen: ts_to_rfc3339(state.first_ts),
            last_seen: ts_to_rfc3339(state.last_ts),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{NodeKey, add_tod_block, build_node_summaries};
    use crate::address::NetworkAddress;
    use crate::protocols::artnet::paging::paginate_tod;
    use crate::protocols::artnet::{TodData, Uid};
    use std::collections::BTreeMap;

    fn addr(text: &str) -> NetworkAddress {
        NetworkAddress::from_text(text).unwrap()
    }

    #[test]
    fn blocks_from_one_node_join_into_one_table() {
        let table: Vec<Uid> = (0..250).map(|id| Uid::new(0x7a70, id)).collect();
        let template = TodData::builder().net(1).address(0x23).build().unwrap();
        let mut nodes = BTreeMap::new();
        for block in paginate_tod(&template, &table).unwrap() {
            add_tod_block(&mut nodes, addr("10.0.0.5"), &block, Some(1.0));
        }

        let summaries = build_node_summaries(nodes);
        assert_eq!(summaries.len(), 1);
        let node = &summaries[0];
        assert!(node.complete);
        assert_eq!(node.tod_packets, 2);
        assert_eq!(node.uids.len(), 250);
        assert_eq!(node.uids[0], "7A70:00000000");
        assert_eq!(node.port_address, 0x0123);
        assert_eq!((node.net, node.sub_net, node.universe), (1, 2, 3));
        assert_eq!(node.first_seen.as_deref(), Some("1970-01-01T00:00:01Z"));
    }

    #[test]
    fn partial_table_is_incomplete() {
        let table: Vec<Uid> = (0..250).map(|id| Uid::new(1, id)).collect();
        let blocks = paginate_tod(&TodData::builder().build().unwrap(), &table).unwrap();
        let mut nodes = BTreeMap::new();
        add_tod_block(&mut nodes, addr("10.0.0.5"), &blocks[1], None);

        let summaries = build_node_summaries(nodes);
        assert!(!summaries[0].complete);
        assert!(summaries[0].uids.is_empty());
        assert_eq!(summaries[0].uid_total, 250);
        assert!(summaries[0].first_seen.is_none());
    }

    #[test]
    fn nak_clears_the_table() {
        let tod = TodData::builder().tod(vec![Uid::new(1, 1)]).build().unwrap();
        let mut nodes = BTreeMap::new();
        add_tod_block(&mut nodes, addr("10.0.0.5"), &tod, None);
        add_tod_block(&mut nodes, addr("10.0.0.5"), &tod.to_builder().nak().build().unwrap(), None);

        let node = &build_node_summaries(nodes)[0];
        assert_eq!(node.nak_packets, 1);
        assert!(!node.complete);
    }

    #[test]
    fn nodes_are_ordered_by_source_then_bind_then_port_address() {
        let mut nodes = BTreeMap::new();
        let high = TodData::builder().address(9).build().unwrap();
        let low = TodData::builder().address(1).build().unwrap();
        add_tod_block(&mut nodes, addr("10.0.0.10"), &low, None);
        add_tod_block(&mut nodes, addr("10.0.0.9"), &high, None);
        add_tod_block(&mut nodes, addr("10.0.0.9"), &low, None);

        let keys: Vec<(String, u16)> = build_node_summaries(nodes)
            .into_iter()
            .map(|node| (node.source_ip, node.port_address))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("10.0.0.9".to_string(), 1),
                ("10.0.0.9".to_string(), 9),
                ("10.0.0.10".to_string(), 1),
            ]
        );
    }

    #[test]
    fn key_distinguishes_bind_index() {
        let a = NodeKey {
            source: addr("10.0.0.1"),
            binding_index: 1,
            port_address: TodData::builder().build().unwrap().port_address(),
        };
        let b = NodeKey {
            binding_index: 2,
            ..a
        };
        assert!(a < b);
    }
}
