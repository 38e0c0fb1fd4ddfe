use log::debug;

use super::error::ArtNetError;
use super::layout;
use super::opcode::OpCode;
use super::packet::ArtNetPacket;
use super::reader::ArtNetReader;
use super::types::{PortAddress, ProtocolVersion, TodCommand, UidTotal};
use super::uid::Uid;

/// ArtTodData: one block of a node's RDM table of devices.
///
/// Values are immutable once built; use [`TodData::to_builder`] to derive a
/// modified copy. `uid_count` is always the length of `tod`, and the UID
/// order is the discovery order reported by the node.
///
/// # Examples
/// ```
/// use artwire_core::protocols::artnet::tod::TodData;
/// use artwire_core::protocols::artnet::uid::Uid;
///
/// let tod = TodData::builder()
///     .port(2)
///     .tod(vec![Uid::new(0x7a70, 1), Uid::new(0x7a70, 2)])
///     .build()
///     .unwrap();
/// assert_eq!(tod.uid_count(), 2);
/// assert_eq!(tod.uid_total().get(), 2);
///
/// let nak = tod.to_builder().nak().build().unwrap();
/// assert_eq!(tod.uid_count(), 2);
/// assert_eq!(nak.uid_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TodData {
    protocol_version: ProtocolVersion,
    rdm_version: u8,
    port: u8,
    binding_index: u8,
    net: u8,
    command: TodCommand,
    address: u8,
    uid_total: UidTotal,
    block_count: u8,
    tod: Vec<Uid>,
}

impl TodData {
    pub fn builder() -> TodDataBuilder {
        TodDataBuilder::default()
    }

    pub fn to_builder(&self) -> TodDataBuilder {
        TodDataBuilder {
            protocol_version: self.protocol_version,
            rdm_version: self.rdm_version,
            port: self.port,
            binding_index: self.binding_index,
            net: self.net,
            command: self.command,
            address: self.address,
            uid_total: Some(self.uid_total),
            block_count: self.block_count,
            tod: self.tod.clone(),
        }
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn rdm_version(&self) -> u8 {
        self.rdm_version
    }

    /// Physical port (1-4 in Art-Net 4); not range checked.
    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn binding_index(&self) -> u8 {
        self.binding_index
    }

    pub fn net(&self) -> u8 {
        self.net
    }

    pub fn command(&self) -> TodCommand {
        self.command
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn port_address(&self) -> PortAddress {
        PortAddress::from_parts(self.net, self.address)
    }

    pub fn uid_total(&self) -> UidTotal {
        self.uid_total
    }

    pub fn block_count(&self) -> u8 {
        self.block_count
    }

    pub fn uid_count(&self) -> u8 {
        // Both decode and build cap the block at MAX_UIDS_PER_PACKET.
        self.tod.len() as u8
    }

    pub fn tod(&self) -> &[Uid] {
        &self.tod
    }

    pub fn encoded_len(&self) -> usize {
        layout::TOD_FIXED_LEN + self.tod.len() * layout::UID_LEN
    }
}

impl ArtNetPacket for TodData {
    const OP_CODE: OpCode = OpCode::TodData;

    fn encode_payload(&self) -> Vec<u8> {
        let mut payload = vec![0u8; self.encoded_len()];
        payload[layout::TOD_PROTOCOL_VERSION_RANGE]
            .copy_from_slice(&self.protocol_version.raw().to_be_bytes());
        payload[layout::TOD_RDM_VERSION_OFFSET] = self.rdm_version;
        payload[layout::TOD_PORT_OFFSET] = self.port;
        // TOD_RESERVED_RANGE stays zero.
        payload[layout::TOD_BINDING_INDEX_OFFSET] = self.binding_index;
        payload[layout::TOD_NET_OFFSET] = self.net;
        payload[layout::TOD_COMMAND_OFFSET] = self.command.raw();
        payload[layout::TOD_ADDRESS_OFFSET] = self.address;
        payload[layout::TOD_UID_TOTAL_RANGE].copy_from_slice(&self.uid_total.get().to_be_bytes());
        payload[layout::TOD_BLOCK_COUNT_OFFSET] = self.block_count;
        payload[layout::TOD_UID_COUNT_OFFSET] = self.uid_count();
        for (index, uid) in self.tod.iter().enumerate() {
            let start = layout::TOD_UIDS_OFFSET + index * layout::UID_LEN;
            payload[start..start + layout::UID_LEN].copy_from_slice(&uid.to_be_bytes());
        }
        payload
    }

    fn decode_payload(payload: &[u8]) -> Result<Self, ArtNetError> {
        let reader = ArtNetReader::new(payload);

        let protocol_version =
            ProtocolVersion::new(reader.read_u16_be(layout::TOD_PROTOCOL_VERSION_RANGE)?);
        let rdm_version = reader.read_u8(layout::TOD_RDM_VERSION_OFFSET)?;
        let port = reader.read_u8(layout::TOD_PORT_OFFSET)?;
        reader.read_slice(layout::TOD_RESERVED_RANGE)?;
        let binding_index = reader.read_u8(layout::TOD_BINDING_INDEX_OFFSET)?;
        let net = reader.read_u8(layout::TOD_NET_OFFSET)?;
        let command = TodCommand::try_from(reader.read_u8(layout::TOD_COMMAND_OFFSET)?)?;
        let address = reader.read_u8(layout::TOD_ADDRESS_OFFSET)?;
        let uid_total = UidTotal::new(reader.read_u16_be(layout::TOD_UID_TOTAL_RANGE)?);
        let block_count = reader.read_u8(layout::TOD_BLOCK_COUNT_OFFSET)?;
        let uid_count = usize::from(reader.read_u8(layout::TOD_UID_COUNT_OFFSET)?);
        if uid_count > layout::MAX_UIDS_PER_PACKET {
            return Err(ArtNetError::TooManyUids {
                count: uid_count,
                max: layout::MAX_UIDS_PER_PACKET,
            });
        }
        reader.require_len(layout::TOD_UIDS_OFFSET + uid_count * layout::UID_LEN)?;

        let tod = (0..uid_count)
            .map(|index| reader.read_uid(layout::TOD_UIDS_OFFSET + index * layout::UID_LEN))
            .collect::<Result<Vec<_>, _>>()?;

        let trailing = reader.len() - (layout::TOD_UIDS_OFFSET + uid_count * layout::UID_LEN);
        if trailing > 0 {
            debug!("ignoring {trailing} trailing bytes after {uid_count} UIDs");
        }

        Ok(TodData {
            protocol_version,
            rdm_version,
            port,
            binding_index,
            net,
            command,
            address,
            uid_total,
            block_count,
            tod,
        })
    }
}

/// Builder for [`TodData`].
///
/// Defaults: protocol version 14, RDM version 1, port 1, binding index 1,
/// Port-Address 0, `FullTod`, block 0, no UIDs. When no `uid_total` is set
/// it defaults to the number of UIDs in this block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodDataBuilder {
    protocol_version: ProtocolVersion,
    rdm_version: u8,
    port: u8,
    binding_index: u8,
    net: u8,
    command: TodCommand,
    address: u8,
    uid_total: Option<UidTotal>,
    block_count: u8,
    tod: Vec<Uid>,
}

impl Default for TodDataBuilder {
    fn default() -> Self {
        Self {
            protocol_version: ProtocolVersion::CURRENT,
            rdm_version: layout::RDM_VERSION_STANDARD,
            port: 1,
            binding_index: 1,
            net: 0,
            command: TodCommand::FullTod,
            address: 0,
            uid_total: None,
            block_count: 0,
            tod: Vec::new(),
        }
    }
}

impl TodDataBuilder {
    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.protocol_version = version;
        self
    }

    pub fn rdm_version(mut self, version: u8) -> Self {
        self.rdm_version = version;
        self
    }

    pub fn port(mut self, port: u8) -> Self {
        self.port = port;
        self
    }

    pub fn binding_index(mut self, index: u8) -> Self {
        self.binding_index = index;
        self
    }

    pub fn net(mut self, net: u8) -> Self {
        self.net = net;
        self
    }

    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set both `net` and `address` from a Port-Address.
    pub fn port_address(mut self, port_address: PortAddress) -> Self {
        self.net = port_address.net();
        self.address = port_address.low_byte();
        self
    }

    pub fn command(mut self, command: TodCommand) -> Self {
        self.command = command;
        self
    }

    /// Turn the block into a `TodNak` carrying no UIDs.
    pub fn nak(mut self) -> Self {
        self.command = TodCommand::TodNak;
        self.tod.clear();
        self.uid_total = Some(UidTotal::new(0));
        self.block_count = 0;
        self
    }

    pub fn uid_total(mut self, total: UidTotal) -> Self {
        self.uid_total = Some(total);
        self
    }

    pub fn block_count(mut self, block: u8) -> Self {
        self.block_count = block;
        self
    }

    pub fn tod(mut self, uids: Vec<Uid>) -> Self {
        self.tod = uids;
        self
    }

    pub fn push_uid(mut self, uid: Uid) -> Self {
        self.tod.push(uid);
        self
    }

    pub fn build(self) -> Result<TodData, ArtNetError> {
        if self.tod.len() > layout::MAX_UIDS_PER_PACKET {
            return Err(ArtNetError::TooManyUids {
                count: self.tod.len(),
                max: layout::MAX_UIDS_PER_PACKET,
            });
        }
        let uid_total = self
            .uid_total
            .unwrap_or(UidTotal::new(self.tod.len() as u16));
        Ok(TodData {
            protocol_version: self.protocol_version,
            rdm_version: self.rdm_version,
            port: self.port,
            binding_index: self.binding_index,
            net: self.net,
            command: self.command,
            address: self.address,
            uid_total,
            block_count: self.block_count,
            tod: self.tod,
        })
    }
}
