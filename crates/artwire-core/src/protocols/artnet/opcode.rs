use std::fmt;

use super::error::ArtNetError;

/// Art-Net packet type, carried little-endian after the identifier.
///
/// The registry is closed: raw values outside this list never become a
/// variant. Naming an opcode here does not make it decodable; only the
/// entries of the dispatch table in [`packet`](super::packet) are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum OpCode {
    Poll = 0x2000,
    PollReply = 0x2100,
    DiagData = 0x2300,
    Command = 0x2400,
    DataRequest = 0x2700,
    DataReply = 0x2800,
    Dmx = 0x5000,
    Nzs = 0x5100,
    Sync = 0x5200,
    Address = 0x6000,
    Input = 0x7000,
    TodRequest = 0x8000,
    TodData = 0x8100,
    TodControl = 0x8200,
    Rdm = 0x8300,
    RdmSub = 0x8400,
    TimeCode = 0x9700,
    TimeSync = 0x9800,
    Trigger = 0x9900,
    Directory = 0x9a00,
    DirectoryReply = 0x9b00,
    FirmwareMaster = 0xf200,
    FirmwareReply = 0xf300,
    IpProg = 0xf800,
    IpProgReply = 0xf900,
}

impl OpCode {
    pub const ALL: [OpCode; 25] = [
        OpCode::Poll,
        OpCode::PollReply,
        OpCode::DiagData,
        OpCode::Command,
        OpCode::DataRequest,
        OpCode::DataReply,
        OpCode::Dmx,
        OpCode::Nzs,
        OpCode::Sync,
        OpCode::Address,
        OpCode::Input,
        OpCode::TodRequest,
        OpCode::TodData,
        OpCode::TodControl,
        OpCode::Rdm,
        OpCode::RdmSub,
        OpCode::TimeCode,
        OpCode::TimeSync,
        OpCode::Trigger,
        OpCode::Directory,
        OpCode::DirectoryReply,
        OpCode::FirmwareMaster,
        OpCode::FirmwareReply,
        OpCode::IpProg,
        OpCode::IpProgReply,
    ];

    pub const fn raw(self) -> u16 {
        self as u16
    }

    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.raw() == raw)
    }

    /// Name as used by the Art-Net standard (e.g. `OpTodData`).
    pub const fn name(self) -> &'static str {
        match self {
            OpCode::Poll => "OpPoll",
            OpCode::PollReply => "OpPollReply",
            OpCode::DiagData => "OpDiagData",
            OpCode::Command => "OpCommand",
            OpCode::DataRequest => "OpDataRequest",
            OpCode::DataReply => "OpDataReply",
            OpCode::Dmx => "OpDmx",
            OpCode::Nzs => "OpNzs",
            OpCode::Sync => "OpSync",
            OpCode::Address => "OpAddress",
            OpCode::Input => "OpInput",
            OpCode::TodRequest => "OpTodRequest",
            OpCode::TodData => "OpTodData",
            OpCode::TodControl => "OpTodControl",
            OpCode::Rdm => "OpRdm",
            OpCode::RdmSub => "OpRdmSub",
            OpCode::TimeCode => "OpTimeCode",
            OpCode::TimeSync => "OpTimeSync",
            OpCode::Trigger => "OpTrigger",
            OpCode::Directory => "OpDirectory",
            OpCode::DirectoryReply => "OpDirectoryReply",
            OpCode::FirmwareMaster => "OpFirmwareMaster",
            OpCode::FirmwareReply => "OpFirmwareReply",
            OpCode::IpProg => "OpIpProg",
            OpCode::IpProgReply => "OpIpProgReply",
        }
    }
}

impl TryFrom<u16> for OpCode {
    type Error = ArtNetError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(ArtNetError::UnknownOpCode { raw })
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04x})", self.name(), self.raw())
    }
}
