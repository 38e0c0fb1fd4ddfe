mod pcap;

pub use pcap::CaptureFile;

use std::collections::VecDeque;

use pcap_parser::Linktype;
use thiserror::Error;

/// One link-layer frame read from a capture.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Capture time in seconds since the Unix epoch, when recorded.
    pub ts: Option<f64>,
    pub linktype: Linktype,
    pub data: Vec<u8>,
}

/// Anything that yields captured frames in capture order.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCAP parse error: {0}")]
    Pcap(String),
}

impl From<pcap::error::PcapSourceError> for SourceError {
    fn from(value: pcap::error::PcapSourceError) -> Self {
        match value {
            pcap::error::PcapSourceError::Io(err) => SourceError::Io(err),
            pcap::error::PcapSourceError::Pcap { context, message } => {
                SourceError::Pcap(format!("{context}: {message}"))
            }
        }
    }
}

/// Frames held in memory, e.g. assembled by a caller that already owns the
/// packets.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: VecDeque<CapturedFrame>,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = CapturedFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError> {
        Ok(self.frames.pop_front())
    }
}
