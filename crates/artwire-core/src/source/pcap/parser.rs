use std::fs::File;
use std::path::Path;

use log::debug;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{Block, LegacyPcapReader, Linktype, PcapBlockOwned, PcapError, PcapNGReader};

use crate::source::{CapturedFrame, FrameSource, SourceError};

use super::error::PcapSourceError;
use super::layout;
use super::reader::{
    is_pcapng_magic, legacy_ts_to_seconds, linktype_for_interface, pcapng_ts_to_seconds,
    read_magic_and_rewind,
};

/// Frame source backed by a PCAP or PCAPNG file.
pub struct CaptureFile {
    format: CaptureFormat,
}

enum CaptureFormat {
    Legacy {
        reader: LegacyPcapReader<File>,
        linktype: Linktype,
    },
    Ng {
        reader: PcapNGReader<File>,
        linktypes: Vec<Linktype>,
    },
}

impl CaptureFile {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let format = detect_format(file)?;
        debug!("opened capture {}", path.display());
        Ok(Self { format })
    }
}

impl FrameSource for CaptureFile {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame>, SourceError> {
        let frame = match &mut self.format {
            CaptureFormat::Legacy { reader, linktype } => {
                next_block(reader, "pcap", |block| match block {
                    PcapBlockOwned::LegacyHeader(header) => {
                        *linktype = header.network;
                        None
                    }
                    PcapBlockOwned::Legacy(packet) => Some(CapturedFrame {
                        ts: Some(legacy_ts_to_seconds(packet.ts_sec, packet.ts_usec)),
                        linktype: *linktype,
                        data: packet.data.to_vec(),
                    }),
                    _ => None,
                })?
            }
            CaptureFormat::Ng { reader, linktypes } => {
                next_block(reader, "pcapng", |block| match block {
                    PcapBlockOwned::NG(Block::SectionHeader(_)) => {
                        // Interface ids restart with every section.
                        linktypes.clear();
                        None
                    }
                    PcapBlockOwned::NG(Block::InterfaceDescription(intf)) => {
                        linktypes.push(intf.linktype);
                        None
                    }
                    PcapBlockOwned::NG(Block::EnhancedPacket(packet)) => {
                        let captured = (packet.caplen as usize).min(packet.data.len());
                        Some(CapturedFrame {
                            ts: Some(pcapng_ts_to_seconds(packet.ts_high, packet.ts_low)),
                            linktype: linktype_for_interface(linktypes, packet.if_id),
                            data: packet.data[..captured].to_vec(),
                        })
                    }
                    _ => None,
                })?
            }
        };
        Ok(frame)
    }
}

fn detect_format(mut file: File) -> Result<CaptureFormat, PcapSourceError> {
    let magic = read_magic_and_rewind(&mut file)?;

    if is_pcapng_magic(&magic) {
        let reader = PcapNGReader::new(layout::PCAP_READER_BUFFER_SIZE, file).map_err(|e| {
            PcapSourceError::Pcap {
                context: "pcapng reader init",
                message: e.to_string(),
            }
        })?;
        Ok(CaptureFormat::Ng {
            reader,
            linktypes: Vec::new(),
        })
    } else {
        let reader = LegacyPcapReader::new(layout::PCAP_READER_BUFFER_SIZE, file).map_err(|e| {
            PcapSourceError::Pcap {
                context: "pcap reader init",
                message: e.to_string(),
            }
        })?;
        Ok(CaptureFormat::Legacy {
            reader,
            linktype: Linktype::ETHERNET,
        })
    }
}

/// Pull blocks until `on_block` turns one into a frame or the file ends.
fn next_block<R, F>(
    reader: &mut R,
    context: &'static str,
    mut on_block: F,
) -> Result<Option<CapturedFrame>, PcapSourceError>
where
    R: PcapReaderIterator,
    F: FnMut(PcapBlockOwned<'_>) -> Option<CapturedFrame>,
{
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                let frame = on_block(block);
                reader.consume(offset);
                if frame.is_some() {
                    return Ok(frame);
                }
            }
            Err(PcapError::Eof) => return Ok(None),
            Err(PcapError::Incomplete(_)) => {
                reader.refill().map_err(|e| PcapSourceError::Pcap {
                    context,
                    message: e.to_string(),
                })?;
            }
            Err(e) => {
                return Err(PcapSourceError::Pcap {
                    context,
                    message: e.to_string(),
                });
            }
        }
    }
}
