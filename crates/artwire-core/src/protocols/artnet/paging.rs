//! Splitting a table of devices into ArtTodData blocks and joining it back.
//!
//! A node reports at most 200 UIDs per packet. Larger tables are sent as
//! consecutive blocks sharing one `uid_total`, with `block_count` starting
//! at zero. Discovery order is kept across blocks.

use std::collections::BTreeMap;

use log::debug;

use super::error::ArtNetError;
use super::layout;
use super::tod::TodData;
use super::types::{TodCommand, UidTotal};
use super::uid::Uid;

/// Split `uids` into blocks that copy every other field from `template`.
///
/// An empty table still produces one (empty) block so the node's state is
/// reported.
///
/// # Examples
/// ```
/// use artwire_core::protocols::artnet::paging::paginate_tod;
/// use artwire_core::protocols::artnet::tod::TodData;
/// use artwire_core::protocols::artnet::uid::Uid;
///
/// let uids: Vec<Uid> = (0..450).map(|id| Uid::new(0x7a70, id)).collect();
/// let blocks = paginate_tod(&TodData::builder().build()?, &uids)?;
/// assert_eq!(blocks.len(), 3);
/// assert_eq!(blocks[2].block_count(), 2);
/// assert_eq!(blocks[2].uid_count(), 50);
/// assert!(blocks.iter().all(|b| b.uid_total().get() == 450));
/// # Ok::<(), artwire_core::protocols::artnet::error::ArtNetError>(())
/// ```
pub fn paginate_tod(template: &TodData, uids: &[Uid]) -> Result<Vec<TodData>, ArtNetError> {
    // MAX_TOD_UIDS is below u16::MAX, so the total always fits.
    if uids.len() > layout::MAX_TOD_UIDS {
        return Err(ArtNetError::TooManyUids {
            count: uids.len(),
            max: layout::MAX_TOD_UIDS,
        });
    }
    let uid_total = UidTotal::new(uids.len() as u16);

    if uids.is_empty() {
        let block = template
            .to_builder()
            .command(TodCommand::FullTod)
            .uid_total(uid_total)
            .block_count(0)
            .tod(Vec::new())
            .build()?;
        return Ok(vec![block]);
    }

    uids.chunks(layout::MAX_UIDS_PER_PACKET)
        .enumerate()
        .map(|(block, chunk)| {
            template
                .to_builder()
                .command(TodCommand::FullTod)
                .uid_total(uid_total)
                .block_count(block as u8)
                .tod(chunk.to_vec())
                .build()
        })
        .collect()
}

/// State of a node's table after feeding one block to [`TodAssembler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyProgress {
    Incomplete { received: usize, expected: usize },
    Complete(Vec<Uid>),
    /// A `TodNak` was received; any partial table was discarded.
    Nak,
}

/// Reassembles the blocks one node sends into its full table.
///
/// Blocks may arrive out of order or be repeated; they are keyed by
/// `block_count`. A change of `uid_total` means the node restarted its
/// report, so earlier blocks are dropped.
#[derive(Debug, Clone, Default)]
pub struct TodAssembler {
    uid_total: Option<UidTotal>,
    blocks: BTreeMap<u8, Vec<Uid>>,
}

impl TodAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: &TodData) -> AssemblyProgress {
        if block.command() == TodCommand::TodNak {
            self.reset();
            return AssemblyProgress::Nak;
        }

        if self.uid_total != Some(block.uid_total()) {
            if self.uid_total.is_some() {
                debug!(
                    "uid_total changed from {:?} to {}, restarting table",
                    self.uid_total,
                    block.uid_total()
                );
            }
            self.blocks.clear();
            self.uid_total = Some(block.uid_total());
        }
        self.blocks.insert(block.block_count(), block.tod().to_vec());

        let received = self.received();
        let expected = usize::from(block.uid_total().get());
        if received >= expected {
            AssemblyProgress::Complete(self.blocks.values().flatten().copied().collect())
        } else {
            AssemblyProgress::Incomplete { received, expected }
        }
    }

    pub fn received(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }

    pub fn reset(&mut self) {
        self.uid_total = None;
        self.blocks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{AssemblyProgress, TodAssembler, paginate_tod};
    use crate::protocols::artnet::error::ArtNetError;
    use crate::protocols::artnet::layout;
    use crate::protocols::artnet::tod::TodData;
    use crate::protocols::artnet::uid::Uid;

    fn uids(count: u32) -> Vec<Uid> {
        (0..count).map(|id| Uid::new(0x4c55, id)).collect()
    }

    fn template() -> TodData {
        TodData::builder().port(3).net(2).address(0x15).build().unwrap()
    }

    #[test]
    fn blocks_keep_template_fields_and_count_up() {
        let blocks = paginate_tod(&template(), &uids(401)).unwrap();
        assert_eq!(blocks.len(), 3);
        for (index, block) in blocks.iter().enumerate() {
            assert_eq!(block.block_count() as usize, index);
            assert_eq!(block.port(), 3);
            assert_eq!(block.port_address().raw(), 0x0215);
            assert_eq!(block.uid_total().get(), 401);
        }
        assert_eq!(blocks[0].uid_count(), 200);
        assert_eq!(blocks[2].uid_count(), 1);
    }

    #[test]
    fn empty_table_is_one_empty_block() {
        let blocks = paginate_tod(&template(), &[]).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].uid_count(), 0);
        assert_eq!(blocks[0].uid_total().get(), 0);
    }

    #[test]
    fn table_larger_than_block_counter_is_rejected() {
        let too_many = uids(layout::MAX_TOD_UIDS as u32 + 1);
        assert!(matches!(
            paginate_tod(&template(), &too_many),
            Err(ArtNetError::TooManyUids { .. })
        ));
    }

    #[test]
    fn assembler_joins_out_of_order_blocks() {
        let table = uids(450);
        let blocks = paginate_tod(&template(), &table).unwrap();
        let mut assembler = TodAssembler::new();

        assert_eq!(
            assembler.push(&blocks[2]),
            AssemblyProgress::Incomplete {
                received: 50,
                expected: 450
            }
        );
        assert!(matches!(
            assembler.push(&blocks[0]),
            AssemblyProgress::Incomplete { received: 250, .. }
        ));
        // Repeats do not double count.
        assert!(matches!(
            assembler.push(&blocks[0]),
            AssemblyProgress::Incomplete { received: 250, .. }
        ));
        assert_eq!(assembler.push(&blocks[1]), AssemblyProgress::Complete(table));
    }

    #[test]
    fn changed_total_restarts_assembly() {
        let mut assembler = TodAssembler::new();
        let old = paginate_tod(&template(), &uids(300)).unwrap();
        assembler.push(&old[0]);

        let new_table = uids(2);
        let new = paginate_tod(&template(), &new_table).unwrap();
        assert_eq!(assembler.push(&new[0]), AssemblyProgress::Complete(new_table));
        assert_eq!(assembler.received(), 2);
    }

    #[test]
    fn nak_discards_partial_table() {
        let mut assembler = TodAssembler::new();
        let blocks = paginate_tod(&template(), &uids(300)).unwrap();
        assembler.push(&blocks[0]);
        let nak = template().to_builder().nak().build().unwrap();
        assert_eq!(assembler.push(&nak), AssemblyProgress::Nak);
        assert_eq!(assembler.received(), 0);
    }

    #[test]
    fn empty_table_completes_immediately() {
        let mut assembler = TodAssembler::new();
        let blocks = paginate_tod(&template(), &[]).unwrap();
        assert_eq!(assembler.push(&blocks[0]), AssemblyProgress::Complete(Vec::new()));
    }
}
