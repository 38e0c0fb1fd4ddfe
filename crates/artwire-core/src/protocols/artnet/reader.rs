use std::ops::Range;

use super::error::ArtNetError;
use super::layout;
use super::uid::Uid;

/// Bounds-checked access to an Art-Net buffer by absolute offset.
///
/// Every read reports the length it would have needed, so parsers can
/// surface a precise `TruncatedBuffer` without indexing bytes directly.
pub struct ArtNetReader<'a> {
    payload: &'a [u8],
}

impl<'a> ArtNetReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ArtNetError> {
        if self.payload.len() < needed {
            return Err(self.truncated(needed));
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ArtNetError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or_else(|| self.truncated(offset + 1))
    }

    pub fn read_u16_le(&self, range: Range<usize>) -> Result<u16, ArtNetError> {
        self.read_array::<2>(range.start).map(u16::from_le_bytes)
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, ArtNetError> {
        self.read_array::<2>(range.start).map(u16::from_be_bytes)
    }

    pub fn read_uid(&self, offset: usize) -> Result<Uid, ArtNetError> {
        self.read_array::<{ layout::UID_LEN }>(offset)
            .map(Uid::from_be_bytes)
    }

    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], ArtNetError> {
        let bytes = self.read_slice(offset..offset + N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], ArtNetError> {
        let end = range.end;
        self.payload
            .get(range)
            .ok_or_else(|| self.truncated(end))
    }

    /// Everything from `offset` to the end of the buffer.
    pub fn read_from(&self, offset: usize) -> Result<&'a [u8], ArtNetError> {
        self.payload
            .get(offset..)
            .ok_or_else(|| self.truncated(offset))
    }

    pub fn read_signature(&self) -> Result<&'a [u8], ArtNetError> {
        self.read_slice(0..layout::ARTNET_ID.len())
    }

    fn truncated(&self, needed: usize) -> ArtNetError {
        ArtNetError::TruncatedBuffer {
            needed,
            actual: self.payload.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArtNetReader;
    use crate::protocols::artnet::error::ArtNetError;

    #[test]
    fn u16_byte_orders() {
        let payload = [0x00, 0x81, 0x12, 0x34];
        let reader = ArtNetReader::new(&payload);
        assert_eq!(reader.read_u16_le(0..2).unwrap(), 0x8100);
        assert_eq!(reader.read_u16_be(2..4).unwrap(), 0x1234);
    }

    #[test]
    fn read_past_end_reports_needed_length() {
        let payload = [0u8; 3];
        let reader = ArtNetReader::new(&payload);
        assert_eq!(
            reader.read_u8(3).unwrap_err(),
            ArtNetError::TruncatedBuffer {
                needed: 4,
                actual: 3
            }
        );
        assert_eq!(
            reader.read_u16_be(2..4).unwrap_err(),
            ArtNetError::TruncatedBuffer {
                needed: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn uid_is_big_endian() {
        let payload = [0x01, 0x02, 0x03, 0x04, 0x05, 0xaa];
        let reader = ArtNetReader::new(&payload);
        assert_eq!(reader.read_uid(0).unwrap().raw(), 0x0102_0304_05aa);
    }

    #[test]
    fn read_from_end_is_empty() {
        let payload = [1u8, 2];
        let reader = ArtNetReader::new(&payload);
        assert!(reader.read_from(2).unwrap().is_empty());
        assert!(reader.read_from(3).is_err());
    }
}
