//! Sequential, bounds-aware reader over a seekable byte source.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{WavError, WavResult};
use crate::tag::ChunkTag;

/// Forward-only cursor that knows how many bytes remain in its region.
///
/// Every read is checked against the region end before touching the source,
/// so a corrupt size field can never trigger an oversized allocation.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    pos: u64,
    end: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wraps `inner`, starting at its current position and ending at its end.
    pub fn new(mut inner: R) -> WavResult<Self> {
        let pos = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        Ok(Self { inner, pos, end })
    }

    /// Current absolute offset.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Absolute offset where the readable region ends.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Bytes left before the region end.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.pos)
    }

    /// Shrinks the readable region so it ends at `end` at the latest.
    pub fn limit_to(&mut self, end: u64) {
        self.end = self.end.min(end);
    }

    fn ensure(&self, needed: u64, what: &str) -> WavResult<()> {
        let available = self.remaining();
        if needed > available {
            return Err(WavError::StreamTruncated {
                what: what.to_string(),
                offset: self.pos,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Reads a chunk tag, or `None` when fewer than four bytes remain.
    pub fn read_tag(&mut self) -> WavResult<Option<ChunkTag>> {
        if self.remaining() < 4 {
            return Ok(None);
        }
        let mut bytes = [0u8; 4];
        self.inner.read_exact(&mut bytes)?;
        self.pos += 4;
        Ok(Some(ChunkTag::from_bytes(bytes)))
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self, what: &str) -> WavResult<u32> {
        self.ensure(4, what)?;
        let value = self.inner.read_u32::<LittleEndian>()?;
        self.pos += 4;
        Ok(value)
    }

    /// Reads exactly `len` bytes into a new buffer.
    pub fn read_vec(&mut self, len: u32, what: &str) -> WavResult<Vec<u8>> {
        self.ensure(u64::from(len), what)?;
        let mut buf = vec![0u8; len as usize];
        self.inner.read_exact(&mut buf)?;
        self.pos += u64::from(len);
        Ok(buf)
    }

    /// Skips up to `count` bytes and returns how many were skipped.
    pub fn skip(&mut self, count: u64) -> WavResult<u64> {
        let skipped = count.min(self.remaining());
        if skipped > 0 {
            self.inner.seek(SeekFrom::Current(skipped as i64))?;
            self.pos += skipped;
        }
        Ok(skipped)
    }
}
