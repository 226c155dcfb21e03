//! Typed decoding of chunk payloads.
//!
//! Dispatch is a closed mapping from tag to decoder: the set of chunk types
//! with a defined layout is fixed by the WAVE format. Unrecognized tags decode
//! to [`ChunkBody::Opaque`] and keep their payload untouched.
//!
//! All layouts are little-endian fixed-size records:
//!
//! | Tag | Layout |
//! |-----|--------|
//! | `fmt ` | format tag, channels, rate, byte rate, block align, \[bits per sample if PCM\] |
//! | `smpl` | 9 × i32 header, then `loop_count` × 6 × i32 |
//! | `LIST` / `list` | type id, then padded sub-chunks |
//! | `cue ` | u32 count, then `count` × 24-byte records |
//! | `fact` | u32 sample length |
//! | `inst` | 7 single-byte fields |

mod cue;
mod fact;
mod format;
mod instrument;
mod list;
mod sample;


use byteorder::{ByteOrder, LittleEndian};

pub use cue::{CueChunk, CuePoint};
pub use fact::FactChunk;
pub use format::{compression_name, FormatChunk, WAVE_FORMAT_PCM};
pub use instrument::InstrumentChunk;
pub use list::{ListChunk, SubChunk};
pub use sample::{LoopPoint, LoopType, SampleChunk};

use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// Typed fields of a decoded chunk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkBody {
    /// `fmt ` chunk.
    Format(FormatChunk),
    /// `smpl` chunk.
    Sample(SampleChunk),
    /// `LIST` or `list` chunk.
    List(ListChunk),
    /// `cue ` chunk.
    Cue(CueChunk),
    /// `fact` chunk.
    Fact(FactChunk),
    /// `inst` chunk.
    Instrument(InstrumentChunk),
    /// Any other chunk; the payload is kept as raw bytes only.
    Opaque,
}

/// Decodes `payload` according to the layout registered for `tag`.
pub fn decode(tag: ChunkTag, payload: &[u8]) -> Result<ChunkBody, DecodeError> {
    let body = match tag {
        ChunkTag::FMT => ChunkBody::Format(FormatChunk::decode(payload)?),
        ChunkTag::SMPL => ChunkBody::Sample(SampleChunk::decode(payload)?),
        ChunkTag::LIST | ChunkTag::LIST_LOWER => ChunkBody::List(ListChunk::decode(tag, payload)?),
        ChunkTag::CUE => ChunkBody::Cue(CueChunk::decode(payload)?),
        ChunkTag::FACT => ChunkBody::Fact(FactChunk::decode(payload)?),
        ChunkTag::INST => ChunkBody::Instrument(InstrumentChunk::decode(payload)?),
        _ => ChunkBody::Opaque,
    };
    Ok(body)
}

/// Bounds-checked little-endian reader over a chunk payload.
///
/// Every short read becomes a [`DecodeError::FieldDecode`] naming the chunk.
#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    tag: ChunkTag,
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(tag: ChunkTag, data: &'a [u8]) -> Self {
        Self { tag, data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Fails unless at least `len` bytes remain.
    pub(crate) fn need(&self, len: u64, what: &str) -> Result<(), DecodeError> {
        if len > self.remaining() as u64 {
            return Err(DecodeError::field(
                self.tag,
                format!(
                    "{} needs {} bytes at offset {}, {} remain",
                    what,
                    len,
                    self.pos,
                    self.remaining()
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8], DecodeError> {
        self.need(len as u64, what)?;
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos..];
        self.pos = self.data.len();
        out
    }

    pub(crate) fn skip(&mut self, len: usize) {
        self.pos = (self.pos + len).min(self.data.len());
    }

    pub(crate) fn u8(&mut self, what: &str) -> Result<u8, DecodeError> {
        Ok(self.bytes(1, what)?[0])
    }

    pub(crate) fn i8(&mut self, what: &str) -> Result<i8, DecodeError> {
        Ok(self.u8(what)? as i8)
    }

    pub(crate) fn u16(&mut self, what: &str) -> Result<u16, DecodeError> {
        Ok(LittleEndian::read_u16(self.bytes(2, what)?))
    }

    pub(crate) fn u32(&mut self, what: &str) -> Result<u32, DecodeError> {
        Ok(LittleEndian::read_u32(self.bytes(4, what)?))
    }

    pub(crate) fn i32(&mut self, what: &str) -> Result<i32, DecodeError> {
        Ok(LittleEndian::read_i32(self.bytes(4, what)?))
    }

    pub(crate) fn tag(&mut self, what: &str) -> Result<ChunkTag, DecodeError> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.bytes(4, what)?);
        Ok(ChunkTag::from_bytes(bytes))
    }
}
