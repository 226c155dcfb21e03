//! `cue ` chunk: marked positions in the sample data.

use byteorder::{LittleEndian, WriteBytesExt};

use super::FieldReader;
use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// Size of one cue point record.
pub const CUE_RECORD_SIZE: usize = 24;

/// One cue point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CuePoint {
    pub id: i32,
    /// Sample position in play order.
    pub position: i32,
    /// Chunk holding the cue, normally `data`.
    pub data_chunk_id: ChunkTag,
    pub chunk_start: i32,
    pub block_start: i32,
    pub sample_offset: i32,
}

impl CuePoint {
    /// Creates a cue at `sample_offset` within the `data` chunk.
    pub fn in_data(id: i32, sample_offset: i32) -> Self {
        Self {
            id,
            position: sample_offset,
            data_chunk_id: ChunkTag::DATA,
            chunk_start: 0,
            block_start: 0,
            sample_offset,
        }
    }
}

/// Decoded `cue ` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CueChunk {
    pub points: Vec<CuePoint>,
}

impl CueChunk {
    pub(crate) fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(ChunkTag::CUE, payload);
        let count = r.u32("cue point count")?;
        r.need(
            u64::from(count) * CUE_RECORD_SIZE as u64,
            &format!("{} cue point records", count),
        )?;

        let points = (0..count)
            .map(|_| {
                Ok(CuePoint {
                    id: r.i32("cue id")?,
                    position: r.i32("position")?,
                    data_chunk_id: r.tag("data chunk id")?,
                    chunk_start: r.i32("chunk start")?,
                    block_start: r.i32("block start")?,
                    sample_offset: r.i32("sample offset")?,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(Self { points })
    }

    /// Number of cue points.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Encodes the count and cue point records.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.points.len() * CUE_RECORD_SIZE);
        self.write_fields(&mut out)
            .expect("writing to Vec should not fail");
        out
    }

    fn write_fields(&self, out: &mut Vec<u8>) -> std::io::Result<()> {
        out.write_u32::<LittleEndian>(self.points.len() as u32)?;
        for cue in &self.points {
            out.write_i32::<LittleEndian>(cue.id)?;
            out.write_i32::<LittleEndian>(cue.position)?;
            out.extend_from_slice(cue.data_chunk_id.as_bytes());
            out.write_i32::<LittleEndian>(cue.chunk_start)?;
            out.write_i32::<LittleEndian>(cue.block_start)?;
            out.write_i32::<LittleEndian>(cue.sample_offset)?;
        }
        Ok(())
    }
}
