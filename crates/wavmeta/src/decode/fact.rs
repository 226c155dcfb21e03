//! `fact` chunk.

use super::FieldReader;
use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// Decoded `fact` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FactChunk {
    /// Frames per channel, needed to size compressed data.
    pub sample_length: u32,
}

impl FactChunk {
    pub(crate) fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(ChunkTag::FACT, payload);
        Ok(Self {
            sample_length: r.u32("sample length")?,
        })
    }

    pub fn to_payload(&self) -> Vec<u8> {
        self.sample_length.to_le_bytes().to_vec()
    }
}
