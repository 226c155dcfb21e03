//! `LIST` chunk: a typed group of padded sub-chunks.

use std::collections::BTreeMap;

use byteorder::{LittleEndian, WriteBytesExt};

use super::FieldReader;
use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// One entry of a list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubChunk {
    pub tag: ChunkTag,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl SubChunk {
    /// Creates a sub-chunk.
    pub fn new(tag: ChunkTag, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }

    /// The payload as text with trailing NULs and surrounding whitespace removed.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data)
            .trim_end_matches('\0')
            .trim()
            .to_string()
    }
}

/// Decoded `LIST`/`list` chunk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListChunk {
    /// List type, e.g. `INFO` or `adtl`.
    pub type_id: ChunkTag,
    pub subchunks: Vec<SubChunk>,
}

impl ListChunk {
    /// Creates an empty list of the given type.
    pub fn new(type_id: ChunkTag) -> Self {
        Self {
            type_id,
            subchunks: Vec::new(),
        }
    }

    /// Appends a sub-chunk.
    pub fn with_subchunk(mut self, tag: ChunkTag, data: impl Into<Vec<u8>>) -> Self {
        self.subchunks.push(SubChunk::new(tag, data));
        self
    }

    pub(crate) fn decode(tag: ChunkTag, payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(tag, payload);
        let type_id = r.tag("list type")?;

        let mut subchunks = Vec::new();
        while r.remaining() > 0 {
            let offset = r.position();
            let sub_tag = r.tag(&format!("sub-chunk header at offset {}", offset))?;
            let size = r.u32(&format!("size of '{}' sub-chunk", sub_tag))?;
            let data = r.bytes(size as usize, &format!("'{}' sub-chunk", sub_tag))?;
            subchunks.push(SubChunk::new(sub_tag, data));
            // The last pad byte is often missing; skipping clamps at the end.
            r.skip(size as usize % 2);
        }

        Ok(Self { type_id, subchunks })
    }

    /// Text entries keyed by sub-chunk tag; a repeated tag keeps its last value.
    pub fn text_entries(&self) -> BTreeMap<ChunkTag, String> {
        self.subchunks
            .iter()
            .map(|sub| (sub.tag, sub.text()))
            .collect()
    }

    /// Encodes the type id and padded sub-chunks.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_fields(&mut out)
            .expect("writing to Vec should not fail");
        out
    }

    fn write_fields(&self, out: &mut Vec<u8>) -> std::io::Result<()> {
        out.extend_from_slice(self.type_id.as_bytes());
        for sub in &self.subchunks {
            out.extend_from_slice(sub.tag.as_bytes());
            out.write_u32::<LittleEndian>(sub.data.len() as u32)?;
            out.extend_from_slice(&sub.data);
            if sub.data.len() % 2 == 1 {
                out.write_u8(0)?;
            }
        }
        Ok(())
    }
}
