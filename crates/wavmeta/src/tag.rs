//! Four-character chunk identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{WavError, WavResult};

/// A four-byte chunk identifier (FourCC).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    /// Outer container tag.
    pub const RIFF: ChunkTag = ChunkTag(*b"RIFF");
    /// WAVE form type.
    pub const WAVE: ChunkTag = ChunkTag(*b"WAVE");
    /// Format descriptor.
    pub const FMT: ChunkTag = ChunkTag(*b"fmt ");
    /// Sample data.
    pub const DATA: ChunkTag = ChunkTag(*b"data");
    /// Sampler loop metadata.
    pub const SMPL: ChunkTag = ChunkTag(*b"smpl");
    /// Cue points.
    pub const CUE: ChunkTag = ChunkTag(*b"cue ");
    /// Sample length for compressed formats.
    pub const FACT: ChunkTag = ChunkTag(*b"fact");
    /// Instrument parameters.
    pub const INST: ChunkTag = ChunkTag(*b"inst");
    /// Playlist.
    pub const PLST: ChunkTag = ChunkTag(*b"plst");
    /// Wave list.
    pub const WAVL: ChunkTag = ChunkTag(*b"wavl");
    /// Grouped sub-chunks.
    pub const LIST: ChunkTag = ChunkTag(*b"LIST");
    /// Grouped sub-chunks, lower-case spelling.
    pub const LIST_LOWER: ChunkTag = ChunkTag(*b"list");
    /// List type for descriptive text metadata.
    pub const INFO: ChunkTag = ChunkTag(*b"INFO");

    /// Tags of which only the first occurrence is kept.
    pub const SINGULAR: [ChunkTag; 7] = [
        Self::FMT,
        Self::DATA,
        Self::SMPL,
        Self::CUE,
        Self::FACT,
        Self::INST,
        Self::PLST,
    ];

    /// Top-level tags with a defined meaning in WAVE files.
    pub const KNOWN: [ChunkTag; 10] = [
        Self::CUE,
        Self::DATA,
        Self::FACT,
        Self::FMT,
        Self::INST,
        Self::LIST,
        Self::LIST_LOWER,
        Self::PLST,
        Self::SMPL,
        Self::WAVL,
    ];

    /// Creates a tag from exactly four bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Creates a tag from one to four bytes, right-padding with spaces.
    pub fn new(name: &[u8]) -> WavResult<Self> {
        if name.is_empty() || name.len() > 4 {
            return Err(WavError::InvalidTag { len: name.len() });
        }
        let mut bytes = [b' '; 4];
        bytes[..name.len()].copy_from_slice(name);
        Ok(Self(bytes))
    }

    /// Returns the raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Returns true for tags whose duplicates are dropped.
    pub fn is_singular(&self) -> bool {
        Self::SINGULAR.contains(self)
    }

    /// Returns true for tags listed in [`ChunkTag::KNOWN`].
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(self)
    }

    /// Returns true for `LIST` and `list`.
    pub fn is_list(&self) -> bool {
        *self == Self::LIST || *self == Self::LIST_LOWER
    }
}

impl From<[u8; 4]> for ChunkTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&str> for ChunkTag {
    type Error = WavError;

    fn try_from(name: &str) -> WavResult<Self> {
        Self::new(name.as_bytes())
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag(\"{}\")", self)
    }
}

impl Serialize for ChunkTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
