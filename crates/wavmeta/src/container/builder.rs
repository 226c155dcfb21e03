//! Builder for assembling a container in memory.

use crate::chunk::Chunk;
use crate::decode::{CueChunk, FormatChunk, ListChunk, SampleChunk};
use crate::error::WavResult;
use crate::tag::ChunkTag;

use super::WavFile;

/// Collects chunks in arrival order and builds a [`WavFile`].
///
/// ```
/// use wavmeta::{FormatChunk, LoopPoint, SampleChunk, WavBuilder};
///
/// let wav = WavBuilder::new()
///     .format(&FormatChunk::pcm(1, 44100, 16))
///     .data(vec![0u8; 8])
///     .sample(&SampleChunk {
///         midi_unity_note: 60,
///         loops: vec![LoopPoint::forward(0, 0, 3)],
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(wav.root_note().unwrap(), Some(60));
/// assert_eq!(wav.frame_count().unwrap(), 4);
/// ```
#[derive(Debug, Default)]
pub struct WavBuilder {
    chunks: Vec<(ChunkTag, Vec<u8>)>,
}

impl WavBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk with a raw payload.
    pub fn chunk(mut self, tag: ChunkTag, payload: impl Into<Vec<u8>>) -> Self {
        self.chunks.push((tag, payload.into()));
        self
    }

    /// Appends a `fmt ` chunk.
    pub fn format(self, format: &FormatChunk) -> Self {
        self.chunk(ChunkTag::FMT, format.to_payload())
    }

    /// Appends a `data` chunk.
    pub fn data(self, data: impl Into<Vec<u8>>) -> Self {
        self.chunk(ChunkTag::DATA, data)
    }

    /// Appends a `smpl` chunk.
    pub fn sample(self, smpl: &SampleChunk) -> Self {
        self.chunk(ChunkTag::SMPL, smpl.to_payload())
    }

    /// Appends a `cue ` chunk.
    pub fn cue(self, cue: &CueChunk) -> Self {
        self.chunk(ChunkTag::CUE, cue.to_payload())
    }

    /// Appends a `LIST` chunk.
    pub fn list(self, list: &ListChunk) -> Self {
        self.chunk(ChunkTag::LIST, list.to_payload())
    }

    /// Builds the container, applying duplicate and presence rules.
    pub fn build(self) -> WavResult<WavFile> {
        let chunks = self
            .chunks
            .into_iter()
            .map(|(tag, payload)| Chunk::new(tag, payload))
            .collect::<WavResult<Vec<_>>>()?;
        WavFile::from_chunks(chunks)
    }
}
