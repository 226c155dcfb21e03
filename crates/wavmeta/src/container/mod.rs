//! The WAVE container model.
//!
//! A [`WavFile`] is built in one sequential pass over a byte source:
//!
//! 1. The outer `RIFF` header is checked for the `WAVE` form type.
//! 2. Chunks are read until the end of the RIFF region. For singular tags
//!    (`fmt `, `data`, `smpl`, `cue `, `fact`, `inst`, `plst`) only the
//!    first occurrence is reachable through the typed accessors; later ones
//!    produce a warning but stay in the arrival list. Other tags accumulate.
//! 3. The `fmt ` and `data` chunks must both be present.
//!
//! Chunks are stored once, in arrival order. The canonical order used for
//! iteration and serialization (`fmt `, then `INFO` lists, then everything
//! else in arrival order) is derived from that list on demand. Extra `fmt `
//! chunks are left out of the canonical order.

mod builder;
mod options;


use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

pub use builder::WavBuilder;
pub use options::ReadOptions;

use crate::chunk::{Chunk, ScannedChunk};
use crate::cursor::ByteCursor;
use crate::decode::{
    ChunkBody, CueChunk, CuePoint, FactChunk, FormatChunk, InstrumentChunk, LoopPoint,
    SampleChunk,
};
use crate::error::{DecodeError, ParseWarning, WarningCode, WavError, WavResult};
use crate::tag::ChunkTag;

/// Iterator over fixed-size frames of the `data` chunk.
pub type Frames<'a> = std::slice::ChunksExact<'a, u8>;

/// A parsed RIFF/WAVE container.
#[derive(Debug, Clone)]
pub struct WavFile {
    /// Every chunk in arrival order, duplicates of singular tags included.
    chunks: Vec<Chunk>,
    /// Indices into `chunks` per tag, in arrival order. Singular tags hold
    /// only their first occurrence.
    index: HashMap<ChunkTag, Vec<usize>>,
    warnings: Vec<ParseWarning>,
}

impl WavFile {
    /// Opens and parses the file at `path`.
    ///
    /// The file handle is closed before this returns, on success or error.
    pub fn open(path: impl AsRef<Path>) -> WavResult<Self> {
        Self::open_with_options(path, &ReadOptions::default())
    }

    /// Opens and parses the file at `path` with explicit options.
    pub fn open_with_options(path: impl AsRef<Path>, options: &ReadOptions) -> WavResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening WAVE file");
        let file = File::open(path)?;
        Self::from_reader_with_options(BufReader::new(file), options)
    }

    /// Parses a container from an in-memory buffer.
    pub fn from_bytes(bytes: &[u8]) -> WavResult<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Parses a container from a seekable source.
    pub fn from_reader<R: Read + Seek>(source: R) -> WavResult<Self> {
        Self::from_reader_with_options(source, &ReadOptions::default())
    }

    /// Parses a container from a seekable source with explicit options.
    pub fn from_reader_with_options<R: Read + Seek>(
        source: R,
        options: &ReadOptions,
    ) -> WavResult<Self> {
        let mut cursor = ByteCursor::new(source)?;
        let start = cursor.position();
        let riff_size = read_riff_header(&mut cursor)?;

        let mut file = Self::empty();

        let declared_end = start + 8 + u64::from(riff_size);
        if declared_end > cursor.end() {
            file.warn(ParseWarning::new(
                WarningCode::RiffSizeMismatch,
                format!(
                    "RIFF size {} extends {} bytes past the end of the stream",
                    riff_size,
                    declared_end - cursor.end()
                ),
                Some(start),
            ));
        }
        cursor.limit_to(declared_end);

        while let Some(scanned) = Chunk::read(&mut cursor, options.max_chunk_size)? {
            file.insert_scanned(scanned);
        }

        file.validate()?;

        if options.eager_decode {
            for chunk in &file.chunks {
                if let Err(err) = chunk.body() {
                    tracing::warn!(tag = %chunk.tag(), error = %err, "chunk failed to decode");
                }
            }
        }

        tracing::debug!(
            chunks = file.chunks.len(),
            warnings = file.warnings.len(),
            "parsed WAVE container"
        );
        Ok(file)
    }

    /// Assembles a container from chunks in arrival order, applying the same
    /// duplicate and presence rules as parsing.
    pub fn from_chunks(chunks: impl IntoIterator<Item = Chunk>) -> WavResult<Self> {
        let mut file = Self::empty();
        for chunk in chunks {
            file.insert(chunk);
        }
        file.validate()?;
        Ok(file)
    }

    fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            index: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!(code = %warning.code, offset = ?warning.offset, "{}", warning.message);
        self.warnings.push(warning);
    }

    fn insert_scanned(&mut self, scanned: ScannedChunk) {
        let ScannedChunk { chunk, missing_pad } = scanned;
        if missing_pad {
            self.warn(ParseWarning::new(
                WarningCode::MissingPadByte,
                format!(
                    "'{}' chunk has odd size {} but the stream ends before its pad byte",
                    chunk.tag(),
                    chunk.size()
                ),
                chunk.offset(),
            ));
        }
        self.insert(chunk);
    }

    fn insert(&mut self, chunk: Chunk) {
        let tag = chunk.tag();
        let offset = chunk.offset();

        if tag == ChunkTag::DATA && !self.has_chunk(ChunkTag::FMT) {
            self.warn(ParseWarning::new(
                WarningCode::DataBeforeFormat,
                "encountered 'data' chunk before 'fmt ' chunk",
                offset,
            ));
        }

        if tag.is_singular() && self.has_chunk(tag) {
            self.warn(ParseWarning::new(
                WarningCode::DuplicateChunkIgnored,
                format!("ignoring extra '{}' chunk", tag),
                offset,
            ));
        } else {
            self.index.entry(tag).or_default().push(self.chunks.len());
        }
        self.chunks.push(chunk);
    }

    fn validate(&self) -> WavResult<()> {
        for tag in [ChunkTag::FMT, ChunkTag::DATA] {
            if !self.has_chunk(tag) {
                return Err(WavError::MissingRequiredChunk { tag });
            }
        }
        Ok(())
    }

    /// Chunks in the order they appeared in the source, including ignored
    /// duplicates of singular tags.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunks in canonical order: the first `fmt `, then `INFO` lists, then the
    /// rest in arrival order. Extra `fmt ` chunks are skipped.
    pub fn canonical_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        let is_info = |chunk: &&Chunk| chunk.list_type() == Some(ChunkTag::INFO);
        let format = self.chunk(ChunkTag::FMT).into_iter();
        let info = self.chunks.iter().filter(is_info);
        let rest = self
            .chunks
            .iter()
            .filter(move |chunk| chunk.tag() != ChunkTag::FMT && !is_info(chunk));
        format.chain(info).chain(rest)
    }

    /// Recoverable issues found while building the container.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Returns true if at least one chunk with `tag` was kept.
    pub fn has_chunk(&self, tag: ChunkTag) -> bool {
        self.index.contains_key(&tag)
    }

    /// The first chunk with `tag`.
    pub fn chunk(&self, tag: ChunkTag) -> Option<&Chunk> {
        self.chunks_by_tag(tag).next()
    }

    /// Chunks with `tag` reachable by lookup, in arrival order. For singular
    /// tags this is at most the first occurrence.
    pub fn chunks_by_tag(&self, tag: ChunkTag) -> impl Iterator<Item = &Chunk> + '_ {
        self.index
            .get(&tag)
            .into_iter()
            .flatten()
            .map(move |&i| &self.chunks[i])
    }

    fn typed<'a, T>(
        &'a self,
        tag: ChunkTag,
        extract: impl Fn(&'a ChunkBody) -> Option<&'a T>,
    ) -> Result<Option<&'a T>, DecodeError> {
        let Some(chunk) = self.chunk(tag) else {
            return Ok(None);
        };
        extract(chunk.body()?)
            .map(Some)
            .ok_or_else(|| DecodeError::field(tag, "decoded to an unexpected record type"))
    }

    /// The format descriptor.
    pub fn format(&self) -> Result<&FormatChunk, DecodeError> {
        let format = self.typed(ChunkTag::FMT, |body| match body {
            ChunkBody::Format(format) => Some(format),
            _ => None,
        })?;
        // validate() guarantees the chunk exists.
        format.ok_or_else(|| DecodeError::field(ChunkTag::FMT, "chunk missing"))
    }

    /// The sampler chunk, if present.
    pub fn sample_metadata(&self) -> Result<Option<&SampleChunk>, DecodeError> {
        self.typed(ChunkTag::SMPL, |body| match body {
            ChunkBody::Sample(smpl) => Some(smpl),
            _ => None,
        })
    }

    /// Loop points from the `smpl` chunk; empty when there is none.
    pub fn loop_metadata(&self) -> Result<&[LoopPoint], DecodeError> {
        Ok(self
            .sample_metadata()?
            .map(|smpl| smpl.loops.as_slice())
            .unwrap_or(&[]))
    }

    /// The `smpl` MIDI unity note, when present and non-zero.
    pub fn root_note(&self) -> Result<Option<i32>, DecodeError> {
        Ok(self
            .sample_metadata()?
            .map(|smpl| smpl.midi_unity_note)
            .filter(|&note| note != 0))
    }

    /// Cue points from the `cue ` chunk; empty when there is none.
    pub fn cue_points(&self) -> Result<&[CuePoint], DecodeError> {
        let cue: Option<&CueChunk> = self.typed(ChunkTag::CUE, |body| match body {
            ChunkBody::Cue(cue) => Some(cue),
            _ => None,
        })?;
        Ok(cue.map(|cue| cue.points.as_slice()).unwrap_or(&[]))
    }

    /// The `fact` chunk, if present.
    pub fn fact(&self) -> Result<Option<&FactChunk>, DecodeError> {
        self.typed(ChunkTag::FACT, |body| match body {
            ChunkBody::Fact(fact) => Some(fact),
            _ => None,
        })
    }

    /// The `inst` chunk, if present.
    pub fn instrument(&self) -> Result<Option<&InstrumentChunk>, DecodeError> {
        self.typed(ChunkTag::INST, |body| match body {
            ChunkBody::Instrument(inst) => Some(inst),
            _ => None,
        })
    }

    /// Text metadata from the first `INFO` list, keyed by sub-chunk tag.
    pub fn info_metadata(&self) -> Result<BTreeMap<ChunkTag, String>, DecodeError> {
        let Some(chunk) = self
            .chunks
            .iter()
            .find(|chunk| chunk.list_type() == Some(ChunkTag::INFO))
        else {
            return Ok(BTreeMap::new());
        };
        match chunk.body()? {
            ChunkBody::List(list) => Ok(list.text_entries()),
            _ => Err(DecodeError::field(
                chunk.tag(),
                "decoded to an unexpected record type",
            )),
        }
    }

    /// Raw payload of the `data` chunk.
    pub fn data(&self) -> &[u8] {
        self.chunk(ChunkTag::DATA)
            .map(Chunk::payload)
            .unwrap_or(&[])
    }

    /// Frames of the `data` chunk; a trailing partial frame is dropped.
    pub fn raw_frames(&self) -> Result<Frames<'_>, DecodeError> {
        let format = self.format()?;
        let frame_size = format.frame_size()?;
        if frame_size == 0 {
            return Err(DecodeError::InvalidFrameSize {
                channels: format.channels,
                bits_per_sample: format.bits_per_sample.unwrap_or(0),
            });
        }
        Ok(self.data().chunks_exact(frame_size))
    }

    /// Number of whole frames in the `data` chunk.
    pub fn frame_count(&self) -> Result<usize, DecodeError> {
        Ok(self.raw_frames()?.len())
    }
}

/// Reads `RIFF`, the RIFF size and the `WAVE` form type.
fn read_riff_header<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> WavResult<u32> {
    match cursor.read_tag()? {
        Some(ChunkTag::RIFF) => {}
        Some(other) => {
            return Err(WavError::malformed(format!(
                "first chunk is '{}', expected 'RIFF'",
                other
            )))
        }
        None => return Err(WavError::malformed("stream too short for a RIFF header")),
    }

    let riff_size = cursor
        .read_u32("RIFF size")
        .map_err(|_| WavError::malformed("invalid or missing RIFF size"))?;

    match cursor.read_tag()? {
        Some(ChunkTag::WAVE) => Ok(riff_size),
        Some(other) => Err(WavError::malformed(format!(
            "form type is '{}', not a WAVE file",
            other
        ))),
        None => Err(WavError::malformed("missing RIFF form type")),
    }
}
