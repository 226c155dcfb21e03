//! RIFF/WAVE container reader and writer.
//!
//! This crate parses WAVE files into a [`WavFile`]: an arrival-ordered list of
//! chunks whose typed fields (format, sampler loops, cue points, `INFO` text)
//! are decoded lazily on first access. A container can be written back at any
//! time; the output is byte-identical to the input except that chunks are
//! emitted in canonical order.
//!
//! # Example
//!
//! ```
//! use wavmeta::{ChunkTag, FormatChunk, ListChunk, WavBuilder, WavFile};
//!
//! let info = ListChunk::new(ChunkTag::INFO)
//!     .with_subchunk(ChunkTag::try_from("INAM").unwrap(), &b"Piano C4\0"[..]);
//!
//! // Data first, format last: still a valid container.
//! let wav = WavBuilder::new()
//!     .data(vec![0u8; 16])
//!     .list(&info)
//!     .format(&FormatChunk::pcm(2, 44100, 16))
//!     .build()
//!     .unwrap();
//!
//! let bytes = wav.to_bytes().unwrap();
//! let reparsed = WavFile::from_bytes(&bytes).unwrap();
//!
//! let order: Vec<_> = reparsed.chunks().iter().map(|c| c.tag().to_string()).collect();
//! assert_eq!(order, ["fmt ", "LIST", "data"]);
//! assert_eq!(reparsed.format().unwrap().frame_size().unwrap(), 4);
//! assert_eq!(reparsed.raw_frames().unwrap().count(), 4);
//! ```
//!
//! # Modules
//!
//! - [`cursor`]: bounds-checked sequential reader
//! - [`tag`]: four-character chunk identifiers
//! - [`chunk`]: generic chunk envelope with cached decoding
//! - [`decode`]: typed decoders for `fmt `, `smpl`, `LIST`, `cue `, `fact`, `inst`
//! - [`container`]: the [`WavFile`] model and builder
//! - [`error`]: errors and parse warnings

pub mod chunk;
pub mod container;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod tag;
mod writer;

// Re-export commonly used types at the crate root
pub use chunk::Chunk;
pub use container::{Frames, ReadOptions, WavBuilder, WavFile};
pub use decode::{
    compression_name, ChunkBody, CueChunk, CuePoint, FactChunk, FormatChunk, InstrumentChunk,
    ListChunk, LoopPoint, LoopType, SampleChunk, SubChunk, WAVE_FORMAT_PCM,
};
pub use error::{DecodeError, ParseWarning, WarningCode, WavError, WavResult};
pub use tag::ChunkTag;
