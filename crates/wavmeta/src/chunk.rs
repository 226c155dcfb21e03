//! Generic chunk envelope: tag, size, payload and word-alignment padding.

use std::fmt;
use std::io::{Read, Seek, Write};
use std::sync::OnceLock;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::cursor::ByteCursor;
use crate::decode::{self, ChunkBody};
use crate::error::{DecodeError, WavError, WavResult};
use crate::tag::ChunkTag;

/// Number of payload bytes shown by [`Chunk::hex_preview`].
pub const PREVIEW_BYTES: usize = 100;

/// One tagged, length-prefixed unit of a RIFF container.
///
/// The payload is stored verbatim. Typed fields are decoded on first request
/// and cached; the cached result never changes the raw bytes.
#[derive(Clone)]
pub struct Chunk {
    tag: ChunkTag,
    payload: Vec<u8>,
    offset: Option<u64>,
    body: OnceLock<Result<ChunkBody, DecodeError>>,
}

/// A chunk read from a stream together with how its padding looked on disk.
#[derive(Debug)]
pub(crate) struct ScannedChunk {
    pub chunk: Chunk,
    /// The chunk has an odd size but the stream ended before its pad byte.
    pub missing_pad: bool,
}

impl Chunk {
    /// Creates a chunk from a tag and payload.
    pub fn new(tag: ChunkTag, payload: Vec<u8>) -> WavResult<Self> {
        if u32::try_from(payload.len()).is_err() {
            return Err(WavError::PayloadTooLarge {
                len: payload.len(),
            });
        }
        Ok(Self {
            tag,
            payload,
            offset: None,
            body: OnceLock::new(),
        })
    }

    /// Reads the next chunk, or `None` at a clean end of stream.
    ///
    /// `max_size` bounds the declared payload size before anything is
    /// allocated.
    pub(crate) fn read<R: Read + Seek>(
        cursor: &mut ByteCursor<R>,
        max_size: u64,
    ) -> WavResult<Option<ScannedChunk>> {
        let offset = cursor.position();
        let Some(tag) = cursor.read_tag()? else {
            return Ok(None);
        };

        let size = cursor.read_u32(&format!("size of '{}' chunk", tag))?;
        if u64::from(size) > max_size {
            return Err(WavError::ChunkTooLarge {
                tag,
                size,
                limit: max_size,
            });
        }

        let payload = cursor.read_vec(size, &format!("payload of '{}' chunk", tag))?;
        let missing_pad = size % 2 == 1 && cursor.skip(1)? == 0;

        Ok(Some(ScannedChunk {
            chunk: Self {
                tag,
                payload,
                offset: Some(offset),
                body: OnceLock::new(),
            },
            missing_pad,
        }))
    }

    /// The four-character tag.
    pub fn tag(&self) -> ChunkTag {
        self.tag
    }

    /// Declared payload size, excluding any pad byte.
    pub fn size(&self) -> u32 {
        // Checked in both constructors.
        self.payload.len() as u32
    }

    /// The exact payload bytes, pad byte excluded.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Offset of the chunk header in the source stream, if read from one.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Number of pad bytes that follow the payload on disk (0 or 1).
    pub fn pad_len(&self) -> usize {
        self.payload.len() % 2
    }

    /// Bytes this chunk occupies when written: header, payload and padding.
    pub fn encoded_len(&self) -> u64 {
        8 + self.payload.len() as u64 + self.pad_len() as u64
    }

    /// Decoded typed fields, computed once and cached.
    pub fn body(&self) -> Result<&ChunkBody, DecodeError> {
        self.body
            .get_or_init(|| {
                tracing::debug!(tag = %self.tag, size = self.payload.len(), "decoding chunk");
                decode::decode(self.tag, &self.payload)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns true once typed fields have been decoded.
    pub fn is_decoded(&self) -> bool {
        self.body.get().is_some()
    }

    /// The list type of a `LIST`/`list` chunk, read from the first four
    /// payload bytes without decoding the sub-chunks.
    pub fn list_type(&self) -> Option<ChunkTag> {
        if !self.tag.is_list() {
            return None;
        }
        let bytes: [u8; 4] = self.payload.get(..4)?.try_into().ok()?;
        Some(ChunkTag::from_bytes(bytes))
    }

    /// Writes tag, size, payload and the pad byte for odd sizes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.tag.as_bytes())?;
        writer.write_u32::<LittleEndian>(self.size())?;
        writer.write_all(&self.payload)?;
        if self.pad_len() == 1 {
            writer.write_u8(0)?;
        }
        Ok(())
    }

    /// Hex dump of the first [`PREVIEW_BYTES`] payload bytes.
    pub fn hex_preview(&self) -> String {
        let shown = &self.payload[..self.payload.len().min(PREVIEW_BYTES)];
        let mut out = shown
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        if self.payload.len() > PREVIEW_BYTES {
            out.push_str(" [...]");
        }
        out
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("tag", &self.tag)
            .field("size", &self.payload.len())
            .field("offset", &self.offset)
            .field("decoded", &self.is_decoded())
            .finish()
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.payload == other.payload
    }
}

impl Eq for Chunk {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn scan(bytes: &[u8]) -> WavResult<Option<ScannedChunk>> {
        let mut cursor = ByteCursor::new(Cursor::new(bytes))?;
        Chunk::read(&mut cursor, u64::MAX)
    }

    #[test]
    fn test_odd_chunk_skips_pad() {
        let bytes = b"abcd\x03\x00\x00\x00xyz\x00next";
        let mut cursor = ByteCursor::new(Cursor::new(&bytes[..])).unwrap();
        let scanned = Chunk::read(&mut cursor, u64::MAX).unwrap().unwrap();
        assert_eq!(scanned.chunk.payload(), b"xyz");
        assert_eq!(scanned.chunk.size(), 3);
        assert!(!scanned.missing_pad);
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn test_missing_final_pad_is_flagged() {
        let scanned = scan(b"abcd\x01\x00\x00\x00z").unwrap().unwrap();
        assert!(scanned.missing_pad);
        assert_eq!(scanned.chunk.payload(), b"z");
    }

    #[test]
    fn test_truncated_size_field() {
        let err = scan(b"abcd\x01\x00").unwrap_err();
        assert!(matches!(err, WavError::StreamTruncated { .. }));
    }

    #[test]
    fn test_truncated_payload() {
        let err = scan(b"data\x10\x00\x00\x00short").unwrap_err();
        match err {
            WavError::StreamTruncated { what, needed, .. } => {
                assert!(what.contains("'data'"));
                assert_eq!(needed, 16);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_size_limit() {
        let mut cursor = ByteCursor::new(Cursor::new(&b"data\x10\x00\x00\x00"[..])).unwrap();
        let err = Chunk::read(&mut cursor, 8).unwrap_err();
        assert!(matches!(err, WavError::ChunkTooLarge { size: 16, .. }));
    }

    #[test]
    fn test_write_pads_odd_payload() {
        let chunk = Chunk::new(ChunkTag::from_bytes(*b"note"), b"abc".to_vec()).unwrap();
        let mut out = Vec::new();
        chunk.write_to(&mut out).unwrap();
        assert_eq!(out, b"note\x03\x00\x00\x00abc\x00");
        assert_eq!(chunk.encoded_len(), 12);
    }

    #[test]
    fn test_hex_preview_truncates() {
        let chunk = Chunk::new(ChunkTag::DATA, vec![0xAB; 101]).unwrap();
        let preview = chunk.hex_preview();
        assert!(preview.starts_with("AB AB"));
        assert!(preview.ends_with(" [...]"));
        let short = Chunk::new(ChunkTag::DATA, vec![1, 2]).unwrap();
        assert_eq!(short.hex_preview(), "01 02");
    }

    #[test]
    fn test_list_type_reads_prefix_only() {
        let chunk = Chunk::new(ChunkTag::LIST, b"INFOgarbage".to_vec()).unwrap();
        assert_eq!(chunk.list_type(), Some(ChunkTag::INFO));
        assert!(!chunk.is_decoded());
        let empty = Chunk::new(ChunkTag::LIST, b"IN".to_vec()).unwrap();
        assert_eq!(empty.list_type(), None);
        let data = Chunk::new(ChunkTag::DATA, b"INFO".to_vec()).unwrap();
        assert_eq!(data.list_type(), None);
    }

    #[test]
    fn test_body_is_cached() {
        let chunk = Chunk::new(ChunkTag::from_bytes(*b"JUNK"), vec![0; 4]).unwrap();
        assert!(!chunk.is_decoded());
        assert!(matches!(chunk.body(), Ok(ChunkBody::Opaque)));
        assert!(chunk.is_decoded());
    }
}
