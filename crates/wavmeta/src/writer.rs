//! Serialization of a container back to RIFF bytes.
//!
//! Chunks are emitted in canonical order, each as tag + little-endian size +
//! payload + a zero pad byte when the size is odd. The RIFF size field is
//! `4 + Σ(8 + size + pad)`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::container::WavFile;
use crate::error::{WavError, WavResult};
use crate::tag::ChunkTag;

impl WavFile {
    /// Value of the RIFF size field when this container is written.
    pub fn riff_size(&self) -> WavResult<u32> {
        let total: u64 = 4 + self
            .canonical_chunks()
            .map(|chunk| chunk.encoded_len())
            .sum::<u64>();
        u32::try_from(total).map_err(|_| WavError::PayloadTooLarge {
            len: total as usize,
        })
    }

    /// Writes the complete container.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> WavResult<()> {
        let riff_size = self.riff_size()?;

        writer.write_all(ChunkTag::RIFF.as_bytes())?;
        writer.write_u32::<LittleEndian>(riff_size)?;
        writer.write_all(ChunkTag::WAVE.as_bytes())?;

        for chunk in self.canonical_chunks() {
            chunk.write_to(writer)?;
        }
        Ok(())
    }

    /// Serializes the complete container to a byte vector.
    pub fn to_bytes(&self) -> WavResult<Vec<u8>> {
        let riff_size = self.riff_size()?;
        let mut buffer = Vec::with_capacity(8 + riff_size as usize);
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Writes the container to a file at `path`, replacing it.
    pub fn write_file(&self, path: impl AsRef<Path>) -> WavResult<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "writing WAVE file");
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
