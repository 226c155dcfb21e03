//! `fmt ` chunk: audio format descriptor.

use byteorder::{LittleEndian, WriteBytesExt};

use super::FieldReader;
use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// Format tag for uncompressed PCM.
pub const WAVE_FORMAT_PCM: u16 = 0x0001;

/// Size of the fields shared by every format tag.
const BASE_SIZE: usize = 14;

/// Returns the name of a WAVE format tag.
pub fn compression_name(format_tag: u16) -> &'static str {
    match format_tag {
        0 => "Unknown",
        1 => "PCM/uncompressed",
        2 => "Microsoft ADPCM",
        6 => "ITU G.711 a-law",
        7 => "ITU G.711 u-law",
        17 => "IMA ADPCM",
        20 => "ITU G.723 ADPCM",
        49 => "GSM 6.10",
        64 => "ITU G.721 ADPCM",
        80 => "MPEG",
        0xFFFF => "Experimental",
        _ => "<unsupported>",
    }
}

/// Decoded `fmt ` chunk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FormatChunk {
    /// Compression format tag (1 = PCM).
    pub format_tag: u16,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Average bytes per second.
    pub avg_bytes_per_sec: u32,
    /// Bytes per frame as declared by the file.
    pub block_align: u16,
    /// Bits per sample; only present for PCM.
    pub bits_per_sample: Option<u16>,
}

impl FormatChunk {
    /// Creates a PCM format with derived byte rate and block align.
    ///
    /// The derived fields saturate at their field width, so layouts too wide
    /// for the on-disk fields never panic.
    pub fn pcm(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        let block_align = channels.saturating_mul(bits_per_sample.div_ceil(8));
        Self {
            format_tag: WAVE_FORMAT_PCM,
            channels,
            sample_rate,
            avg_bytes_per_sec: sample_rate.saturating_mul(u32::from(block_align)),
            block_align,
            bits_per_sample: Some(bits_per_sample),
        }
    }

    pub(crate) fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(ChunkTag::FMT, payload);
        r.need(BASE_SIZE as u64, "format header")?;

        let format_tag = r.u16("format tag")?;
        let channels = r.u16("channel count")?;
        let sample_rate = r.u32("sample rate")?;
        let avg_bytes_per_sec = r.u32("byte rate")?;
        let block_align = r.u16("block align")?;

        let bits_per_sample = if format_tag == WAVE_FORMAT_PCM {
            Some(r.u16("bits per sample")?)
        } else {
            if compression_name(format_tag) == "<unsupported>" {
                tracing::warn!(format_tag, "unknown format tag");
            }
            None
        };

        Ok(Self {
            format_tag,
            channels,
            sample_rate,
            avg_bytes_per_sec,
            block_align,
            bits_per_sample,
        })
    }

    /// Encodes the record; PCM formats include bits per sample.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BASE_SIZE + 2);
        self.write_fields(&mut out)
            .expect("writing to Vec should not fail");
        out
    }

    fn write_fields(&self, out: &mut Vec<u8>) -> std::io::Result<()> {
        out.write_u16::<LittleEndian>(self.format_tag)?;
        out.write_u16::<LittleEndian>(self.channels)?;
        out.write_u32::<LittleEndian>(self.sample_rate)?;
        out.write_u32::<LittleEndian>(self.avg_bytes_per_sec)?;
        out.write_u16::<LittleEndian>(self.block_align)?;
        if self.format_tag == WAVE_FORMAT_PCM {
            out.write_u16::<LittleEndian>(self.bits_per_sample.unwrap_or(0))?;
        }
        Ok(())
    }

    /// Name of the compression format.
    pub fn compression_name(&self) -> &'static str {
        compression_name(self.format_tag)
    }

    /// Returns true for any format other than PCM.
    pub fn is_compressed(&self) -> bool {
        self.format_tag != WAVE_FORMAT_PCM
    }

    fn pcm_bits(&self) -> Result<u16, DecodeError> {
        match self.bits_per_sample {
            Some(bits) if !self.is_compressed() => Ok(bits),
            _ => Err(DecodeError::UnsupportedCompression {
                format_tag: self.format_tag,
                name: self.compression_name(),
            }),
        }
    }

    /// Bytes per sample per channel, rounded up.
    pub fn sample_width(&self) -> Result<u16, DecodeError> {
        Ok(self.pcm_bits()?.div_ceil(8))
    }

    /// Bytes per interleaved frame.
    pub fn frame_size(&self) -> Result<usize, DecodeError> {
        Ok(usize::from(self.channels) * usize::from(self.sample_width()?))
    }
}
