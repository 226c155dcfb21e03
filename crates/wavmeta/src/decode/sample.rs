//! `smpl` chunk: sampler root note and loop points.

use byteorder::{LittleEndian, WriteBytesExt};

use super::FieldReader;
use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// Size of the fixed `smpl` header (9 × i32).
pub const SAMPLE_HEADER_SIZE: usize = 36;

/// Size of one loop record (6 × i32).
pub const LOOP_RECORD_SIZE: usize = 24;

/// Playback direction of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    /// Loop forward.
    Forward,
    /// Alternate forward and backward.
    Alternating,
    /// Loop backward.
    Reverse,
    /// Manufacturer-specific value (32 and above by convention).
    Other(i32),
}

impl LoopType {
    /// Maps the on-disk value to a loop type.
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => LoopType::Forward,
            1 => LoopType::Alternating,
            2 => LoopType::Reverse,
            other => LoopType::Other(other),
        }
    }

    /// The on-disk value.
    pub fn to_raw(self) -> i32 {
        match self {
            LoopType::Forward => 0,
            LoopType::Alternating => 1,
            LoopType::Reverse => 2,
            LoopType::Other(value) => value,
        }
    }
}

/// One loop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LoopPoint {
    pub cue_point_id: i32,
    pub loop_type: LoopType,
    /// First frame of the loop.
    pub start: i32,
    /// Last frame of the loop.
    pub end: i32,
    pub fraction: i32,
    /// 0 means loop forever.
    pub play_count: i32,
}

impl LoopPoint {
    /// Creates an infinite forward loop.
    pub fn forward(cue_point_id: i32, start: i32, end: i32) -> Self {
        Self {
            cue_point_id,
            loop_type: LoopType::Forward,
            start,
            end,
            fraction: 0,
            play_count: 0,
        }
    }
}

/// Decoded `smpl` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SampleChunk {
    pub manufacturer: i32,
    pub product: i32,
    /// Nanoseconds per sample.
    pub sample_period: i32,
    /// MIDI note that plays the sample at its recorded pitch.
    pub midi_unity_note: i32,
    pub midi_pitch_fraction: i32,
    pub smpte_format: i32,
    pub smpte_offset: i32,
    /// Declared size of the sampler-specific data after the loops.
    pub sampler_data_size: i32,
    pub loops: Vec<LoopPoint>,
    /// Bytes after the loop records, kept verbatim.
    #[serde(skip)]
    pub sampler_data: Vec<u8>,
}

impl SampleChunk {
    pub(crate) fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(ChunkTag::SMPL, payload);
        r.need(SAMPLE_HEADER_SIZE as u64, "sampler header")?;

        let manufacturer = r.i32("manufacturer")?;
        let product = r.i32("product")?;
        let sample_period = r.i32("sample period")?;
        let midi_unity_note = r.i32("MIDI unity note")?;
        let midi_pitch_fraction = r.i32("MIDI pitch fraction")?;
        let smpte_format = r.i32("SMPTE format")?;
        let smpte_offset = r.i32("SMPTE offset")?;
        let loop_count = r.i32("loop count")?;
        let sampler_data_size = r.i32("sampler data size")?;

        let loop_count = u64::try_from(loop_count).map_err(|_| {
            DecodeError::field(ChunkTag::SMPL, format!("negative loop count {}", loop_count))
        })?;
        r.need(
            loop_count * LOOP_RECORD_SIZE as u64,
            &format!("{} loop records", loop_count),
        )?;

        let loops = (0..loop_count)
            .map(|_| {
                Ok(LoopPoint {
                    cue_point_id: r.i32("cue point id")?,
                    loop_type: LoopType::from_raw(r.i32("loop type")?),
                    start: r.i32("loop start")?,
                    end: r.i32("loop end")?,
                    fraction: r.i32("loop fraction")?,
                    play_count: r.i32("play count")?,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(Self {
            manufacturer,
            product,
            sample_period,
            midi_unity_note,
            midi_pitch_fraction,
            smpte_format,
            smpte_offset,
            sampler_data_size,
            loops,
            sampler_data: r.rest().to_vec(),
        })
    }

    /// Number of loop records.
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Encodes the header, loop records and trailing sampler data.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            SAMPLE_HEADER_SIZE + self.loops.len() * LOOP_RECORD_SIZE + self.sampler_data.len(),
        );
        self.write_fields(&mut out)
            .expect("writing to Vec should not fail");
        out
    }

    fn write_fields(&self, out: &mut Vec<u8>) -> std::io::Result<()> {
        for value in [
            self.manufacturer,
            self.product,
            self.sample_period,
            self.midi_unity_note,
            self.midi_pitch_fraction,
            self.smpte_format,
            self.smpte_offset,
            self.loops.len() as i32,
            self.sampler_data_size,
        ] {
            out.write_i32::<LittleEndian>(value)?;
        }
        for lp in &self.loops {
            out.write_i32::<LittleEndian>(lp.cue_point_id)?;
            out.write_i32::<LittleEndian>(lp.loop_type.to_raw())?;
            out.write_i32::<LittleEndian>(lp.start)?;
            out.write_i32::<LittleEndian>(lp.end)?;
            out.write_i32::<LittleEndian>(lp.fraction)?;
            out.write_i32::<LittleEndian>(lp.play_count)?;
        }
        out.extend_from_slice(&self.sampler_data);
        Ok(())
    }
}
