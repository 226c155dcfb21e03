//! `inst` chunk: pitch and key/velocity range hints for samplers.

use super::FieldReader;
use crate::error::DecodeError;
use crate::tag::ChunkTag;

/// Decoded `inst` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct InstrumentChunk {
    /// MIDI note of the recorded pitch.
    pub unshifted_note: u8,
    /// Pitch correction in cents.
    pub fine_tune: i8,
    /// Gain in dB.
    pub gain: i8,
    pub low_note: u8,
    pub high_note: u8,
    pub low_velocity: u8,
    pub high_velocity: u8,
}

impl InstrumentChunk {
    pub(crate) fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let mut r = FieldReader::new(ChunkTag::INST, payload);
        r.need(7, "instrument record")?;
        Ok(Self {
            unshifted_note: r.u8("unshifted note")?,
            fine_tune: r.i8("fine tune")?,
            gain: r.i8("gain")?,
            low_note: r.u8("low note")?,
            high_note: r.u8("high note")?,
            low_velocity: r.u8("low velocity")?,
            high_velocity: r.u8("high velocity")?,
        })
    }

    pub fn to_payload(&self) -> Vec<u8> {
        vec![
            self.unshifted_note,
            self.fine_tune as u8,
            self.gain as u8,
            self.low_note,
            self.high_note,
            self.low_velocity,
            self.high_velocity,
        ]
    }
}
