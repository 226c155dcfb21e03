//! Error and warning types for WAVE container parsing.

use thiserror::Error;

use crate::tag::ChunkTag;

/// Result type for container operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that abort container construction or I/O.
#[derive(Debug, Error)]
pub enum WavError {
    /// Fewer bytes are available than a declared size requires.
    #[error("stream truncated while reading {what} at offset {offset}: needed {needed} bytes, {available} available")]
    StreamTruncated {
        /// What was being read.
        what: String,
        /// Stream offset where the read started.
        offset: u64,
        /// Bytes required.
        needed: u64,
        /// Bytes remaining in the stream.
        available: u64,
    },

    /// The outer header is not `RIFF` or the form type is not `WAVE`.
    #[error("malformed RIFF header: {message}")]
    MalformedHeader {
        /// Error message.
        message: String,
    },

    /// A `fmt ` or `data` chunk is missing.
    #[error("required chunk '{tag}' missing")]
    MissingRequiredChunk {
        /// The missing chunk tag.
        tag: ChunkTag,
    },

    /// A chunk declares a payload larger than the configured limit.
    #[error("chunk '{tag}' declares {size} bytes, limit is {limit}")]
    ChunkTooLarge {
        /// Chunk tag.
        tag: ChunkTag,
        /// Declared payload size.
        size: u32,
        /// Configured limit.
        limit: u64,
    },

    /// A chunk tag is empty or longer than four bytes.
    #[error("invalid chunk tag of length {len}: must be 1 to 4 bytes")]
    InvalidTag {
        /// Length of the rejected tag.
        len: usize,
    },

    /// A payload does not fit in the 32-bit size field.
    #[error("payload of {len} bytes does not fit a RIFF chunk")]
    PayloadTooLarge {
        /// Payload length.
        len: usize,
    },

    /// Typed field decoding failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavError {
    /// Creates a malformed header error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Returns the stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::StreamTruncated { .. } => "WAV_001",
            WavError::MalformedHeader { .. } => "WAV_002",
            WavError::MissingRequiredChunk { .. } => "WAV_003",
            WavError::ChunkTooLarge { .. } => "WAV_004",
            WavError::InvalidTag { .. } => "WAV_005",
            WavError::PayloadTooLarge { .. } => "WAV_006",
            WavError::Decode(err) => err.code(),
            WavError::Io(_) => "WAV_007",
        }
    }
}

/// Errors raised while decoding one chunk's typed fields.
///
/// These are scoped to a single chunk and cached alongside it, so they are
/// cheap to clone and compare.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload is too short for the record layout of its tag.
    #[error("invalid data in '{tag}' chunk: {message}")]
    FieldDecode {
        /// Chunk tag being decoded.
        tag: ChunkTag,
        /// Error message.
        message: String,
    },

    /// Sample width or frame size requested for a compressed format.
    #[error("can't determine sample width for {name} data compression format (tag {format_tag})")]
    UnsupportedCompression {
        /// Format tag from the `fmt ` chunk.
        format_tag: u16,
        /// Human-readable compression name.
        name: &'static str,
    },

    /// A PCM format whose frame size works out to zero bytes.
    #[error("invalid frame size: {channels} channel(s) of {bits_per_sample} bits")]
    InvalidFrameSize {
        /// Channel count.
        channels: u16,
        /// Bits per sample.
        bits_per_sample: u16,
    },
}

impl DecodeError {
    /// Creates a field decode error for `tag`.
    pub fn field(tag: ChunkTag, message: impl Into<String>) -> Self {
        Self::FieldDecode {
            tag,
            message: message.into(),
        }
    }

    /// Returns the stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::FieldDecode { .. } => "WAV_101",
            DecodeError::UnsupportedCompression { .. } => "WAV_102",
            DecodeError::InvalidFrameSize { .. } => "WAV_103",
        }
    }
}

/// Warning codes for recoverable parse issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum WarningCode {
    /// W001: A second occurrence of a singular chunk was dropped.
    DuplicateChunkIgnored,
    /// W002: A `data` chunk appeared before the `fmt ` chunk.
    DataBeforeFormat,
    /// W003: The RIFF size field points past the end of the stream.
    RiffSizeMismatch,
    /// W004: The final chunk has an odd size and no pad byte.
    MissingPadByte,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::DuplicateChunkIgnored => "W001",
            WarningCode::DataBeforeFormat => "W002",
            WarningCode::RiffSizeMismatch => "W003",
            WarningCode::MissingPadByte => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A recoverable issue found while scanning a container.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParseWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Stream offset of the chunk header that caused the warning; `None`
    /// for chunks assembled in memory.
    pub offset: Option<u64>,
}

impl ParseWarning {
    /// Creates a new parse warning.
    pub fn new(code: WarningCode, message: impl Into<String>, offset: Option<u64>) -> Self {
        Self {
            code,
            message: message.into(),
            offset,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " (at byte {})", offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_names_tag() {
        let err = DecodeError::field(ChunkTag::SMPL, "need 60 bytes, have 36");
        assert!(err.to_string().contains("'smpl'"));
        assert!(err.to_string().contains("need 60 bytes"));
    }

    #[test]
    fn test_decode_error_converts_to_wav_error() {
        let err: WavError = DecodeError::UnsupportedCompression {
            format_tag: 17,
            name: "IMA ADPCM",
        }
        .into();
        assert_eq!(err.code(), "WAV_102");
        assert!(err.to_string().contains("IMA ADPCM"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::new(
            WarningCode::DuplicateChunkIgnored,
            "ignoring extra 'fmt ' chunk",
            Some(60),
        );
        assert_eq!(
            warning.to_string(),
            "W001: ignoring extra 'fmt ' chunk (at byte 60)"
        );
    }

    #[test]
    fn test_warning_display_without_offset() {
        let warning = ParseWarning::new(
            WarningCode::DataBeforeFormat,
            "encountered 'data' chunk before 'fmt ' chunk",
            None,
        );
        assert_eq!(
            warning.to_string(),
            "W002: encountered 'data' chunk before 'fmt ' chunk"
        );
    }
}
