//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `inspect` and `loops`. Error codes
//! are passed through from the library (`WAV_001`, ...), and warning codes
//! likewise (`W001`, ...).

use serde::Serialize;
use wavmeta::{Chunk, FormatChunk, LoopPoint, ParseWarning, WavError};

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "WAV_001", "WAV_101")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&WavError> for JsonError {
    fn from(err: &WavError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Byte offset in the source file, absent for chunks built in memory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl From<&ParseWarning> for JsonWarning {
    fn from(warning: &ParseWarning) -> Self {
        Self {
            code: warning.code.code().to_string(),
            message: warning.message.clone(),
            offset: warning.offset,
        }
    }
}

/// One chunk in an `inspect` listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChunkSummary {
    pub tag: String,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_type: Option<String>,
    pub preview: String,
}

impl From<&Chunk> for ChunkSummary {
    fn from(chunk: &Chunk) -> Self {
        Self {
            tag: chunk.tag().to_string(),
            size: chunk.size(),
            offset: chunk.offset(),
            list_type: chunk.list_type().map(|tag| tag.to_string()),
            preview: chunk.hex_preview(),
        }
    }
}

/// Result of `inspect` on one file.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub success: bool,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
    pub errors: Vec<JsonError>,
}

/// Container details reported by `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    /// Format descriptor, absent when the `fmt ` chunk failed to decode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatChunk>,
    pub compression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<usize>,
    /// BLAKE3 hash of the `data` payload
    pub data_hash: String,
    pub chunks: Vec<ChunkSummary>,
    pub warnings: Vec<JsonWarning>,
}

/// Result of `loops` on one file.
#[derive(Debug, Clone, Serialize)]
pub struct LoopsOutput {
    pub success: bool,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_note: Option<i32>,
    pub loops: Vec<LoopPoint>,
    pub errors: Vec<JsonError>,
}

impl LoopsOutput {
    pub fn failure(file: impl Into<String>, error: JsonError) -> Self {
        Self {
            success: false,
            file: file.into(),
            root_note: None,
            loops: Vec::new(),
            errors: vec![error],
        }
    }
}
