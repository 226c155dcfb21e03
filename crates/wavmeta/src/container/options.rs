//! Read configuration.

/// Options controlling how a container is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Largest payload a single chunk may declare before the scan is aborted
    /// with [`WavError::ChunkTooLarge`](crate::WavError::ChunkTooLarge).
    pub max_chunk_size: u64,
    /// Decode every chunk's typed fields during the scan instead of on first
    /// access. Decode failures stay scoped to their chunk either way.
    pub eager_decode: bool,
}

impl ReadOptions {
    /// Sets the largest accepted chunk payload.
    pub fn max_chunk_size(mut self, bytes: u64) -> Self {
        self.max_chunk_size = bytes;
        self
    }

    /// Enables decoding all chunks during the scan.
    pub fn eager_decode(mut self, eager: bool) -> Self {
        self.eager_decode = eager;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: u64::from(u32::MAX),
            eager_decode: false,
        }
    }
}
