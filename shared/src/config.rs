use std::{default::Default, time::Duration};

/// Default size of one chunk of a chunked transfer
pub const DEFAULT_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Upper bound on the chunk size when chunks are sent as base64 text
pub const TEXT_CHUNK_SIZE_CAP: usize = 2 * 1024 * 1024;

/// Default interval of the scene diff-sync loop
pub const DEFAULT_SCENE_SYNC_INTERVAL: Duration = Duration::from_millis(30);

/// Contains config properties for chunked transfers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum number of payload bytes carried by one chunk
    pub chunk_size: usize,
    /// Chunk size cap applied when the channel cannot carry binary frames
    pub text_chunk_size_cap: usize,
    /// Minimum time between two chunks of the same sender. Zero sends a whole
    /// transfer at once.
    pub inter_chunk_delay: Duration,
}

impl ChunkConfig {
    /// Chunk size to use on a channel with or without binary support
    pub fn effective_chunk_size(&self, supports_binary: bool) -> usize {
        let size = if supports_binary {
            self.chunk_size
        } else {
            self.chunk_size.min(self.text_chunk_size_cap)
        };
        size.max(1)
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            text_chunk_size_cap: TEXT_CHUNK_SIZE_CAP,
            inter_chunk_delay: Duration::ZERO,
        }
    }
}

/// Contains config properties for the scene diff-sync loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneSyncConfig {
    /// Time between two diffs of the scene state
    pub interval: Duration,
}

impl Default for SceneSyncConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SCENE_SYNC_INTERVAL,
        }
    }
}
