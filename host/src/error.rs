use thiserror::Error;

use nvsync_shared::{
    ChannelError, ChunkError, CollectionKind, PatchError, ProtocolError, RecordHandle,
};

/// Errors that can occur while the Host manages its collections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No record with this handle in any collection
    #[error("No record with handle {handle}")]
    UnknownRecord { handle: RecordHandle },

    /// Requested position is past the end of the collection
    #[error("Index {index} is out of range for the {collection} collection of length {len}")]
    IndexOutOfRange {
        collection: CollectionKind,
        index: usize,
        len: usize,
    },

    /// Attribute exists but does not hold a typed buffer
    #[error("Attribute {attr:?} of record {handle} is not a typed buffer")]
    NotABuffer { handle: RecordHandle, attr: String },

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Chunk error: {0}")]
    Chunk(#[from] ChunkError),

    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}
