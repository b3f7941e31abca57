use thiserror::Error;

use crate::buffer::BufferError;

/// Errors that can occur while splitting or reassembling a chunked transfer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    /// The reassembled bytes could not be turned into a typed buffer
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// A chunk announced a transfer with no chunks
    #[error("Chunk for attribute {attr:?} announces an invalid total of {total_chunks} chunks")]
    InvalidTotal { attr: String, total_chunks: u32 },

    /// Chunk index not below the announced total
    #[error("Chunk index {chunk_index} for attribute {attr:?} is out of range for a transfer of {total_chunks} chunks")]
    IndexOutOfRange {
        attr: String,
        chunk_index: u32,
        total_chunks: u32,
    },

    /// Same chunk index received twice within one transfer
    #[error("Duplicate chunk {chunk_index} for attribute {attr:?}")]
    DuplicateChunk { attr: String, chunk_index: u32 },

    /// Chunk disagrees with the transfer in progress about the total
    #[error("Chunk for attribute {attr:?} announces {received} chunks but the transfer in progress has {expected}")]
    TotalMismatch {
        attr: String,
        expected: u32,
        received: u32,
    },

    /// Chunk disagrees with the transfer in progress about the data type
    #[error("Chunk for attribute {attr:?} has data type {received:?} but the transfer in progress has {expected:?}")]
    DataTypeMismatch {
        attr: String,
        expected: String,
        received: String,
    },

    /// Text chunk payload was not valid base64
    #[error("Chunk {chunk_index} for attribute {attr:?} is not valid base64: {reason}")]
    InvalidBase64 {
        attr: String,
        chunk_index: u32,
        reason: String,
    },

    /// Payload needs more chunks than a chunk index can count
    #[error("Transfer of attribute {attr:?} would need {total_chunks} chunks. Increase the chunk size")]
    TransferTooLarge { attr: String, total_chunks: usize },
}
