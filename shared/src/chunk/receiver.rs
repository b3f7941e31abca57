use std::collections::{BTreeMap, HashMap};

use log::info;

use crate::{
    buffer::{DType, TypedBuffer},
    types::RecordHandle,
};

use super::{error::ChunkError, message::ChunkEnvelope};

/// A transfer whose chunks have all arrived
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedTransfer {
    pub target: RecordHandle,
    pub attr: String,
    pub buffer: TypedBuffer,
}

struct IncomingTransfer {
    total_chunks: u32,
    data_type: String,
    dtype: DType,
    chunks: BTreeMap<u32, Vec<u8>>,
}

impl IncomingTransfer {
    fn new(total_chunks: u32, data_type: &str, dtype: DType) -> Self {
        Self {
            total_chunks,
            data_type: data_type.to_string(),
            dtype,
            chunks: BTreeMap::new(),
        }
    }

    fn has_first_chunk(&self) -> bool {
        self.chunks.contains_key(&0)
    }

    // indices are checked against the total on arrival, so a full map holds
    // every index exactly once
    fn is_complete(&self) -> bool {
        self.chunks.len() as u64 == u64::from(self.total_chunks)
    }
}

/// Reassembles chunked transfers, one per (record, attribute)
#[derive(Default)]
pub struct ChunkReceiver {
    transfers: HashMap<(RecordHandle, String), IncomingTransfer>,
}

impl ChunkReceiver {
    pub fn new() -> Self {
        Self {
            transfers: HashMap::new(),
        }
    }

    /// Accepts one chunk.
    ///
    /// Returns `Ok(None)` while more chunks are needed, and the rebuilt
    /// typed buffer once every index `0..total_chunks` has been seen. A
    /// rejected chunk leaves the transfer in progress untouched.
    pub fn receive(
        &mut self,
        envelope: ChunkEnvelope,
    ) -> Result<Option<CompletedTransfer>, ChunkError> {
        let ChunkEnvelope { target, chunk } = envelope;
        if chunk.total_chunks == 0 {
            return Err(ChunkError::InvalidTotal {
                attr: chunk.attr,
                total_chunks: chunk.total_chunks,
            });
        }
        if chunk.chunk_index >= chunk.total_chunks {
            return Err(ChunkError::IndexOutOfRange {
                attr: chunk.attr,
                chunk_index: chunk.chunk_index,
                total_chunks: chunk.total_chunks,
            });
        }
        let dtype: DType = chunk.data_type.parse()?;
        let bytes = chunk.decode_payload()?;

        let key = (target, chunk.attr);
        let restart = chunk.chunk_index == 0
            && self
                .transfers
                .get(&key)
                .is_some_and(IncomingTransfer::has_first_chunk);
        if restart {
            info!(
                "Restarting chunked transfer of {:?} for record {}",
                key.1, key.0
            );
            self.transfers.remove(&key);
        }

        let transfer = self
            .transfers
            .entry(key.clone())
            .or_insert_with(|| IncomingTransfer::new(chunk.total_chunks, &chunk.data_type, dtype));

        if transfer.total_chunks != chunk.total_chunks {
            return Err(ChunkError::TotalMismatch {
                attr: key.1,
                expected: transfer.total_chunks,
                received: chunk.total_chunks,
            });
        }
        if transfer.data_type != chunk.data_type {
            return Err(ChunkError::DataTypeMismatch {
                attr: key.1,
                expected: transfer.data_type.clone(),
                received: chunk.data_type,
            });
        }
        if transfer.chunks.contains_key(&chunk.chunk_index) {
            return Err(ChunkError::DuplicateChunk {
                attr: key.1,
                chunk_index: chunk.chunk_index,
            });
        }
        transfer.chunks.insert(chunk.chunk_index, bytes);
        if !transfer.is_complete() {
            return Ok(None);
        }

        let Some(transfer) = self.transfers.remove(&key) else {
            return Ok(None);
        };
        let bytes: Vec<u8> = transfer.chunks.into_values().flatten().collect();
        let buffer = TypedBuffer::from_bytes(transfer.dtype, &bytes)?;
        let (target, attr) = key;
        Ok(Some(CompletedTransfer {
            target,
            attr,
            buffer,
        }))
    }

    /// Drops every partial transfer addressed to `target`
    pub fn cancel(&mut self, target: &RecordHandle) -> usize {
        let before = self.transfers.len();
        self.transfers.retain(|(handle, _), _| handle != target);
        before - self.transfers.len()
    }

    /// Number of transfers still waiting for chunks
    pub fn in_progress(&self) -> usize {
        self.transfers.len()
    }
}
