use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::types::RecordHandle;

use super::error::ChunkError;

/// Payload of one chunk: raw bytes, or base64 text on transports without
/// binary frames
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkPayload {
    Binary(Vec<u8>),
    Base64(String),
}

impl ChunkPayload {
    pub fn encode(bytes: &[u8], as_text: bool) -> Self {
        if as_text {
            ChunkPayload::Base64(STANDARD.encode(bytes))
        } else {
            ChunkPayload::Binary(bytes.to_vec())
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ChunkPayload::Base64(_))
    }
}

/// One slice of a chunked transfer of the attribute `attr`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMessage {
    pub attr: String,
    pub chunk_index: u32,
    pub total_chunks: u32,
    pub data_type: String,
    pub chunk: ChunkPayload,
}

impl ChunkMessage {
    /// Message key this chunk is sent under, `chunk_<attr>_<index>`
    pub fn key(&self) -> String {
        format!("chunk_{}_{}", self.attr, self.chunk_index)
    }

    /// Raw bytes carried by this chunk
    pub fn decode_payload(&self) -> Result<Vec<u8>, ChunkError> {
        match &self.chunk {
            ChunkPayload::Binary(bytes) => Ok(bytes.clone()),
            ChunkPayload::Base64(text) => {
                STANDARD
                    .decode(text)
                    .map_err(|error| ChunkError::InvalidBase64 {
                        attr: self.attr.clone(),
                        chunk_index: self.chunk_index,
                        reason: error.to_string(),
                    })
            }
        }
    }
}

/// A chunk addressed to the record it belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkEnvelope {
    pub target: RecordHandle,
    pub chunk: ChunkMessage,
}
