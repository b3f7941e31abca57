mod error;
mod message;
mod receiver;
mod sender;

pub use error::ChunkError;
pub use message::{ChunkEnvelope, ChunkMessage, ChunkPayload};
pub use receiver::{ChunkReceiver, CompletedTransfer};
pub use sender::{send_chunked, ChunkSender, ChunkTransfer, TransferOutcome, TransferStatus};
