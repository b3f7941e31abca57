use std::collections::VecDeque;

use log::{info, warn};

use crate::{
    backends::{Instant, Timer},
    buffer::TypedBuffer,
    channel::Channel,
    config::ChunkConfig,
    types::RecordHandle,
};

use super::{
    error::ChunkError,
    message::{ChunkEnvelope, ChunkMessage, ChunkPayload},
};

/// How a queued transfer ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferStatus {
    /// Every chunk was handed to the channel
    Completed { total_chunks: u32 },
    /// The channel went away part way; the receiver never completes
    Aborted { sent: u32, total_chunks: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferOutcome {
    pub target: RecordHandle,
    pub attr: String,
    pub status: TransferStatus,
}

/// An outgoing transfer of one attribute, split into fixed-size slices
pub struct ChunkTransfer {
    target: RecordHandle,
    attr: String,
    data_type: String,
    bytes: Vec<u8>,
    chunk_size: usize,
    total_chunks: u32,
    next_index: u32,
    as_text: bool,
}

impl ChunkTransfer {
    pub fn new(
        target: RecordHandle,
        attr: &str,
        buffer: &TypedBuffer,
        chunk_size: usize,
        as_text: bool,
    ) -> Result<Self, ChunkError> {
        let bytes = buffer.to_bytes();
        let chunk_size = chunk_size.max(1);
        let total = bytes.len().div_ceil(chunk_size);
        let total_chunks = u32::try_from(total).map_err(|_| ChunkError::TransferTooLarge {
            attr: attr.to_string(),
            total_chunks: total,
        })?;
        Ok(Self {
            target,
            attr: attr.to_string(),
            data_type: buffer.dtype().to_string(),
            bytes,
            chunk_size,
            total_chunks,
            next_index: 0,
            as_text,
        })
    }

    pub fn total_chunks(&self) -> u32 {
        self.total_chunks
    }

    pub fn sent(&self) -> u32 {
        self.next_index
    }

    pub fn is_done(&self) -> bool {
        self.next_index >= self.total_chunks
    }

    /// Builds the next chunk without advancing
    fn peek_chunk(&self) -> Option<ChunkEnvelope> {
        if self.is_done() {
            return None;
        }
        let offset = self.next_index as usize * self.chunk_size;
        let end = (offset + self.chunk_size).min(self.bytes.len());
        Some(ChunkEnvelope {
            target: self.target.clone(),
            chunk: ChunkMessage {
                attr: self.attr.clone(),
                chunk_index: self.next_index,
                total_chunks: self.total_chunks,
                data_type: self.data_type.clone(),
                chunk: ChunkPayload::encode(&self.bytes[offset..end], self.as_text),
            },
        })
    }

    /// Sends the next chunk. Returns `false` if the channel is not live or
    /// refused the chunk, in which case the transfer must be aborted.
    fn send_next<M, C>(&mut self, channel: &mut C) -> bool
    where
        M: From<ChunkEnvelope>,
        C: Channel<M> + ?Sized,
    {
        if !channel.is_live() {
            return false;
        }
        let Some(envelope) = self.peek_chunk() else {
            return true;
        };
        if let Err(error) = channel.send(M::from(envelope)) {
            warn!(
                "Chunk {} of {:?} for record {} failed to send: {}",
                self.next_index, self.attr, self.target, error
            );
            return false;
        }
        self.next_index += 1;
        true
    }

    fn outcome(&self, status: TransferStatus) -> TransferOutcome {
        TransferOutcome {
            target: self.target.clone(),
            attr: self.attr.clone(),
            status,
        }
    }

    fn aborted(&self) -> TransferOutcome {
        warn!(
            "Chunked transfer of {:?} for record {} aborted after {}/{} chunks: channel not live",
            self.attr, self.target, self.next_index, self.total_chunks
        );
        self.outcome(TransferStatus::Aborted {
            sent: self.next_index,
            total_chunks: self.total_chunks,
        })
    }

    fn completed(&self) -> TransferOutcome {
        self.outcome(TransferStatus::Completed {
            total_chunks: self.total_chunks,
        })
    }
}

/// Sends a whole transfer at once, checking liveness before every chunk.
///
/// A zero-length buffer sends nothing and completes with zero chunks.
pub fn send_chunked<M, C>(
    channel: &mut C,
    target: RecordHandle,
    attr: &str,
    buffer: &TypedBuffer,
    config: &ChunkConfig,
) -> Result<TransferStatus, ChunkError>
where
    M: From<ChunkEnvelope>,
    C: Channel<M> + ?Sized,
{
    let binary = channel.supports_binary();
    let mut transfer = ChunkTransfer::new(
        target,
        attr,
        buffer,
        config.effective_chunk_size(binary),
        !binary,
    )?;
    while !transfer.is_done() {
        if !transfer.send_next(channel) {
            return Ok(transfer.aborted().status);
        }
    }
    Ok(transfer.completed().status)
}

/// Queue of outgoing chunked transfers, drained by polling.
///
/// With no inter-chunk delay every queued transfer drains completely on the
/// next poll. Otherwise one chunk is sent each time the delay elapses, taking
/// turns between queued transfers.
pub struct ChunkSender {
    config: ChunkConfig,
    queue: VecDeque<ChunkTransfer>,
    delay_timer: Option<Timer>,
}

impl ChunkSender {
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            delay_timer: None,
        }
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Queues `buffer` to be sent as the attribute `attr` of `target`.
    /// Returns the number of chunks the transfer was split into.
    pub fn queue(
        &mut self,
        target: RecordHandle,
        attr: &str,
        buffer: &TypedBuffer,
        supports_binary: bool,
    ) -> Result<u32, ChunkError> {
        let transfer = ChunkTransfer::new(
            target,
            attr,
            buffer,
            self.config.effective_chunk_size(supports_binary),
            !supports_binary,
        )?;
        let total_chunks = transfer.total_chunks();
        if total_chunks == 0 {
            return Ok(0);
        }
        self.queue.push_back(transfer);
        Ok(total_chunks)
    }

    /// Number of transfers not yet finished
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every queued transfer addressed to `target`
    pub fn cancel(&mut self, target: &RecordHandle) -> usize {
        let before = self.queue.len();
        self.queue.retain(|transfer| &transfer.target != target);
        before - self.queue.len()
    }

    /// Sends whatever is due at `now` and reports the transfers that ended
    pub fn send_ready<M, C>(&mut self, channel: &mut C, now: &Instant) -> Vec<TransferOutcome>
    where
        M: From<ChunkEnvelope>,
        C: Channel<M> + ?Sized,
    {
        let mut outcomes = Vec::new();
        if self.queue.is_empty() {
            return outcomes;
        }

        if self.config.inter_chunk_delay.is_zero() {
            while let Some(mut transfer) = self.queue.pop_front() {
                let mut live = true;
                while !transfer.is_done() {
                    if !transfer.send_next(channel) {
                        live = false;
                        break;
                    }
                }
                if live {
                    outcomes.push(transfer.completed());
                } else {
                    outcomes.push(transfer.aborted());
                }
            }
            return outcomes;
        }

        if let Some(timer) = &self.delay_timer {
            if !timer.ringing(now) {
                return outcomes;
            }
        }

        let Some(mut transfer) = self.queue.pop_front() else {
            return outcomes;
        };
        if !transfer.send_next(channel) {
            outcomes.push(transfer.aborted());
            return outcomes;
        }
        match self.delay_timer.as_mut() {
            Some(timer) => timer.reset(now),
            None => self.delay_timer = Some(Timer::new(self.config.inter_chunk_delay, now)),
        }
        if transfer.is_done() {
            info!(
                "Chunked transfer of {:?} for record {} completed ({} chunks)",
                transfer.attr, transfer.target, transfer.total_chunks
            );
            outcomes.push(transfer.completed());
        } else {
            self.queue.push_back(transfer);
        }
        outcomes
    }
}
