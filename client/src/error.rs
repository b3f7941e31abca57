use thiserror::Error;

use nvsync_shared::{
    ChannelError, ChunkError, CollectionKind, PatchError, ProtocolError, RecordHandle,
};

/// Errors reported by a [`Renderer`](crate::Renderer) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendererError {
    /// The renderer cannot construct an object from this kind of source
    #[error("Cannot create a {kind} from a {source_kind} source")]
    UnsupportedSource {
        kind: CollectionKind,
        source_kind: String,
    },

    /// Decoding or fetching the object's data failed
    #[error("Failed to load {kind} {name:?}: {reason}")]
    LoadFailed {
        kind: CollectionKind,
        name: String,
        reason: String,
    },

    /// No live object with this id
    #[error("No live {kind} with id {id:?}")]
    ObjectNotFound { kind: CollectionKind, id: String },

    /// The object rejected a property value
    #[error("Live object {id:?} rejected property {attr:?}: {reason}")]
    InvalidProperty {
        id: String,
        attr: String,
        reason: String,
    },

    /// An op the renderer does not support
    #[error("Operation {op} is not supported by this renderer")]
    UnsupportedOp { op: String },
}

/// Errors isolated to a single record during reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Record carries no source an object could be built from
    #[error("Record {handle} ({key}) has no usable source")]
    MissingSource { key: String, handle: RecordHandle },

    /// The renderer failed to construct the object
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
}

/// Errors surfaced by a [`RendererSession`](crate::RendererSession)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Chunk error: {0}")]
    Chunk(#[from] ChunkError),

    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    /// A message addressed a record the session does not know
    #[error("No record with handle {handle} in any collection")]
    UnknownRecord { handle: RecordHandle },
}
