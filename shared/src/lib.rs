//! # nvsync Shared
//! Common functionality shared between nvsync-host & nvsync-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod backends;
mod buffer;
mod channel;
mod chunk;
mod config;
mod disposer;
mod messages;
mod record;
mod scene;
mod types;

pub use backends::{Instant, Timer};
pub use buffer::{
    apply_patch, apply_patch_with_commit, encode_change, encode_update, BufferError,
    BufferPatchMessage, BufferTarget, DType, Element, EncodedPatch, PatchError, TypedBuffer,
};
pub use channel::{Channel, ChannelError};
pub use chunk::{
    send_chunked, ChunkEnvelope, ChunkError, ChunkMessage, ChunkPayload, ChunkReceiver,
    ChunkSender, ChunkTransfer, CompletedTransfer, TransferOutcome, TransferStatus,
};
pub use config::{
    ChunkConfig, SceneSyncConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SCENE_SYNC_INTERVAL,
    TEXT_CHUNK_SIZE_CAP,
};
pub use disposer::{DisposeFn, Disposer};
pub use messages::{
    AddObjectAnnouncement, ColorMap, CustomOp, HostMessage, ProtocolError, RecordSync,
    RendererEvent, RendererMessage,
};
pub use record::{AttrValue, Attributes, ManagedRecord, ObjectSource, SourceKind};
pub use scene::{diff, DiffSyncLoop, SceneDelta, SceneField, SceneSnapshot, SceneSource};
pub use types::{object_key, CollectionKind, RecordHandle, TEMP_KEY_PREFIX};
