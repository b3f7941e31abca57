//! # nvsync Host
//! Authoritative owner of the record collections a remote renderer mirrors.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use nvsync_shared::{
    AttrValue, Attributes, Channel, ChannelError, CollectionKind, CustomOp, HostMessage, Instant,
    ManagedRecord, ObjectSource, RecordHandle, RendererEvent, RendererMessage, SceneSnapshot,
    TransferOutcome, TransferStatus, TypedBuffer,
};

mod collection;
mod error;
mod events;
mod host;
mod host_config;

pub use collection::Collection;
pub use error::HostError;
pub use events::{Events, HostEvent};
pub use host::Host;
pub use host_config::HostConfig;
