//! # nvsync Client
//! Renderer-side session that keeps a live scene converged with the
//! host's record collections.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use nvsync_shared::{
    AttrValue, Attributes, Channel, ChannelError, CollectionKind, CustomOp, HostMessage, Instant,
    ManagedRecord, ObjectSource, RecordHandle, RendererEvent, RendererMessage, SceneSnapshot,
    SceneSource,
};

mod bindings;
mod client_config;
mod error;
mod ops;
mod reconciler;
mod registry;
mod renderer;
mod session;

pub use bindings::PropertyBindings;
pub use client_config::ClientConfig;
pub use error::{ClientError, ReconcileError, RendererError};
pub use ops::{dispatch_op, DrawingCommand, SaveRequest, SceneOps};
pub use reconciler::{
    CollectionReconciler, LoadOutcome, OutboundBuffer, PendingIds, ReconcileReport, RecordFailure,
};
pub use registry::SessionRegistry;
pub use renderer::{CompletedLoad, LiveObject, LoadTicket, Materialization, Renderer};
pub use session::RendererSession;
