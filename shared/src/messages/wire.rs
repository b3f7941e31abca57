use serde::{Deserialize, Serialize};

use crate::{
    buffer::{BufferPatchMessage, EncodedPatch},
    chunk::ChunkEnvelope,
    record::{AttrValue, Attributes, ManagedRecord},
    scene::SceneDelta,
    types::{CollectionKind, RecordHandle},
};

use super::{custom_op::CustomOp, error::ProtocolError, renderer_event::RendererEvent};

/// Messages sent from the host to the renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage {
    /// The whole collection, after any add, remove or reorder
    CollectionChanged {
        collection: CollectionKind,
        records: Vec<ManagedRecord>,
    },
    /// A scalar attribute of one record changed
    AttrChanged {
        handle: RecordHandle,
        attr: String,
        value: AttrValue,
    },
    /// A typed-buffer attribute of one record is patched
    BufferPatch {
        handle: RecordHandle,
        patch: BufferPatchMessage,
        buffers: Vec<Vec<u8>>,
    },
    Op { op: CustomOp },
    Chunk(ChunkEnvelope),
}

impl HostMessage {
    pub fn buffer_patch(handle: RecordHandle, patch: EncodedPatch) -> Self {
        HostMessage::BufferPatch {
            handle,
            patch: patch.message,
            buffers: patch.buffers,
        }
    }
}

/// Announcement of an object the renderer created on its own, sent under
/// `add_<kind>`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddObjectAnnouncement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
    /// Requested position in the collection. Out-of-range or missing means
    /// append.
    #[serde(default)]
    pub index: Option<i64>,
}

/// Renderer-assigned identity and derived attributes written back onto a
/// record after it was materialized
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSync {
    pub handle: RecordHandle,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Messages sent from the renderer to the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RendererMessage {
    AddObject {
        collection: CollectionKind,
        object: AddObjectAnnouncement,
    },
    RecordSync {
        collection: CollectionKind,
        sync: RecordSync,
    },
    Chunk(ChunkEnvelope),
    Scene { scene: SceneDelta },
    Event { event: RendererEvent },
}

impl From<ChunkEnvelope> for HostMessage {
    fn from(envelope: ChunkEnvelope) -> Self {
        HostMessage::Chunk(envelope)
    }
}

impl From<ChunkEnvelope> for RendererMessage {
    fn from(envelope: ChunkEnvelope) -> Self {
        RendererMessage::Chunk(envelope)
    }
}

impl From<SceneDelta> for RendererMessage {
    fn from(scene: SceneDelta) -> Self {
        RendererMessage::Scene { scene }
    }
}

impl From<RendererEvent> for RendererMessage {
    fn from(event: RendererEvent) -> Self {
        RendererMessage::Event { event }
    }
}

fn malformed(error: serde_json::Error) -> ProtocolError {
    ProtocolError::MalformedMessage {
        reason: error.to_string(),
    }
}

impl HostMessage {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(malformed)
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(malformed)
    }
}

impl RendererMessage {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(malformed)
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(malformed)
    }
}
