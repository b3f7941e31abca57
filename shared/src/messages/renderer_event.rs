use serde::{Deserialize, Serialize};

use crate::types::CollectionKind;

/// Domain event raised by the renderer and forwarded to the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RendererEvent {
    AzimuthElevationChange { azimuth: f64, elevation: f64 },
    FrameChange { id: String, frame_index: i64 },
    ImageLoaded { id: String },
    IntensityChange { id: String },
    MeshLoaded { id: String },
    VolumeAddedFromUrl { url: String, id: String },
    MeshAddedFromUrl { url: String, id: String },
}

impl RendererEvent {
    /// Renderer id of the object the event is about, if any
    pub fn object_id(&self) -> Option<&str> {
        match self {
            RendererEvent::AzimuthElevationChange { .. } => None,
            RendererEvent::FrameChange { id, .. }
            | RendererEvent::ImageLoaded { id }
            | RendererEvent::IntensityChange { id }
            | RendererEvent::MeshLoaded { id }
            | RendererEvent::VolumeAddedFromUrl { id, .. }
            | RendererEvent::MeshAddedFromUrl { id, .. } => Some(id),
        }
    }

    /// Collection holding the object the event is about, if any
    pub fn collection(&self) -> Option<CollectionKind> {
        match self {
            RendererEvent::AzimuthElevationChange { .. } => None,
            RendererEvent::FrameChange { .. }
            | RendererEvent::ImageLoaded { .. }
            | RendererEvent::IntensityChange { .. }
            | RendererEvent::VolumeAddedFromUrl { .. } => Some(CollectionKind::Volume),
            RendererEvent::MeshLoaded { .. } | RendererEvent::MeshAddedFromUrl { .. } => {
                Some(CollectionKind::Mesh)
            }
        }
    }
}
