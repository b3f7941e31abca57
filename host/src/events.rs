use std::collections::VecDeque;

use nvsync_shared::{CollectionKind, RecordHandle};

/// Something the renderer did that the host application may react to
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// The renderer created an object and a record was added for it
    ObjectAdded {
        collection: CollectionKind,
        handle: RecordHandle,
        index: usize,
    },
    /// A record received its renderer id and derived attributes
    RecordSynced {
        collection: CollectionKind,
        handle: RecordHandle,
        id: String,
    },
    /// A chunked buffer transfer from the renderer completed
    BufferReceived { handle: RecordHandle, attr: String },
    /// Scene state changed; carries the wire names of the changed fields
    SceneChanged { fields: Vec<&'static str> },
    AzimuthElevationChanged { azimuth: f64, elevation: f64 },
    FrameChanged {
        handle: Option<RecordHandle>,
        id: String,
        frame_index: i64,
    },
    ImageLoaded {
        handle: Option<RecordHandle>,
        id: String,
    },
    IntensityChanged {
        handle: Option<RecordHandle>,
        id: String,
    },
    MeshLoaded {
        handle: Option<RecordHandle>,
        id: String,
    },
    VolumeAddedFromUrl { url: String, id: String },
    MeshAddedFromUrl { url: String, id: String },
}

/// Queue of [`HostEvent`]s, filled while receiving and drained by the
/// application
#[derive(Default)]
pub struct Events {
    queue: VecDeque<HostEvent>,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn push(&mut self, event: HostEvent) {
        self.queue.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Removes and returns every queued event, oldest first
    pub fn take_all(&mut self) -> Vec<HostEvent> {
        self.queue.drain(..).collect()
    }
}
