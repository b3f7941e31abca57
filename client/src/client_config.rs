use std::default::Default;

use nvsync_shared::{ChunkConfig, SceneSyncConfig};

/// Contains Config properties which will be used by a renderer session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Used to configure chunked transfers of derived buffers back to the host
    pub chunk: ChunkConfig,
    /// Used to configure how often scene state is mirrored to the host
    pub scene_sync: SceneSyncConfig,
}
