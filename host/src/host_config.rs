use std::default::Default;

use nvsync_shared::ChunkConfig;

/// Contains Config properties which will be used by the Host
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Used to configure chunked transfers of large buffers to the renderer
    pub chunk: ChunkConfig,
}
