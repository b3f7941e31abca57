mod diff_sync_loop;
mod snapshot;

pub use diff_sync_loop::{DiffSyncLoop, SceneSource};
pub use snapshot::{diff, SceneDelta, SceneField, SceneSnapshot};
