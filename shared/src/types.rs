use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of the placeholder key given to a record or live object whose id
/// has not been assigned yet
pub const TEMP_KEY_PREFIX: &str = "__temp__";

/// Key used to index a record (or live object) during reconciliation: its id,
/// or `__temp__<index>` while the id is still empty
pub fn object_key(id: &str, index: usize) -> String {
    if id.is_empty() {
        format!("{}{}", TEMP_KEY_PREFIX, index)
    } else {
        id.to_string()
    }
}

/// One of the managed collections mirrored between host and renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Volume,
    Mesh,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Volume, CollectionKind::Mesh];

    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Volume => "volume",
            CollectionKind::Mesh => "mesh",
        }
    }

    /// Name of the host attribute holding this collection
    pub fn collection_name(&self) -> &'static str {
        match self {
            CollectionKind::Volume => "volumes",
            CollectionKind::Mesh => "meshes",
        }
    }

    /// Message key used by the renderer to announce a locally created object
    pub fn add_message_key(&self) -> &'static str {
        match self {
            CollectionKind::Volume => "add_volume",
            CollectionKind::Mesh => "add_mesh",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable host-assigned identity of a record.
///
/// Unlike the renderer-assigned `id`, a handle exists from the moment the
/// record is created, so write-backs and transfers can address it early.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordHandle(String);

impl RecordHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
