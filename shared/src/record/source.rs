use serde::{Deserialize, Serialize};

/// Where a renderer object is constructed from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ObjectSource {
    /// File contents read on the host, with the original file name
    Path { name: String, data: Vec<u8> },
    /// Remote location fetched by the renderer
    Url { url: String },
    /// Bytes already in memory, e.g. a generated image
    RawData { data: Vec<u8> },
    /// Object created by the renderer itself; the record only mirrors it
    FromRenderer,
}

/// Kind of an [`ObjectSource`], without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Path,
    Url,
    RawData,
    FromRenderer,
}

impl ObjectSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ObjectSource::Path { .. } => SourceKind::Path,
            ObjectSource::Url { .. } => SourceKind::Url,
            ObjectSource::RawData { .. } => SourceKind::RawData,
            ObjectSource::FromRenderer => SourceKind::FromRenderer,
        }
    }

    /// Whether the source carries enough to construct an object from
    pub fn is_usable(&self) -> bool {
        match self {
            ObjectSource::Path { data, .. } | ObjectSource::RawData { data } => !data.is_empty(),
            ObjectSource::Url { url } => !url.is_empty(),
            ObjectSource::FromRenderer => true,
        }
    }
}
