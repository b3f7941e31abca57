use nvsync_shared::{
    AttrValue, Attributes, BufferTarget, CollectionKind, ManagedRecord, ObjectSource,
    SceneSource, TypedBuffer,
};

use crate::{error::RendererError, ops::SceneOps};

/// An object in the renderer's scene graph.
///
/// Its `id` is assigned by the renderer and never changes.
pub trait LiveObject: BufferTarget {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Attributes the renderer computed while loading, written back onto the
    /// host record
    fn derived_attributes(&self) -> Attributes;

    /// Binary attributes the host needs a copy of, e.g. decoded voxels
    fn outbound_buffers(&self) -> Vec<(String, TypedBuffer)> {
        Vec::new()
    }

    fn set_property(&mut self, attr: &str, value: &AttrValue) -> Result<(), RendererError>;
}

/// Identifies an asynchronous object construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

/// Result of asking the renderer to build an object
pub enum Materialization<O> {
    Ready(O),
    /// The object will be handed back later through
    /// [`Renderer::poll_loads`]
    Pending(LoadTicket),
}

/// An asynchronous construction that finished
pub struct CompletedLoad<O> {
    pub kind: CollectionKind,
    pub ticket: LoadTicket,
    pub result: Result<O, RendererError>,
}

/// Capabilities the session needs from the renderer
pub trait Renderer: SceneSource + SceneOps {
    type Object: LiveObject;

    /// Builds an object from a record's source. The object is not yet part of
    /// the scene.
    fn create_object_from_source(
        &mut self,
        kind: CollectionKind,
        record: &ManagedRecord,
        source: &ObjectSource,
    ) -> Result<Materialization<Self::Object>, RendererError>;

    /// Appends an object to a collection of the scene
    fn add_object(&mut self, kind: CollectionKind, object: Self::Object);

    fn remove_object(&mut self, kind: CollectionKind, id: &str) -> Option<Self::Object>;

    fn object_by_id(&self, kind: CollectionKind, id: &str) -> Option<&Self::Object>;

    fn object_by_id_mut(&mut self, kind: CollectionKind, id: &str) -> Option<&mut Self::Object>;

    /// Ids of a collection, in scene order
    fn live_ids(&self, kind: CollectionKind) -> Vec<String>;

    /// Replaces the order of a collection. Objects not listed are dropped.
    fn set_ordered_collection(&mut self, kind: CollectionKind, ids: &[String]);

    fn redraw(&mut self);

    /// Asynchronous constructions that finished since the last poll
    fn poll_loads(&mut self) -> Vec<CompletedLoad<Self::Object>> {
        Vec::new()
    }
}
