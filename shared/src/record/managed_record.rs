use serde::{Deserialize, Serialize};

use crate::types::{object_key, RecordHandle};

use super::{
    attr_value::{AttrValue, Attributes},
    source::{ObjectSource, SourceKind},
};

/// A host-owned record describing one object of a managed collection.
///
/// `id` stays empty until the renderer materializes the record and writes the
/// assigned id back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManagedRecord {
    handle: RecordHandle,
    id: String,
    name: String,
    source: Option<ObjectSource>,
    attributes: Attributes,
}

impl ManagedRecord {
    pub fn new(handle: RecordHandle, source: Option<ObjectSource>) -> Self {
        Self {
            handle,
            id: String::new(),
            name: String::new(),
            source,
            attributes: Attributes::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn handle(&self) -> &RecordHandle {
        &self.handle
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn source(&self) -> Option<&ObjectSource> {
        self.source.as_ref()
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source.as_ref().map(ObjectSource::kind)
    }

    pub fn is_from_renderer(&self) -> bool {
        matches!(self.source, Some(ObjectSource::FromRenderer))
    }

    /// The record's source, if it can be used to construct an object
    pub fn usable_source(&self) -> Option<&ObjectSource> {
        self.source.as_ref().filter(|source| source.is_usable())
    }

    /// Reconciliation key of this record at position `index`
    pub fn key(&self, index: usize) -> String {
        object_key(&self.id, index)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Overwrites the given attributes, leaving others in place
    pub fn merge_attributes<I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (String, AttrValue)>,
    {
        self.attributes.extend(attributes);
    }
}
