use std::collections::BTreeMap;

use log::{info, warn};
use uuid::Uuid;

use nvsync_shared::{
    apply_patch, encode_change, encode_update, AddObjectAnnouncement, AttrValue, Attributes,
    Channel, ChunkReceiver, ChunkSender, CollectionKind, CustomOp, HostMessage, Instant,
    ManagedRecord, ObjectSource, RecordHandle, RecordSync, RendererEvent, RendererMessage,
    SceneSnapshot, TransferOutcome, TransferStatus, TypedBuffer,
};

use crate::{
    collection::Collection,
    error::HostError,
    events::{Events, HostEvent},
    host_config::HostConfig,
};

/// Owns the authoritative record collections and mirrors them into a remote
/// renderer over a [`Channel`]
pub struct Host<C: Channel<HostMessage>> {
    channel: C,
    collections: BTreeMap<CollectionKind, Collection>,
    scene: SceneSnapshot,
    chunk_sender: ChunkSender,
    chunk_receiver: ChunkReceiver,
    events: Events,
}

impl<C: Channel<HostMessage>> Host<C> {
    /// Create a new Host
    pub fn new(config: HostConfig, channel: C) -> Self {
        let collections = CollectionKind::ALL
            .iter()
            .map(|kind| (*kind, Collection::new(*kind)))
            .collect();

        Self {
            channel,
            collections,
            scene: SceneSnapshot::default(),
            chunk_sender: ChunkSender::new(config.chunk),
            chunk_receiver: ChunkReceiver::new(),
            events: Events::new(),
        }
    }

    // Collections

    /// Appends a new record to the collection and publishes it
    pub fn add(
        &mut self,
        kind: CollectionKind,
        source: ObjectSource,
        name: &str,
        attributes: Attributes,
    ) -> Result<RecordHandle, HostError> {
        let handle = new_handle();
        let mut record = ManagedRecord::new(handle.clone(), Some(source)).with_name(name);
        record.merge_attributes(attributes);
        self.collection_mut(kind).push(record);
        self.publish(kind)?;
        Ok(handle)
    }

    /// Replaces the whole collection with records built from `sources`
    pub fn load(
        &mut self,
        kind: CollectionKind,
        sources: Vec<(ObjectSource, String)>,
    ) -> Result<Vec<RecordHandle>, HostError> {
        let records: Vec<ManagedRecord> = sources
            .into_iter()
            .map(|(source, name)| ManagedRecord::new(new_handle(), Some(source)).with_name(name))
            .collect();
        let handles = records
            .iter()
            .map(|record| record.handle().clone())
            .collect();

        let previous: Vec<RecordHandle> = self
            .collection(kind)
            .iter()
            .map(|record| record.handle().clone())
            .collect();
        for handle in &previous {
            self.forget_transfers(handle);
        }
        self.collection_mut(kind).replace_all(records);
        self.publish(kind)?;
        Ok(handles)
    }

    pub fn remove_record(&mut self, handle: &RecordHandle) -> Result<ManagedRecord, HostError> {
        let kind = self.kind_of(handle)?;
        let record = self
            .collection_mut(kind)
            .remove(handle)
            .ok_or_else(|| unknown(handle))?;
        self.forget_transfers(handle);
        self.publish(kind)?;
        Ok(record)
    }

    /// Moves a record to position `to` within its collection
    pub fn move_record(&mut self, handle: &RecordHandle, to: usize) -> Result<(), HostError> {
        let kind = self.kind_of(handle)?;
        let collection = self.collection_mut(kind);
        let len = collection.len();
        collection
            .move_to(handle, to)
            .ok_or(HostError::IndexOutOfRange {
                collection: kind,
                index: to,
                len,
            })?;
        self.publish(kind)
    }

    /// Sends the full collection to the renderer, which reconciles it
    pub fn publish(&mut self, kind: CollectionKind) -> Result<(), HostError> {
        let records = self.collection(kind).to_vec();
        self.channel.send(HostMessage::CollectionChanged {
            collection: kind,
            records,
        })?;
        Ok(())
    }

    // Attributes

    pub fn set_attribute(
        &mut self,
        handle: &RecordHandle,
        attr: &str,
        value: impl Into<AttrValue>,
    ) -> Result<(), HostError> {
        let value = value.into();
        self.record_mut(handle)?.set_attribute(attr, value.clone());
        self.channel.send(HostMessage::AttrChanged {
            handle: handle.clone(),
            attr: attr.to_string(),
            value,
        })?;
        Ok(())
    }

    /// Replaces a buffer attribute wholesale
    pub fn send_buffer_change(
        &mut self,
        handle: &RecordHandle,
        attr: &str,
        buffer: TypedBuffer,
    ) -> Result<(), HostError> {
        let patch = encode_change(attr, &buffer);
        self.record_mut(handle)?.set_attribute(attr, buffer);
        self.channel
            .send(HostMessage::buffer_patch(handle.clone(), patch))?;
        Ok(())
    }

    /// Overwrites the elements at `indices` of a buffer attribute with
    /// `values`. The local copy is patched too; returns whether it was.
    pub fn send_buffer_update(
        &mut self,
        handle: &RecordHandle,
        attr: &str,
        indices: &TypedBuffer,
        values: &TypedBuffer,
    ) -> Result<bool, HostError> {
        let patch = encode_update(attr, indices, values)?;
        let record = self.record_mut(handle)?;
        let applied = apply_patch(record.attributes_mut(), &patch.message, &patch.buffers)?;
        self.channel
            .send(HostMessage::buffer_patch(handle.clone(), patch))?;
        Ok(applied)
    }

    /// Queues a buffer attribute to be sent in chunks; they go out on
    /// [`Host::update`]. Returns the number of chunks.
    pub fn send_buffer_chunked(
        &mut self,
        handle: &RecordHandle,
        attr: &str,
    ) -> Result<u32, HostError> {
        let record = self.record(handle).ok_or_else(|| unknown(handle))?;
        let buffer = record
            .attribute(attr)
            .and_then(AttrValue::as_buffer)
            .ok_or_else(|| HostError::NotABuffer {
                handle: handle.clone(),
                attr: attr.to_string(),
            })?
            .clone();
        let supports_binary = self.channel.supports_binary();
        Ok(self
            .chunk_sender
            .queue(handle.clone(), attr, &buffer, supports_binary)?)
    }

    pub fn send_op(&mut self, op: CustomOp) -> Result<(), HostError> {
        self.channel.send(HostMessage::Op { op })?;
        Ok(())
    }

    // Incoming

    /// Applies a message from the renderer
    pub fn receive_message(&mut self, message: RendererMessage) -> Result<(), HostError> {
        match message {
            RendererMessage::AddObject { collection, object } => {
                self.add_from_renderer(collection, object)
            }
            RendererMessage::RecordSync { collection, sync } => {
                self.apply_record_sync(collection, sync)
            }
            RendererMessage::Chunk(envelope) => {
                let Some(completed) = self.chunk_receiver.receive(envelope)? else {
                    return Ok(());
                };
                let Ok(record) = self.record_mut(&completed.target) else {
                    warn!(
                        "Host: dropping chunked {:?} for unknown record {}",
                        completed.attr, completed.target
                    );
                    return Ok(());
                };
                record.set_attribute(completed.attr.clone(), completed.buffer);
                self.events.push(HostEvent::BufferReceived {
                    handle: completed.target,
                    attr: completed.attr,
                });
                Ok(())
            }
            RendererMessage::Scene { scene } => {
                self.scene.apply(&scene);
                let fields = scene.changed_fields();
                if !fields.is_empty() {
                    self.events.push(HostEvent::SceneChanged { fields });
                }
                Ok(())
            }
            RendererMessage::Event { event } => {
                let event = self.resolve_event(event);
                self.events.push(event);
                Ok(())
            }
        }
    }

    /// Sends chunks that are due at `now`
    pub fn update(&mut self, now: &Instant) -> Vec<TransferOutcome> {
        let outcomes = self
            .chunk_sender
            .send_ready::<HostMessage, C>(&mut self.channel, now);
        for outcome in &outcomes {
            if let TransferStatus::Aborted { sent, total_chunks } = outcome.status {
                warn!(
                    "Host: transfer of {:?} to {} aborted after {}/{} chunks",
                    outcome.attr, outcome.target, sent, total_chunks
                );
            }
        }
        outcomes
    }

    // Accessors

    pub fn collection(&self, kind: CollectionKind) -> &[ManagedRecord] {
        self.collections
            .get(&kind)
            .map(Collection::records)
            .unwrap_or_default()
    }

    pub fn record(&self, handle: &RecordHandle) -> Option<&ManagedRecord> {
        self.collections
            .values()
            .find_map(|collection| collection.get(handle))
    }

    /// Looks up a record by its renderer-assigned id
    pub fn record_by_id(&self, kind: CollectionKind, id: &str) -> Option<&ManagedRecord> {
        if id.is_empty() {
            return None;
        }
        let records = self.collection(kind);
        records.iter().find(|record| record.id() == id)
    }

    /// Scene state as last reported by the renderer
    pub fn scene(&self) -> &SceneSnapshot {
        &self.scene
    }

    pub fn events(&mut self) -> &mut Events {
        &mut self.events
    }

    pub fn take_events(&mut self) -> Vec<HostEvent> {
        self.events.take_all()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Number of outbound chunk transfers not yet finished
    pub fn pending_transfers(&self) -> usize {
        self.chunk_sender.pending()
    }

    // Private

    fn add_from_renderer(
        &mut self,
        kind: CollectionKind,
        object: AddObjectAnnouncement,
    ) -> Result<(), HostError> {
        if self.record_by_id(kind, &object.id).is_some() {
            warn!(
                "Host: renderer announced {} {:?} which is already tracked",
                kind, object.id
            );
            return Ok(());
        }

        let handle = new_handle();
        let mut record = ManagedRecord::new(handle.clone(), Some(ObjectSource::FromRenderer))
            .with_id(object.id)
            .with_name(object.name);
        record.merge_attributes(object.attributes);

        let index = self.collection_mut(kind).insert_at(object.index, record);
        info!("Host: renderer added {} at position {}", kind, index);
        self.events.push(HostEvent::ObjectAdded {
            collection: kind,
            handle,
            index,
        });
        self.publish(kind)
    }

    fn apply_record_sync(
        &mut self,
        kind: CollectionKind,
        sync: RecordSync,
    ) -> Result<(), HostError> {
        let Some(record) = self.collection_mut(kind).get_mut(&sync.handle) else {
            warn!(
                "Host: ignoring sync for {} {} which is no longer in the collection",
                kind, sync.handle
            );
            return Ok(());
        };
        record.set_id(sync.id.clone());
        if !sync.name.is_empty() {
            record.set_name(sync.name);
        }
        record.merge_attributes(sync.attributes);
        self.events.push(HostEvent::RecordSynced {
            collection: kind,
            handle: sync.handle,
            id: sync.id,
        });
        Ok(())
    }

    fn resolve_event(&self, event: RendererEvent) -> HostEvent {
        let handle = match (event.collection(), event.object_id()) {
            (Some(kind), Some(id)) => self
                .record_by_id(kind, id)
                .map(|record| record.handle().clone()),
            _ => None,
        };

        match event {
            RendererEvent::AzimuthElevationChange { azimuth, elevation } => {
                HostEvent::AzimuthElevationChanged { azimuth, elevation }
            }
            RendererEvent::FrameChange { id, frame_index } => HostEvent::FrameChanged {
                handle,
                id,
                frame_index,
            },
            RendererEvent::ImageLoaded { id } => HostEvent::ImageLoaded { handle, id },
            RendererEvent::IntensityChange { id } => HostEvent::IntensityChanged { handle, id },
            RendererEvent::MeshLoaded { id } => HostEvent::MeshLoaded { handle, id },
            RendererEvent::VolumeAddedFromUrl { url, id } => {
                HostEvent::VolumeAddedFromUrl { url, id }
            }
            RendererEvent::MeshAddedFromUrl { url, id } => HostEvent::MeshAddedFromUrl { url, id },
        }
    }

    fn forget_transfers(&mut self, handle: &RecordHandle) {
        self.chunk_sender.cancel(handle);
        self.chunk_receiver.cancel(handle);
    }

    fn kind_of(&self, handle: &RecordHandle) -> Result<CollectionKind, HostError> {
        self.collections
            .values()
            .find(|collection| collection.position(handle).is_some())
            .map(Collection::kind)
            .ok_or_else(|| unknown(handle))
    }

    fn record_mut(&mut self, handle: &RecordHandle) -> Result<&mut ManagedRecord, HostError> {
        self.collections
            .values_mut()
            .find_map(|collection| collection.get_mut(handle))
            .ok_or_else(|| unknown(handle))
    }

    fn collection_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        self.collections
            .entry(kind)
            .or_insert_with(|| Collection::new(kind))
    }
}

fn new_handle() -> RecordHandle {
    RecordHandle::new(Uuid::new_v4().to_string())
}

fn unknown(handle: &RecordHandle) -> HostError {
    HostError::UnknownRecord {
        handle: handle.clone(),
    }
}
