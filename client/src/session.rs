use std::collections::BTreeMap;

use log::{info, warn};

use nvsync_shared::{
    apply_patch, AddObjectAnnouncement, BufferTarget, Channel, ChunkReceiver, ChunkSender,
    CollectionKind, DiffSyncLoop, HostMessage, Instant, ManagedRecord, RecordHandle,
    RendererEvent, RendererMessage, SceneSource,
};

use crate::{
    bindings::PropertyBindings,
    client_config::ClientConfig,
    error::{ClientError, RendererError},
    ops::dispatch_op,
    reconciler::{CollectionReconciler, LoadOutcome, ReconcileReport},
    renderer::{LiveObject, LoadTicket, Renderer},
};

struct CollectionState {
    records: Vec<ManagedRecord>,
    reconciler: CollectionReconciler,
}

/// The renderer's end of one host connection.
///
/// Owns the renderer and the channel, mirrors the host's collections and
/// keeps the scene reconciled with them. Driven by [`RendererSession::update`].
pub struct RendererSession<R: Renderer, C: Channel<RendererMessage>> {
    renderer: R,
    channel: C,
    bindings: PropertyBindings,
    collections: BTreeMap<CollectionKind, CollectionState>,
    chunk_sender: ChunkSender,
    chunk_receiver: ChunkReceiver,
    scene_sync: DiffSyncLoop,
}

impl<R: Renderer, C: Channel<RendererMessage>> RendererSession<R, C> {
    pub fn new(config: ClientConfig, renderer: R, channel: C) -> Self {
        let collections = CollectionKind::ALL
            .iter()
            .map(|kind| {
                (
                    *kind,
                    CollectionState {
                        records: Vec::new(),
                        reconciler: CollectionReconciler::new(*kind),
                    },
                )
            })
            .collect();
        Self {
            renderer,
            channel,
            bindings: PropertyBindings::new(),
            collections,
            chunk_sender: ChunkSender::new(config.chunk),
            chunk_receiver: ChunkReceiver::new(),
            scene_sync: DiffSyncLoop::new(&config.scene_sync),
        }
    }

    /// Starts mirroring scene state, from the renderer's current state
    pub fn start(&mut self, now: &Instant) {
        let baseline = self.renderer.scene_snapshot();
        self.scene_sync.start(now, baseline);
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn bindings(&self) -> &PropertyBindings {
        &self.bindings
    }

    /// The session's copy of a host collection
    pub fn records(&self, kind: CollectionKind) -> &[ManagedRecord] {
        self.collections
            .get(&kind)
            .map(|state| state.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn reconciler(&self, kind: CollectionKind) -> Option<&CollectionReconciler> {
        self.collections.get(&kind).map(|state| &state.reconciler)
    }

    pub fn is_syncing_scene(&self) -> bool {
        self.scene_sync.is_running()
    }

    /// Applies one message from the host. A collection change returns the
    /// report of the pass it triggered.
    pub fn receive_message(
        &mut self,
        message: HostMessage,
    ) -> Result<Option<ReconcileReport>, ClientError> {
        match message {
            HostMessage::CollectionChanged {
                collection,
                records,
            } => {
                if let Some(state) = self.collections.get_mut(&collection) {
                    state.records = records;
                }
                Ok(Some(self.reconcile(collection)))
            }
            HostMessage::AttrChanged {
                handle,
                attr,
                value,
            } => {
                let record = self.record_mut(&handle)?;
                record.set_attribute(attr.clone(), value.clone());
                if let Some((kind, id)) = self.bindings.lookup(&handle) {
                    let object = self
                        .renderer
                        .object_by_id_mut(kind, &id)
                        .ok_or(RendererError::ObjectNotFound { kind, id })?;
                    object.set_property(&attr, &value)?;
                    self.renderer.redraw();
                }
                Ok(None)
            }
            HostMessage::BufferPatch {
                handle,
                patch,
                buffers,
            } => {
                let record = self.record_mut(&handle)?;
                apply_patch(record.attributes_mut(), &patch, &buffers)?;
                if let Some((kind, id)) = self.bindings.lookup(&handle) {
                    if let Some(object) = self.renderer.object_by_id_mut(kind, &id) {
                        if apply_patch(object, &patch, &buffers)? {
                            self.renderer.redraw();
                        }
                    }
                }
                Ok(None)
            }
            HostMessage::Op { op } => {
                dispatch_op(&mut self.renderer, op)?;
                Ok(None)
            }
            HostMessage::Chunk(envelope) => {
                let Some(done) = self.chunk_receiver.receive(envelope)? else {
                    return Ok(None);
                };
                let record = self.record_mut(&done.target)?;
                record
                    .attributes_mut()
                    .set_buffer(&done.attr, done.buffer.clone());
                if let Some((kind, id)) = self.bindings.lookup(&done.target) {
                    if let Some(object) = self.renderer.object_by_id_mut(kind, &id) {
                        object.set_buffer(&done.attr, done.buffer);
                        self.renderer.redraw();
                    }
                }
                Ok(None)
            }
        }
    }

    /// Runs a reconciliation pass over one collection and sends the
    /// resulting write-backs and derived buffers to the host
    pub fn reconcile(&mut self, kind: CollectionKind) -> ReconcileReport {
        let Some(state) = self.collections.get_mut(&kind) else {
            return ReconcileReport::new(kind, 0);
        };
        let report =
            state
                .reconciler
                .reconcile(&mut state.records, &mut self.renderer, &self.bindings);
        self.flush_report(&report);
        report
    }

    /// Adds an object created by the renderer itself and announces it to the
    /// host as `add_<kind>`. The object stays in the scene while the host
    /// record is on its way.
    pub fn announce_local_object(
        &mut self,
        kind: CollectionKind,
        object: R::Object,
        index: Option<i64>,
    ) -> Result<String, ClientError> {
        let id = object.id().to_string();
        let announcement = AddObjectAnnouncement {
            id: id.clone(),
            name: object.name().to_string(),
            attributes: object.derived_attributes(),
            index,
        };
        self.renderer.add_object(kind, object);
        if let Some(state) = self.collections.get_mut(&kind) {
            state.reconciler.track_pending(id.clone());
        }
        info!("Announcing {} {} as {}", kind, id, kind.add_message_key());
        self.channel.send(RendererMessage::AddObject {
            collection: kind,
            object: announcement,
        })?;
        Ok(id)
    }

    /// Hands an asynchronously constructed object to its collection
    pub fn complete_load(
        &mut self,
        kind: CollectionKind,
        ticket: LoadTicket,
        result: Result<R::Object, RendererError>,
    ) -> LoadOutcome {
        let Some(state) = self.collections.get_mut(&kind) else {
            return LoadOutcome::Unknown;
        };
        let outcome = state.reconciler.complete_load(
            &mut state.records,
            &mut self.renderer,
            &self.bindings,
            ticket,
            result,
        );
        if let LoadOutcome::Attached(report) = &outcome {
            self.flush_report(report);
        }
        outcome
    }

    /// Forwards a renderer event to the host
    pub fn emit_event(&mut self, event: RendererEvent) -> Result<(), ClientError> {
        self.channel.send(RendererMessage::from(event))?;
        Ok(())
    }

    /// Drives the session: finished loads, queued chunks and scene sync
    pub fn update(&mut self, now: &Instant) {
        for load in self.renderer.poll_loads() {
            self.complete_load(load.kind, load.ticket, load.result);
        }
        let outcomes = self
            .chunk_sender
            .send_ready::<RendererMessage, C>(&mut self.channel, now);
        for outcome in outcomes {
            info!("Chunked transfer finished: {:?}", outcome);
        }
        self.scene_sync
            .poll::<R, RendererMessage, C>(now, &self.renderer, &mut self.channel);
    }

    /// Stops scene sync and runs every cleanup callback. Queued chunk
    /// transfers are left to drain on later updates or fail.
    pub fn teardown(&mut self) -> usize {
        self.scene_sync.stop();
        let disposed: usize = self
            .collections
            .values_mut()
            .map(|state| state.reconciler.teardown())
            .sum();
        info!("Renderer session torn down, {} callbacks disposed", disposed);
        disposed
    }

    fn record_mut(&mut self, handle: &RecordHandle) -> Result<&mut ManagedRecord, ClientError> {
        self.collections
            .values_mut()
            .flat_map(|state| state.records.iter_mut())
            .find(|record| record.handle() == handle)
            .ok_or_else(|| ClientError::UnknownRecord {
                handle: handle.clone(),
            })
    }

    fn flush_report(&mut self, report: &ReconcileReport) {
        let binary = self.channel.supports_binary();
        for sync in &report.syncs {
            let message = RendererMessage::RecordSync {
                collection: report.collection,
                sync: sync.clone(),
            };
            if let Err(error) = self.channel.send(message) {
                warn!("Record sync for {} not sent: {}", sync.handle, error);
            }
        }
        for outbound in &report.outbound {
            if let Err(error) = self.chunk_sender.queue(
                outbound.handle.clone(),
                &outbound.attr,
                &outbound.buffer,
                binary,
            ) {
                warn!("Buffer {:?} not queued: {}", outbound.attr, error);
            }
        }
    }
}
