use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{info, warn};

use nvsync_shared::{
    object_key, CollectionKind, Disposer, ManagedRecord, ObjectSource, RecordHandle, RecordSync,
};

use crate::{
    bindings::PropertyBindings,
    error::{ReconcileError, RendererError},
    renderer::{LiveObject, LoadTicket, Materialization, Renderer},
};

use super::{
    pending_ids::PendingIds,
    report::{OutboundBuffer, ReconcileReport, RecordFailure},
};

struct InFlightLoad {
    generation: u64,
    handle: RecordHandle,
    source: ObjectSource,
}

/// What became of an asynchronous construction
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The object joined the scene
    Attached(ReconcileReport),
    /// A newer pass no longer wants this object; it was dropped
    Superseded,
    /// The ticket was never issued by this reconciler
    Unknown,
    Failed(RecordFailure),
}

/// Keeps one collection of the renderer's scene converged with the host's
/// ordered list of records.
///
/// Every live object materialized or bound by the reconciler has exactly one
/// cleanup callback in its [`Disposer`], keyed by the object's id.
pub struct CollectionReconciler {
    kind: CollectionKind,
    disposer: Disposer,
    pending_ids: PendingIds,
    generation: u64,
    in_flight: HashMap<LoadTicket, InFlightLoad>,
}

impl CollectionReconciler {
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            disposer: Disposer::new(),
            pending_ids: PendingIds::new(),
            generation: 0,
            in_flight: HashMap::new(),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_ids(&self) -> &PendingIds {
        &self.pending_ids
    }

    /// Marks a renderer-created object as waiting for its host record, so
    /// passes keep it alive until the record arrives
    pub fn track_pending(&mut self, id: impl Into<String>) {
        self.pending_ids.insert(id);
    }

    /// Whether the live object `id` has a cleanup callback registered
    pub fn is_bound(&self, id: &str) -> bool {
        self.disposer.has(id)
    }

    pub fn bound_count(&self) -> usize {
        self.disposer.len()
    }

    pub fn loads_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Resolves the whole collection against the renderer.
    ///
    /// Running it again without changes on either side changes nothing.
    /// Records that fail are reported and skipped; the rest of the pass
    /// still runs.
    pub fn reconcile<R: Renderer + ?Sized>(
        &mut self,
        records: &mut [ManagedRecord],
        renderer: &mut R,
        bindings: &PropertyBindings,
    ) -> ReconcileReport {
        self.generation += 1;
        let mut report = ReconcileReport::new(self.kind, self.generation);

        // model side, keyed by id or temp key
        let mut backend: IndexMap<String, usize> = IndexMap::new();
        for (index, record) in records.iter().enumerate() {
            backend.insert(record.key(index), index);
        }

        // live side
        let live: HashSet<String> = renderer
            .live_ids(self.kind)
            .iter()
            .enumerate()
            .map(|(index, id)| object_key(id, index))
            .collect();

        let resolved = self.pending_ids.resolve(|id| backend.contains_key(id));
        if !resolved.is_empty() {
            info!("{} objects {:?} received their host records", self.kind, resolved);
        }

        let mut keep: HashSet<String> = backend.keys().cloned().collect();
        for (key, &index) in &backend {
            let record = &mut records[index];
            let in_live = live.contains(key);

            if record.is_from_renderer() {
                if !in_live {
                    if self.disposer.dispose(key) {
                        report.disposed_orphans.push(key.clone());
                    }
                } else if !self.disposer.has(key) {
                    self.bind_existing(record, key, renderer, bindings, &mut report);
                }
                continue;
            }

            if in_live && record.has_id() {
                if !self.disposer.has(key) {
                    self.bind_existing(record, key, renderer, bindings, &mut report);
                }
                continue;
            }

            if let Some(id) = self.materialize(record, key, renderer, bindings, &mut report) {
                keep.insert(id);
            }
        }

        // detach whatever the model no longer lists, unless it is still
        // waiting for its host record
        for id in renderer.live_ids(self.kind) {
            if keep.contains(&id) || self.pending_ids.contains(&id) {
                continue;
            }
            renderer.remove_object(self.kind, &id);
            self.disposer.dispose(&id);
            info!("Removed {} {}", self.kind, id);
            report.removed.push(id);
        }

        let live_after: HashSet<String> = renderer.live_ids(self.kind).into_iter().collect();
        let orphans: Vec<String> = self
            .disposer
            .keys()
            .filter(|key| !live_after.contains(*key))
            .map(str::to_string)
            .collect();
        for key in orphans {
            self.disposer.dispose(&key);
            report.disposed_orphans.push(key);
        }

        report.order = self.apply_order(records, renderer);
        if !report.is_complete() {
            warn!(
                "Reconciled {} collection with {} failed records",
                self.kind,
                report.failures.len()
            );
        }
        report
    }

    /// Hands back an object whose construction was pending.
    ///
    /// The object is only attached if the pass that asked for it is still
    /// the latest one and its record still wants it.
    pub fn complete_load<R: Renderer + ?Sized>(
        &mut self,
        records: &mut [ManagedRecord],
        renderer: &mut R,
        bindings: &PropertyBindings,
        ticket: LoadTicket,
        result: Result<R::Object, RendererError>,
    ) -> LoadOutcome {
        let Some(load) = self.in_flight.remove(&ticket) else {
            warn!("Ignoring {} load {:?}: unknown ticket", self.kind, ticket);
            return LoadOutcome::Unknown;
        };
        if load.generation != self.generation {
            warn!(
                "Dropping {} load {:?} issued by pass {} (current pass {})",
                self.kind, ticket, load.generation, self.generation
            );
            return LoadOutcome::Superseded;
        }
        let Some(index) = records
            .iter()
            .position(|record| record.handle() == &load.handle)
        else {
            warn!(
                "Dropping {} load {:?}: record {} is gone",
                self.kind, ticket, load.handle
            );
            return LoadOutcome::Superseded;
        };
        if records[index].usable_source() != Some(&load.source) {
            warn!(
                "Dropping {} load {:?}: record {} changed its source",
                self.kind, ticket, load.handle
            );
            return LoadOutcome::Superseded;
        }

        let object = match result {
            Ok(object) => object,
            Err(error) => {
                let failure = RecordFailure {
                    key: records[index].key(index),
                    handle: load.handle,
                    error: error.into(),
                };
                warn!("{}", failure.error);
                return LoadOutcome::Failed(failure);
            }
        };

        let mut report = ReconcileReport::new(self.kind, self.generation);
        self.attach(&mut records[index], object, renderer, bindings, &mut report);
        report.order = self.apply_order(records, renderer);
        LoadOutcome::Attached(report)
    }

    /// Runs every cleanup callback and forgets all pending work. Live objects
    /// are left in the renderer.
    pub fn teardown(&mut self) -> usize {
        self.in_flight.clear();
        self.pending_ids.clear();
        self.disposer.dispose_all()
    }

    fn materialize<R: Renderer + ?Sized>(
        &mut self,
        record: &mut ManagedRecord,
        key: &str,
        renderer: &mut R,
        bindings: &PropertyBindings,
        report: &mut ReconcileReport,
    ) -> Option<String> {
        let Some(source) = record.usable_source().cloned() else {
            let failure = RecordFailure {
                key: key.to_string(),
                handle: record.handle().clone(),
                error: ReconcileError::MissingSource {
                    key: key.to_string(),
                    handle: record.handle().clone(),
                },
            };
            warn!("{}", failure.error);
            report.failures.push(failure);
            return None;
        };

        // a load for the same record and source is already running; adopt
        // it for this pass instead of starting another
        let generation = self.generation;
        if let Some((ticket, load)) = self
            .in_flight
            .iter_mut()
            .find(|(_, load)| &load.handle == record.handle() && load.source == source)
        {
            load.generation = generation;
            report.pending_loads.push(*ticket);
            return None;
        }

        match renderer.create_object_from_source(self.kind, record, &source) {
            Ok(Materialization::Ready(object)) => {
                Some(self.attach(record, object, renderer, bindings, report))
            }
            Ok(Materialization::Pending(ticket)) => {
                self.in_flight.insert(
                    ticket,
                    InFlightLoad {
                        generation,
                        handle: record.handle().clone(),
                        source,
                    },
                );
                report.pending_loads.push(ticket);
                None
            }
            Err(error) => {
                let failure = RecordFailure {
                    key: key.to_string(),
                    handle: record.handle().clone(),
                    error: error.into(),
                };
                warn!("{}", failure.error);
                report.failures.push(failure);
                None
            }
        }
    }

    fn attach<R: Renderer + ?Sized>(
        &mut self,
        record: &mut ManagedRecord,
        object: R::Object,
        renderer: &mut R,
        bindings: &PropertyBindings,
        report: &mut ReconcileReport,
    ) -> String {
        let id = object.id().to_string();
        let name = object.name().to_string();
        let derived = object.derived_attributes();
        let outbound = object.outbound_buffers();
        renderer.add_object(self.kind, object);

        if record.has_id() && record.id() != id {
            self.disposer.dispose(record.id());
        }
        self.register(record.handle().clone(), &id, bindings);

        record.set_id(id.clone());
        if !name.is_empty() {
            record.set_name(name);
        }
        record.merge_attributes(derived.clone());

        let handle = record.handle().clone();
        report.syncs.push(RecordSync {
            handle: handle.clone(),
            id: id.clone(),
            name: record.name().to_string(),
            attributes: derived,
        });
        for (attr, buffer) in outbound {
            report.outbound.push(OutboundBuffer {
                handle: handle.clone(),
                attr,
                buffer,
            });
        }
        info!("Materialized {} {} for record {}", self.kind, id, handle);
        report.created.push(id.clone());
        id
    }

    fn bind_existing<R: Renderer + ?Sized>(
        &mut self,
        record: &mut ManagedRecord,
        id: &str,
        renderer: &R,
        bindings: &PropertyBindings,
        report: &mut ReconcileReport,
    ) {
        self.register(record.handle().clone(), id, bindings);
        if let Some(object) = renderer.object_by_id(self.kind, id) {
            let derived = object.derived_attributes();
            if record.name().is_empty() {
                record.set_name(object.name());
            }
            record.merge_attributes(derived.clone());
            report.syncs.push(RecordSync {
                handle: record.handle().clone(),
                id: id.to_string(),
                name: record.name().to_string(),
                attributes: derived,
            });
        }
        report.rebound.push(id.to_string());
    }

    fn register(&mut self, handle: RecordHandle, id: &str, bindings: &PropertyBindings) {
        let unbind = bindings.bind(handle, self.kind, id);
        self.disposer.register(id, unbind);
    }

    /// Orders the scene after the model, then appends objects still waiting
    /// for their host record in their current relative order
    fn apply_order<R: Renderer + ?Sized>(
        &self,
        records: &[ManagedRecord],
        renderer: &mut R,
    ) -> Vec<String> {
        let live_ids = renderer.live_ids(self.kind);
        let live: HashSet<&str> = live_ids.iter().map(String::as_str).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut order = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let key = record.key(index);
            if live.contains(key.as_str()) && seen.insert(key.clone()) {
                order.push(key);
            }
        }
        for id in &live_ids {
            if self.pending_ids.contains(id) && seen.insert(id.clone()) {
                order.push(id.clone());
            }
        }

        renderer.set_ordered_collection(self.kind, &order);
        renderer.redraw();
        order
    }
}
