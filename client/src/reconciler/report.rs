use nvsync_shared::{CollectionKind, RecordHandle, RecordSync, TypedBuffer};

use crate::{error::ReconcileError, renderer::LoadTicket};

/// A record that could not be materialized during a pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFailure {
    pub key: String,
    pub handle: RecordHandle,
    pub error: ReconcileError,
}

/// A derived binary attribute to send back to the host
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundBuffer {
    pub handle: RecordHandle,
    pub attr: String,
    pub buffer: TypedBuffer,
}

/// Everything one reconciliation pass did.
///
/// Passes are best-effort: a failed record does not undo the work done for
/// the others, so callers inspect `failures` rather than a single result.
#[derive(Clone, Debug, PartialEq)]
pub struct ReconcileReport {
    pub collection: CollectionKind,
    pub generation: u64,
    /// Ids of objects built and added to the scene
    pub created: Vec<String>,
    /// Ids of existing objects that were bound to a record
    pub rebound: Vec<String>,
    /// Ids of objects removed from the scene
    pub removed: Vec<String>,
    /// Keys whose cleanup ran because their renderer object vanished
    pub disposed_orphans: Vec<String>,
    pub pending_loads: Vec<LoadTicket>,
    pub failures: Vec<RecordFailure>,
    /// Write-backs for the host
    pub syncs: Vec<RecordSync>,
    pub outbound: Vec<OutboundBuffer>,
    /// Scene order after the pass
    pub order: Vec<String>,
}

impl ReconcileReport {
    pub fn new(collection: CollectionKind, generation: u64) -> Self {
        Self {
            collection,
            generation,
            created: Vec::new(),
            rebound: Vec::new(),
            removed: Vec::new(),
            disposed_orphans: Vec::new(),
            pending_loads: Vec::new(),
            failures: Vec::new(),
            syncs: Vec::new(),
            outbound: Vec::new(),
            order: Vec::new(),
        }
    }

    /// True when no record failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when the pass changed the scene
    pub fn has_changes(&self) -> bool {
        !(self.created.is_empty() && self.removed.is_empty() && self.rebound.is_empty())
    }
}
