mod collection_reconciler;
mod pending_ids;
mod report;

pub use collection_reconciler::{CollectionReconciler, LoadOutcome};
pub use pending_ids::PendingIds;
pub use report::{OutboundBuffer, ReconcileReport, RecordFailure};
