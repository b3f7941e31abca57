use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use nvsync_shared::{CollectionKind, RecordHandle};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Binding {
    kind: CollectionKind,
    object_id: String,
    token: u64,
}

#[derive(Default)]
struct BindingTable {
    next_token: u64,
    bindings: HashMap<RecordHandle, Binding>,
}

/// Routes host-side attribute changes of a record to the live object it is
/// materialized as.
///
/// A binding is removed by the unbind callback returned from
/// [`PropertyBindings::bind`], which is meant to live in a
/// [`Disposer`](nvsync_shared::Disposer). A stale callback never removes a
/// newer binding of the same record.
#[derive(Clone, Default)]
pub struct PropertyBindings {
    table: Rc<RefCell<BindingTable>>,
}

impl PropertyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handle` to the live object `object_id`, replacing any previous
    /// binding of `handle`
    pub fn bind(
        &self,
        handle: RecordHandle,
        kind: CollectionKind,
        object_id: &str,
    ) -> impl FnOnce() + 'static {
        let token = {
            let mut table = self.table.borrow_mut();
            table.next_token += 1;
            let token = table.next_token;
            table.bindings.insert(
                handle.clone(),
                Binding {
                    kind,
                    object_id: object_id.to_string(),
                    token,
                },
            );
            token
        };
        let table: Weak<RefCell<BindingTable>> = Rc::downgrade(&self.table);
        move || {
            let Some(table) = table.upgrade() else {
                return;
            };
            let mut table = table.borrow_mut();
            if table
                .bindings
                .get(&handle)
                .is_some_and(|binding| binding.token == token)
            {
                table.bindings.remove(&handle);
            }
        }
    }

    /// The live object `handle` is bound to
    pub fn lookup(&self, handle: &RecordHandle) -> Option<(CollectionKind, String)> {
        self.table
            .borrow()
            .bindings
            .get(handle)
            .map(|binding| (binding.kind, binding.object_id.clone()))
    }

    /// The record bound to the live object `object_id`
    pub fn handle_for(&self, kind: CollectionKind, object_id: &str) -> Option<RecordHandle> {
        self.table
            .borrow()
            .bindings
            .iter()
            .find(|(_, binding)| binding.kind == kind && binding.object_id == object_id)
            .map(|(handle, _)| handle.clone())
    }

    pub fn is_bound(&self, handle: &RecordHandle) -> bool {
        self.table.borrow().bindings.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.table.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().bindings.is_empty()
    }
}
