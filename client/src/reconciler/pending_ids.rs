use indexmap::IndexSet;

/// Ids of objects the renderer created on its own, waiting for the host to
/// answer with a record. Iteration follows insertion order.
#[derive(Default)]
pub struct PendingIds {
    ids: IndexSet<String>,
}

impl PendingIds {
    pub fn new() -> Self {
        Self {
            ids: IndexSet::new(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.shift_remove(id)
    }

    /// Forgets every id for which `resolved` returns true. Returns the
    /// forgotten ids.
    pub fn resolve<F>(&mut self, mut resolved: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut removed = Vec::new();
        self.ids.retain(|id| {
            if resolved(id) {
                removed.push(id.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
