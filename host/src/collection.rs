use nvsync_shared::{CollectionKind, ManagedRecord, RecordHandle};

/// An ordered, authoritative list of records
pub struct Collection {
    kind: CollectionKind,
    records: Vec<ManagedRecord>,
}

impl Collection {
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn records(&self) -> &[ManagedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: ManagedRecord) {
        self.records.push(record);
    }

    /// Inserts at `index` when `0 <= index <= len`, otherwise appends.
    /// Returns the position the record ended up at.
    pub fn insert_at(&mut self, index: Option<i64>, record: ManagedRecord) -> usize {
        let position = index
            .and_then(|index| usize::try_from(index).ok())
            .filter(|index| *index <= self.records.len());
        match position {
            Some(position) => {
                self.records.insert(position, record);
                position
            }
            None => {
                self.records.push(record);
                self.records.len() - 1
            }
        }
    }

    pub fn replace_all(&mut self, records: Vec<ManagedRecord>) {
        self.records = records;
    }

    pub fn position(&self, handle: &RecordHandle) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.handle() == handle)
    }

    pub fn position_of_id(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn get(&self, handle: &RecordHandle) -> Option<&ManagedRecord> {
        self.records.iter().find(|record| record.handle() == handle)
    }

    pub fn get_mut(&mut self, handle: &RecordHandle) -> Option<&mut ManagedRecord> {
        self.records
            .iter_mut()
            .find(|record| record.handle() == handle)
    }

    pub fn remove(&mut self, handle: &RecordHandle) -> Option<ManagedRecord> {
        let position = self.position(handle)?;
        Some(self.records.remove(position))
    }

    /// Moves the record to `to`, shifting the others. `to` must be a valid
    /// position.
    pub fn move_to(&mut self, handle: &RecordHandle, to: usize) -> Option<()> {
        if to >= self.records.len() {
            return None;
        }
        let from = self.position(handle)?;
        let record = self.records.remove(from);
        self.records.insert(to, record);
        Some(())
    }
}
