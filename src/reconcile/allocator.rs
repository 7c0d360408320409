use crate::types::RecordId;

/// Session-scoped counters for synthetic identifiers.
///
/// The New and Updated sequences are independent and both start at 1.
/// One allocator belongs to one widget session; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    last_new: u64,
    last_updated: u64,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next `New-<n>-` counter value.
    pub fn next_new(&mut self) -> u64 {
        self.last_new = self.last_new.saturating_add(1);
        self.last_new
    }

    /// Allocate the next `Updated-<n>-` counter value.
    pub fn next_updated(&mut self) -> u64 {
        self.last_updated = self.last_updated.saturating_add(1);
        self.last_updated
    }

    /// Highest New counter value issued or observed.
    #[must_use]
    pub fn issued_new(&self) -> u64 {
        self.last_new
    }

    /// Highest Updated counter value issued or observed.
    #[must_use]
    pub fn issued_updated(&self) -> u64 {
        self.last_updated
    }

    /// Move past a tagged identifier that is already in the data, so the
    /// next allocation cannot collide with it.
    pub fn observe(&mut self, id: &RecordId) {
        match id {
            RecordId::Original(_) => {}
            RecordId::New { seq, .. } => self.last_new = self.last_new.max(*seq),
            RecordId::Updated { seq, .. } => self.last_updated = self.last_updated.max(*seq),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
