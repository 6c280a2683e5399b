//! Store — the in-memory replica of all [`Product`](crate::Product) records
//! fetched from the catalog API.
//!
//! The store is the single shared mutable state in the system. It is owned by
//! the sync controller and read-only from the query pipeline's perspective:
//! the pipeline borrows the records and never mutates them. Mutations are
//! limited to wholesale replacement after a fetch and an optimistic splice
//! after an update response (superseded by the following refresh).

use crate::Product;

/// In-memory replica of the remote product set, in API return order.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Product>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire contents with a freshly fetched record set.
    pub fn replace_all(&mut self, records: Vec<Product>) {
        self.records = records;
    }

    /// Splice an updated record over the stored copy with the same id.
    ///
    /// No-op when the id is not present (the reconciling refresh will pick
    /// the record up anyway). Returns whether a record was replaced.
    pub fn splice(&mut self, updated: Product) -> bool {
        match self.records.iter_mut().find(|p| p.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[Product] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
