//! The document store seam
//!
//! [`DocumentClient`](crate::DocumentClient) talks to its backing store only
//! through [`DocumentStore`]. Filters and update documents arrive already
//! normalized; the store reports raw outcomes and the client turns them into
//! its return values.
//!
//! Two implementations ship with the crate:
//! - [`Connection`](crate::Connection): a live MongoDB database
//! - [`MemoryStore`]: an in-process store used by tests and dry runs

mod memory;
mod mongo;

pub use memory::{MemoryConnector, MemoryStore};

use bson::{Bson, Document as BsonDocument};
use tms_common::Result;

use crate::query::FindOptions;

/// Raw result of an update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Identifier of the document created by an upsert, if any
    pub upserted_id: Option<Bson>,
}

impl UpdateOutcome {
    /// True iff a document was modified or an upsert created one
    pub fn changed(&self) -> bool {
        self.modified_count > 0 || self.upserted_id.is_some()
    }
}

/// Blocking CRUD access to one database
///
/// Collections are resolved by name on every call.
pub trait DocumentStore: Send + Sync {
    /// Lightweight liveness round-trip
    fn ping(&self) -> Result<()>;

    /// Insert a document, returning its `_id` (generated when absent)
    fn insert_one(&self, collection: &str, document: BsonDocument) -> Result<Bson>;

    /// Insert documents, returning their `_id`s in input order
    fn insert_many(&self, collection: &str, documents: Vec<BsonDocument>) -> Result<Vec<Bson>>;

    fn find_one(&self, collection: &str, filter: BsonDocument) -> Result<Option<BsonDocument>>;

    /// Matching documents in natural order, paged by `options`
    fn find(
        &self,
        collection: &str,
        filter: BsonDocument,
        options: FindOptions,
    ) -> Result<Vec<BsonDocument>>;

    fn count_documents(&self, collection: &str, filter: BsonDocument) -> Result<u64>;

    fn update_one(
        &self,
        collection: &str,
        filter: BsonDocument,
        update: BsonDocument,
        upsert: bool,
    ) -> Result<UpdateOutcome>;

    fn update_many(
        &self,
        collection: &str,
        filter: BsonDocument,
        update: BsonDocument,
    ) -> Result<UpdateOutcome>;

    /// Delete the first matching document, returning the number removed
    fn delete_one(&self, collection: &str, filter: BsonDocument) -> Result<u64>;

    fn delete_many(&self, collection: &str, filter: BsonDocument) -> Result<u64>;

    /// Drop a collection; dropping a missing collection succeeds
    fn drop_collection(&self, collection: &str) -> Result<()>;

    fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Release the underlying connection. Must be idempotent.
    fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_outcome_changed() {
        assert!(!UpdateOutcome::default().changed());
        assert!(UpdateOutcome {
            matched_count: 1,
            modified_count: 1,
            upserted_id: None
        }
        .changed());
        assert!(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(Bson::Int32(1))
        }
        .changed());
        // Matched but unchanged
        assert!(!UpdateOutcome {
            matched_count: 1,
            modified_count: 0,
            upserted_id: None
        }
        .changed());
    }
}
