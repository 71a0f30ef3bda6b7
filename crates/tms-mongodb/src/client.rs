//! Document client: CRUD over named collections
//!
//! Every operation resolves its collection by name, normalizes its filter and
//! update documents, and renders identifiers to their string form on the way
//! out. Failures are logged once at error level with the operation and
//! collection, then returned unchanged.

use std::collections::BTreeSet;
use std::sync::Arc;

use bson::Document as BsonDocument;
use parking_lot::RwLock;
use tms_common::{Result, TmsError};
use tracing::{debug, error, info};

use crate::filter::{Filter, UpdateSpec};
use crate::identifier::{render_id, stringify_id, DocumentId};
use crate::query::FindOptions;
use crate::store::DocumentStore;
use crate::validation::ValidatedCollectionName;

/// One stored document
pub type Record = BsonDocument;

/// CRUD access to one database through a shared connection
pub struct DocumentClient {
    database_name: String,
    store: RwLock<Option<Arc<dyn DocumentStore>>>,
}

impl DocumentClient {
    /// Wrap an open store
    pub fn new(database_name: impl Into<String>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            database_name: database_name.into(),
            store: RwLock::new(Some(store)),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// False once [`release`](Self::release) has run
    pub fn is_connected(&self) -> bool {
        self.store.read().is_some()
    }

    /// Close the connection. Closing twice, or after a failed start, is a no-op.
    pub fn release(&self) {
        if let Some(store) = self.store.write().take() {
            store.close();
            info!("MongoDB connection closed");
        }
    }

    /// Liveness round-trip to the store
    pub fn ping(&self) -> Result<()> {
        self.connected()
            .and_then(|store| store.ping())
            .inspect_err(|e| error!(operation = "ping", error = %e, "Ping failed"))
    }

    fn connected(&self) -> Result<Arc<dyn DocumentStore>> {
        self.store
            .read()
            .clone()
            .ok_or_else(|| TmsError::Connection("MongoDB connection is closed".to_string()))
    }

    /// Run `op` against a validated collection, logging any failure once
    fn execute<T, F>(&self, operation: &'static str, collection: &str, op: F) -> Result<T>
    where
        F: FnOnce(&dyn DocumentStore, &str) -> Result<T>,
    {
        debug!(operation, collection, "Running document operation");
        ValidatedCollectionName::new(collection)
            .and_then(|name| {
                let store = self.connected()?;
                op(store.as_ref(), name.as_str())
            })
            .inspect_err(|e| {
                error!(operation, collection, error = %e, "Error in {} on '{}'", operation, collection)
            })
    }

    fn parse_id(&self, operation: &'static str, collection: &str, id: &str) -> Result<DocumentId> {
        DocumentId::parse(id).inspect_err(|e| {
            error!(operation, collection, identifier = id, error = %e, "Invalid ObjectId format")
        })
    }

    // ------------------------------------------------------------------
    // CREATE operations
    // ------------------------------------------------------------------

    /// Insert a record as-is, returning its identifier string
    pub fn insert_one(&self, collection: &str, record: Record) -> Result<String> {
        self.execute("insert_one", collection, |store, name| {
            store.insert_one(name, record).map(|id| render_id(&id))
        })
    }

    /// Insert records, returning identifier strings in input order.
    ///
    /// A store failure aborts the whole call. An empty batch is a no-op.
    pub fn insert_many(&self, collection: &str, records: Vec<Record>) -> Result<Vec<String>> {
        self.execute("insert_many", collection, |store, name| {
            if records.is_empty() {
                return Ok(Vec::new());
            }
            let ids = store.insert_many(name, records)?;
            Ok(ids.iter().map(render_id).collect())
        })
    }

    // ------------------------------------------------------------------
    // READ operations
    // ------------------------------------------------------------------

    pub fn find_one(&self, collection: &str, filter: impl Into<Filter>) -> Result<Option<Record>> {
        let filter = filter.into().into_document();
        self.execute("find_one", collection, |store, name| {
            Ok(store.find_one(name, filter)?.map(stringify_id))
        })
    }

    /// Find by identifier string; an undecodable identifier fails before the store is contacted
    pub fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Record>> {
        let id = self.parse_id("find_by_id", collection, id)?;
        let filter = Filter::by_id(id).into_document();
        self.execute("find_by_id", collection, |store, name| {
            Ok(store.find_one(name, filter)?.map(stringify_id))
        })
    }

    /// Matching records in natural order, skip applied before limit
    pub fn find_many(
        &self,
        collection: &str,
        filter: impl Into<Filter>,
        options: FindOptions,
    ) -> Result<Vec<Record>> {
        let filter = filter.into().into_document();
        self.execute("find_many", collection, |store, name| {
            let records = store.find(name, filter, options)?;
            Ok(records.into_iter().map(stringify_id).collect())
        })
    }

    pub fn count_documents(&self, collection: &str, filter: impl Into<Filter>) -> Result<u64> {
        let filter = filter.into().into_document();
        self.execute("count_documents", collection, |store, name| {
            store.count_documents(name, filter)
        })
    }

    // ------------------------------------------------------------------
    // UPDATE operations
    // ------------------------------------------------------------------

    /// Update the first match. True iff a document was modified or upserted.
    pub fn update_one(
        &self,
        collection: &str,
        filter: impl Into<Filter>,
        update: impl Into<UpdateSpec>,
        upsert: bool,
    ) -> Result<bool> {
        let filter = filter.into().into_document();
        let update = update.into().into_document();
        self.execute("update_one", collection, |store, name| {
            Ok(store.update_one(name, filter, update, upsert)?.changed())
        })
    }

    pub fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        update: impl Into<UpdateSpec>,
    ) -> Result<bool> {
        let id = self.parse_id("update_by_id", collection, id)?;
        let filter = Filter::by_id(id).into_document();
        let update = update.into().into_document();
        self.execute("update_by_id", collection, |store, name| {
            Ok(store.update_one(name, filter, update, false)?.changed())
        })
    }

    /// Update every match, returning the number of modified documents
    pub fn update_many(
        &self,
        collection: &str,
        filter: impl Into<Filter>,
        update: impl Into<UpdateSpec>,
    ) -> Result<u64> {
        let filter = filter.into().into_document();
        let update = update.into().into_document();
        self.execute("update_many", collection, |store, name| {
            Ok(store.update_many(name, filter, update)?.modified_count)
        })
    }

    // ------------------------------------------------------------------
    // DELETE operations
    // ------------------------------------------------------------------

    pub fn delete_one(&self, collection: &str, filter: impl Into<Filter>) -> Result<bool> {
        let filter = filter.into().into_document();
        self.execute("delete_one", collection, |store, name| {
            Ok(store.delete_one(name, filter)? > 0)
        })
    }

    /// Delete by identifier string. An unknown identifier returns false.
    pub fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool> {
        let id = self.parse_id("delete_by_id", collection, id)?;
        let filter = Filter::by_id(id).into_document();
        self.execute("delete_by_id", collection, |store, name| {
            Ok(store.delete_one(name, filter)? > 0)
        })
    }

    pub fn delete_many(&self, collection: &str, filter: impl Into<Filter>) -> Result<u64> {
        let filter = filter.into().into_document();
        self.execute("delete_many", collection, |store, name| {
            store.delete_many(name, filter)
        })
    }

    // ------------------------------------------------------------------
    // Utility methods
    // ------------------------------------------------------------------

    /// Drop an entire collection (irreversible)
    pub fn drop_collection(&self, collection: &str) -> Result<bool> {
        self.execute("drop_collection", collection, |store, name| {
            store.drop_collection(name)?;
            Ok(true)
        })
    }

    /// Names of all collections in the database
    pub fn list_collections(&self) -> Result<BTreeSet<String>> {
        self.connected()
            .and_then(|store| store.list_collection_names())
            .map(|names| names.into_iter().collect())
            .inspect_err(|e| error!(operation = "list_collections", error = %e, "Error listing collections"))
    }
}

impl std::fmt::Debug for DocumentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentClient")
            .field("database_name", &self.database_name)
            .field("connected", &self.is_connected())
            .finish()
    }
}
