//! [`DocumentStore`] over a live MongoDB connection

use bson::{Bson, Document as BsonDocument};
use tms_common::{Result, TmsError};

use super::{DocumentStore, UpdateOutcome};
use crate::connection::Connection;
use crate::query::FindOptions;

impl DocumentStore for Connection {
    fn ping(&self) -> Result<()> {
        self.check_alive()
    }

    fn insert_one(&self, collection: &str, document: BsonDocument) -> Result<Bson> {
        let result = self.collection(collection).insert_one(document).run()?;
        Ok(result.inserted_id)
    }

    fn insert_many(&self, collection: &str, documents: Vec<BsonDocument>) -> Result<Vec<Bson>> {
        let expected = documents.len();
        let result = self.collection(collection).insert_many(documents).run()?;

        let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);
        if ids.len() != expected {
            return Err(TmsError::Store(format!(
                "Inserted {} of {} documents",
                ids.len(),
                expected
            )));
        }
        Ok(ids.into_iter().map(|(_, id)| id).collect())
    }

    fn find_one(&self, collection: &str, filter: BsonDocument) -> Result<Option<BsonDocument>> {
        Ok(self.collection(collection).find_one(filter).run()?)
    }

    fn find(
        &self,
        collection: &str,
        filter: BsonDocument,
        options: FindOptions,
    ) -> Result<Vec<BsonDocument>> {
        let collection = self.collection(collection);
        let mut find = collection.find(filter);
        if let Some(skip) = options.get_skip() {
            find = find.skip(skip);
        }
        if let Some(limit) = options.get_limit() {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find.run()?;
        cursor
            .map(|document| document.map_err(TmsError::from))
            .collect()
    }

    fn count_documents(&self, collection: &str, filter: BsonDocument) -> Result<u64> {
        Ok(self.collection(collection).count_documents(filter).run()?)
    }

    fn update_one(
        &self,
        collection: &str,
        filter: BsonDocument,
        update: BsonDocument,
        upsert: bool,
    ) -> Result<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_one(filter, update)
            .upsert(upsert)
            .run()?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        })
    }

    fn update_many(
        &self,
        collection: &str,
        filter: BsonDocument,
        update: BsonDocument,
    ) -> Result<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_many(filter, update)
            .run()?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        })
    }

    fn delete_one(&self, collection: &str, filter: BsonDocument) -> Result<u64> {
        let result = self.collection(collection).delete_one(filter).run()?;
        Ok(result.deleted_count)
    }

    fn delete_many(&self, collection: &str, filter: BsonDocument) -> Result<u64> {
        let result = self.collection(collection).delete_many(filter).run()?;
        Ok(result.deleted_count)
    }

    fn drop_collection(&self, collection: &str) -> Result<()> {
        self.collection(collection).drop().run()?;
        Ok(())
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.database().list_collection_names().run()?)
    }
}
