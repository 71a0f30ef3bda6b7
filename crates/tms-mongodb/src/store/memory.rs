//! In-process [`DocumentStore`]
//!
//! Keeps every collection as an insertion-ordered list of documents behind a
//! single lock. Supports the subset of MongoDB semantics the client relies on:
//! - filters: literal equality (array fields match on any element), dotted
//!   paths, `$eq $ne $gt $gte $lt $lte $in $nin $exists`, `$and`, `$or`
//! - updates: `$set`, `$unset`, `$inc`, with upsert
//!
//! Anything else fails with a store error, the way an unknown operator fails
//! on a real server.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use bson::{oid::ObjectId, Bson, Document as BsonDocument};
use parking_lot::{Mutex, RwLock};
use tms_common::{Result, TmsError};

use super::{DocumentStore, UpdateOutcome};
use crate::config::ClientConfig;
use crate::identifier::ID_FIELD;
use crate::provider::Connector;
use crate::query::FindOptions;

/// In-memory document store
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Vec<BsonDocument>>>,
    injected_failure: Mutex<Option<TmsError>>,
    operations: AtomicU64,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following operation fail with `error` until cleared
    pub fn inject_failure(&self, error: TmsError) {
        *self.injected_failure.lock() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.injected_failure.lock() = None;
    }

    /// Number of operations that reached the store, failed ones included
    pub fn operation_count(&self) -> u64 {
        self.operations.load(AtomicOrdering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(AtomicOrdering::SeqCst)
    }

    /// Count an operation and fail it if the store is closed or a failure is injected
    fn enter(&self) -> Result<()> {
        self.operations.fetch_add(1, AtomicOrdering::SeqCst);
        if self.is_closed() {
            return Err(TmsError::Connection("store closed".to_string()));
        }
        match self.injected_failure.lock().as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn insert_into(documents: &mut Vec<BsonDocument>, document: BsonDocument) -> Result<Bson> {
        let stored = match document.get(ID_FIELD).cloned() {
            Some(id) => {
                if documents.iter().any(|d| d.get(ID_FIELD) == Some(&id)) {
                    return Err(TmsError::Store(format!(
                        "E11000 duplicate key error: {{ _id: {} }}",
                        id
                    )));
                }
                document
            }
            None => {
                let mut stored = BsonDocument::new();
                stored.insert(ID_FIELD, ObjectId::new());
                stored.extend(document);
                stored
            }
        };

        let id = stored.get(ID_FIELD).cloned().unwrap_or(Bson::Null);
        documents.push(stored);
        Ok(id)
    }
}

impl DocumentStore for MemoryStore {
    fn ping(&self) -> Result<()> {
        self.enter()
    }

    fn insert_one(&self, collection: &str, document: BsonDocument) -> Result<Bson> {
        self.enter()?;
        let mut collections = self.collections.write();
        let documents = collections.entry(collection.to_string()).or_default();
        Self::insert_into(documents, document)
    }

    fn insert_many(&self, collection: &str, documents: Vec<BsonDocument>) -> Result<Vec<Bson>> {
        self.enter()?;
        let mut collections = self.collections.write();
        let stored = collections.entry(collection.to_string()).or_default();
        // Ordered insert: stops at the first failure, earlier documents stay
        documents
            .into_iter()
            .map(|document| Self::insert_into(stored, document))
            .collect()
    }

    fn find_one(&self, collection: &str, filter: BsonDocument) -> Result<Option<BsonDocument>> {
        Ok(self
            .find(collection, filter, FindOptions::new().limit(1))?
            .into_iter()
            .next())
    }

    fn find(
        &self,
        collection: &str,
        filter: BsonDocument,
        options: FindOptions,
    ) -> Result<Vec<BsonDocument>> {
        self.enter()?;
        let collections = self.collections.read();
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched = Vec::new();
        for document in documents {
            if matches_filter(document, &filter)? {
                matched.push(document.clone());
            }
        }
        Ok(options.apply(matched.into_iter()).collect())
    }

    fn count_documents(&self, collection: &str, filter: BsonDocument) -> Result<u64> {
        Ok(self.find(collection, filter, FindOptions::new())?.len() as u64)
    }

    fn update_one(
        &self,
        collection: &str,
        filter: BsonDocument,
        update: BsonDocument,
        upsert: bool,
    ) -> Result<UpdateOutcome> {
        self.enter()?;
        check_update_document(&update)?;
        let mut collections = self.collections.write();

        if let Some(documents) = collections.get_mut(collection) {
            for document in documents.iter_mut() {
                if matches_filter(document, &filter)? {
                    let modified = apply_update(document, &update)?;
                    return Ok(UpdateOutcome {
                        matched_count: 1,
                        modified_count: u64::from(modified),
                        upserted_id: None,
                    });
                }
            }
        }

        if !upsert {
            return Ok(UpdateOutcome::default());
        }

        let mut created = seed_from_filter(&filter);
        apply_update(&mut created, &update)?;
        let documents = collections.entry(collection.to_string()).or_default();
        let id = Self::insert_into(documents, created)?;
        Ok(UpdateOutcome {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        })
    }

    fn update_many(
        &self,
        collection: &str,
        filter: BsonDocument,
        update: BsonDocument,
    ) -> Result<UpdateOutcome> {
        self.enter()?;
        check_update_document(&update)?;
        let mut collections = self.collections.write();
        let mut outcome = UpdateOutcome::default();

        if let Some(documents) = collections.get_mut(collection) {
            for document in documents.iter_mut() {
                if matches_filter(document, &filter)? {
                    outcome.matched_count += 1;
                    if apply_update(document, &update)? {
                        outcome.modified_count += 1;
                    }
                }
            }
        }
        Ok(outcome)
    }

    fn delete_one(&self, collection: &str, filter: BsonDocument) -> Result<u64> {
        self.enter()?;
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let mut target = None;
        for (index, document) in documents.iter().enumerate() {
            if matches_filter(document, &filter)? {
                target = Some(index);
                break;
            }
        }
        Ok(match target {
            Some(index) => {
                documents.remove(index);
                1
            }
            None => 0,
        })
    }

    fn delete_many(&self, collection: &str, filter: BsonDocument) -> Result<u64> {
        self.enter()?;
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        // Evaluate every document first so a filter error removes nothing
        let mut keep = Vec::with_capacity(documents.len());
        for document in documents.iter() {
            keep.push(!matches_filter(document, &filter)?);
        }

        let before = documents.len();
        let mut flags = keep.into_iter();
        documents.retain(|_| flags.next().unwrap_or(true));
        Ok((before - documents.len()) as u64)
    }

    fn drop_collection(&self, collection: &str) -> Result<()> {
        self.enter()?;
        self.collections.write().remove(collection);
        Ok(())
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        self.enter()?;
        Ok(self.collections.read().keys().cloned().collect())
    }

    fn close(&self) {
        self.closed.store(true, AtomicOrdering::SeqCst);
    }
}

// ============================================================================
// Filters
// ============================================================================

fn matches_filter(document: &BsonDocument, filter: &BsonDocument) -> Result<bool> {
    for (key, condition) in filter {
        let matched = match key.as_str() {
            "$and" => {
                let mut all = true;
                for clause in sub_filters(key, condition)? {
                    all &= matches_filter(document, clause)?;
                }
                all
            }
            "$or" => {
                let mut any = false;
                for clause in sub_filters(key, condition)? {
                    any |= matches_filter(document, clause)?;
                }
                any
            }
            op if op.starts_with('$') => {
                return Err(TmsError::Store(format!("unknown top level operator: {}", op)))
            }
            path => matches_condition(lookup_path(document, path), condition)?,
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn sub_filters<'a>(operator: &str, value: &'a Bson) -> Result<Vec<&'a BsonDocument>> {
    let invalid = || TmsError::Store(format!("{} must be an array of documents", operator));
    let clauses = value.as_array().ok_or_else(invalid)?;
    clauses
        .iter()
        .map(|clause| clause.as_document().ok_or_else(invalid))
        .collect()
}

fn is_operator_document(value: &Bson) -> bool {
    match value {
        Bson::Document(doc) => doc.keys().next().is_some_and(|k| k.starts_with('$')),
        _ => false,
    }
}

fn matches_condition(value: Option<&Bson>, condition: &Bson) -> Result<bool> {
    let Bson::Document(operators) = condition else {
        return Ok(values_equal(value, condition));
    };
    if !is_operator_document(condition) {
        return Ok(values_equal(value, condition));
    }

    for (operator, operand) in operators {
        let matched = match operator.as_str() {
            "$eq" => values_equal(value, operand),
            "$ne" => !values_equal(value, operand),
            "$gt" => compares(value, operand, |o| o == Ordering::Greater),
            "$gte" => compares(value, operand, |o| o != Ordering::Less),
            "$lt" => compares(value, operand, |o| o == Ordering::Less),
            "$lte" => compares(value, operand, |o| o != Ordering::Greater),
            "$in" => in_list(value, operator, operand)?,
            "$nin" => !in_list(value, operator, operand)?,
            "$exists" => value.is_some() == truthy(operand),
            other => return Err(TmsError::Store(format!("unknown operator: {}", other))),
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn in_list(value: Option<&Bson>, operator: &str, operand: &Bson) -> Result<bool> {
    let candidates = operand
        .as_array()
        .ok_or_else(|| TmsError::Store(format!("{} needs an array", operator)))?;
    Ok(candidates.iter().any(|c| values_equal(value, c)))
}

fn truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(b) => *b,
        Bson::Null => false,
        Bson::Int32(i) => *i != 0,
        Bson::Int64(i) => *i != 0,
        Bson::Double(f) => *f != 0.0,
        _ => true,
    }
}

/// Equality as a query sees it: a missing field equals null, array fields
/// match when any element matches.
fn values_equal(value: Option<&Bson>, expected: &Bson) -> bool {
    match value {
        None => matches!(expected, Bson::Null),
        Some(actual) => {
            bson_equal(actual, expected)
                || matches!(actual, Bson::Array(items) if items.iter().any(|i| bson_equal(i, expected)))
        }
    }
}

fn bson_equal(a: &Bson, b: &Bson) -> bool {
    match compare_values(a, b) {
        Some(ordering) => ordering == Ordering::Equal,
        None => a == b,
    }
}

fn compares(value: Option<&Bson>, operand: &Bson, accept: impl Fn(Ordering) -> bool) -> bool {
    value
        .and_then(|actual| compare_values(actual, operand))
        .is_some_and(accept)
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

/// Ordering between two values of comparable types, `None` otherwise
fn compare_values(a: &Bson, b: &Bson) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (as_number(a), as_number(b)) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn lookup_path<'a>(document: &'a BsonDocument, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_document()?.get(segment)?;
    }
    Some(current)
}

// ============================================================================
// Updates
// ============================================================================

fn check_update_document(update: &BsonDocument) -> Result<()> {
    if update.is_empty() {
        return Err(TmsError::Store("update document must not be empty".to_string()));
    }
    for (operator, fields) in update {
        if !operator.starts_with('$') {
            return Err(TmsError::Store(format!(
                "update document requires atomic operators, found '{}'",
                operator
            )));
        }
        if !matches!(operator.as_str(), "$set" | "$unset" | "$inc") {
            return Err(TmsError::Store(format!("unknown update operator: {}", operator)));
        }
        if fields.as_document().is_none() {
            return Err(TmsError::Store(format!(
                "modifier {} expects a document",
                operator
            )));
        }
    }
    Ok(())
}

/// Apply an operator document; returns whether the document changed.
/// On error the document is left untouched.
fn apply_update(target: &mut BsonDocument, update: &BsonDocument) -> Result<bool> {
    let mut updated = target.clone();

    for (operator, fields) in update {
        let Some(fields) = fields.as_document() else {
            continue;
        };
        for (path, value) in fields {
            if path == ID_FIELD {
                match (operator.as_str(), updated.get(ID_FIELD)) {
                    ("$set", Some(existing)) if existing == value => continue,
                    ("$set", None) => {}
                    _ => {
                        return Err(TmsError::Store(
                            "Performing an update on the path '_id' would modify the immutable field '_id'"
                                .to_string(),
                        ))
                    }
                }
            }
            match operator.as_str() {
                "$set" => set_path(&mut updated, path, value.clone())?,
                "$unset" => unset_path(&mut updated, path),
                "$inc" => {
                    let current = lookup_path(&updated, path).cloned();
                    let next = increment(path, current.as_ref(), value)?;
                    set_path(&mut updated, path, next)?;
                }
                other => return Err(TmsError::Store(format!("unknown update operator: {}", other))),
            }
        }
    }

    let changed = updated != *target;
    *target = updated;
    Ok(changed)
}

fn set_path(document: &mut BsonDocument, path: &str, value: Bson) -> Result<()> {
    match path.split_once('.') {
        None => {
            document.insert(path, value);
            Ok(())
        }
        Some((head, rest)) => {
            if !document.contains_key(head) {
                document.insert(head, BsonDocument::new());
            }
            match document.get_mut(head) {
                Some(Bson::Document(child)) => set_path(child, rest, value),
                _ => Err(TmsError::Store(format!(
                    "Cannot create field '{}' in element {{{}: ...}}",
                    rest, head
                ))),
            }
        }
    }
}

fn unset_path(document: &mut BsonDocument, path: &str) {
    match path.split_once('.') {
        None => {
            document.remove(path);
        }
        Some((head, rest)) => {
            if let Some(Bson::Document(child)) = document.get_mut(head) {
                unset_path(child, rest);
            }
        }
    }
}

fn increment(path: &str, current: Option<&Bson>, by: &Bson) -> Result<Bson> {
    let non_numeric = || TmsError::Store(format!("Cannot apply $inc to non-numeric field '{}'", path));
    let current = current.cloned().unwrap_or(Bson::Int32(0));

    let next = match (&current, by) {
        (Bson::Int32(a), Bson::Int32(b)) => a
            .checked_add(*b)
            .map(Bson::Int32)
            .unwrap_or_else(|| Bson::Int64(i64::from(*a) + i64::from(*b))),
        (Bson::Int32(_) | Bson::Int64(_), Bson::Int32(_) | Bson::Int64(_)) => {
            let a = current.as_i64().or_else(|| current.as_i32().map(i64::from));
            let b = by.as_i64().or_else(|| by.as_i32().map(i64::from));
            match (a, b) {
                (Some(a), Some(b)) => Bson::Int64(a.checked_add(b).ok_or_else(non_numeric)?),
                _ => return Err(non_numeric()),
            }
        }
        _ => match (as_number(&current), as_number(by)) {
            (Some(a), Some(b)) => Bson::Double(a + b),
            _ => return Err(non_numeric()),
        },
    };
    Ok(next)
}

/// Starting document for an upsert: the equality conditions of the filter
fn seed_from_filter(filter: &BsonDocument) -> BsonDocument {
    let mut seeded = BsonDocument::new();
    for (key, condition) in filter {
        if key.starts_with('$') || key.contains('.') {
            continue;
        }
        match condition {
            Bson::Document(ops) if is_operator_document(condition) => {
                if let Some(value) = ops.get("$eq") {
                    seeded.insert(key.clone(), value.clone());
                }
            }
            literal => {
                seeded.insert(key.clone(), literal.clone());
            }
        }
    }
    seeded
}

// ============================================================================
// Connector
// ============================================================================

/// Hands out one shared [`MemoryStore`] and records connection attempts
pub struct MemoryConnector {
    store: Arc<MemoryStore>,
    attempts: AtomicUsize,
    failures_remaining: AtomicUsize,
    connect_delay: Option<Duration>,
}

impl MemoryConnector {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            attempts: AtomicUsize::new(0),
            failures_remaining: AtomicUsize::new(0),
            connect_delay: None,
        }
    }

    /// Fail the next `count` connection attempts with a connection error
    pub fn failing(self, count: usize) -> Self {
        self.failures_remaining.store(count, AtomicOrdering::SeqCst);
        self
    }

    /// Sleep this long inside every attempt
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(AtomicOrdering::SeqCst)
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }
}

impl Connector for MemoryConnector {
    fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn DocumentStore>> {
        self.attempts.fetch_add(1, AtomicOrdering::SeqCst);
        if let Some(delay) = self.connect_delay {
            std::thread::sleep(delay);
        }

        let failing = self
            .failures_remaining
            .fetch_update(AtomicOrdering::SeqCst, AtomicOrdering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(TmsError::Connection(format!(
                "Server selection timeout for {}:{}",
                config.host, config.port
            )));
        }

        self.store.ping()?;
        Ok(Arc::clone(&self.store) as Arc<dyn DocumentStore>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_many(
                "people",
                vec![
                    doc! { "name": "ana", "age": 31, "tags": ["a", "b"], "address": { "city": "London" } },
                    doc! { "name": "bo", "age": 25_i64, "tags": ["b"] },
                    doc! { "name": "cy", "age": 40.5 },
                ],
            )
            .unwrap();
        store
    }

    fn names(documents: Vec<BsonDocument>) -> Vec<String> {
        documents
            .iter()
            .map(|d| d.get_str("name").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_insert_generates_leading_id() {
        let store = MemoryStore::new();
        let id = store.insert_one("c", doc! { "x": 1 }).unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));
        let stored = store.find_one("c", doc! {}).unwrap().unwrap();
        assert_eq!(stored.keys().next().map(String::as_str), Some("_id"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        store.insert_one("c", doc! { "_id": "k" }).unwrap();
        let err = store.insert_one("c", doc! { "_id": "k" }).unwrap_err();
        assert!(matches!(err, TmsError::Store(_)));
    }

    #[test]
    fn test_filter_operators() {
        let store = seeded();
        let find = |filter| names(store.find("people", filter, FindOptions::new()).unwrap());

        assert_eq!(find(doc! { "age": 31 }), vec!["ana"]);
        assert_eq!(find(doc! { "age": { "$gt": 25 } }), vec!["ana", "cy"]);
        assert_eq!(find(doc! { "age": { "$gte": 25, "$lt": 40 } }), vec!["ana", "bo"]);
        assert_eq!(find(doc! { "tags": "b" }), vec!["ana", "bo"]);
        assert_eq!(find(doc! { "name": { "$in": ["bo", "cy"] } }), vec!["bo", "cy"]);
        assert_eq!(find(doc! { "name": { "$nin": ["bo", "cy"] } }), vec!["ana"]);
        assert_eq!(find(doc! { "tags": { "$exists": false } }), vec!["cy"]);
        assert_eq!(find(doc! { "address.city": "London" }), vec!["ana"]);
        assert_eq!(find(doc! { "$or": [{ "name": "bo" }, { "age": 40.5 }] }), vec!["bo", "cy"]);
        assert_eq!(find(doc! { "name": { "$ne": "ana" } }), vec!["bo", "cy"]);
    }

    #[test]
    fn test_unknown_filter_operator() {
        let store = seeded();
        let err = store
            .find("people", doc! { "age": { "$near": 3 } }, FindOptions::new())
            .unwrap_err();
        assert!(matches!(err, TmsError::Store(_)));
    }

    #[test]
    fn test_update_operators() {
        let store = seeded();
        let outcome = store
            .update_one(
                "people",
                doc! { "name": "ana" },
                doc! { "$set": { "address.zip": "N1" }, "$inc": { "age": 1 }, "$unset": { "tags": "" } },
                false,
            )
            .unwrap();
        assert!(outcome.changed());

        let ana = store.find_one("people", doc! { "name": "ana" }).unwrap().unwrap();
        assert_eq!(ana.get_i32("age").unwrap(), 32);
        assert_eq!(ana.get_document("address").unwrap().get_str("zip").unwrap(), "N1");
        assert!(!ana.contains_key("tags"));
    }

    #[test]
    fn test_update_without_change_is_not_modified() {
        let store = seeded();
        let outcome = store
            .update_one("people", doc! { "name": "bo" }, doc! { "$set": { "age": 25_i64 } }, false)
            .unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 0);
    }

    #[test]
    fn test_update_requires_operators() {
        let store = seeded();
        let err = store
            .update_one("people", doc! {}, doc! { "age": 1 }, false)
            .unwrap_err();
        assert!(matches!(err, TmsError::Store(_)));
    }

    #[test]
    fn test_update_cannot_change_id() {
        let store = seeded();
        let err = store
            .update_one("people", doc! { "name": "ana" }, doc! { "$set": { "_id": 5 } }, false)
            .unwrap_err();
        assert!(matches!(err, TmsError::Store(_)));
    }

    #[test]
    fn test_upsert_seeds_from_filter() {
        let store = seeded();
        let outcome = store
            .update_one("people", doc! { "name": "dee" }, doc! { "$set": { "age": 19 } }, true)
            .unwrap();
        assert!(outcome.upserted_id.is_some());
        let dee = store.find_one("people", doc! { "name": "dee" }).unwrap().unwrap();
        assert_eq!(dee.get_i32("age").unwrap(), 19);
        assert_eq!(dee.get(ID_FIELD), outcome.upserted_id.as_ref());
    }

    #[test]
    fn test_increment_types() {
        assert_eq!(increment("n", Some(&Bson::Int32(i32::MAX)), &Bson::Int32(1)).unwrap(), Bson::Int64(i64::from(i32::MAX) + 1));
        assert_eq!(increment("n", None, &Bson::Int32(2)).unwrap(), Bson::Int32(2));
        assert_eq!(increment("n", Some(&Bson::Double(1.5)), &Bson::Int32(1)).unwrap(), Bson::Double(2.5));
        assert!(increment("n", Some(&Bson::String("x".into())), &Bson::Int32(1)).is_err());
    }

    #[test]
    fn test_delete_and_drop() {
        let store = seeded();
        assert_eq!(store.delete_one("people", doc! { "name": "zed" }).unwrap(), 0);
        assert_eq!(store.delete_one("people", doc! { "tags": "b" }).unwrap(), 1);
        assert_eq!(store.delete_many("people", doc! {}).unwrap(), 2);
        assert_eq!(store.list_collection_names().unwrap(), vec!["people".to_string()]);
        store.drop_collection("people").unwrap();
        store.drop_collection("people").unwrap();
        assert!(store.list_collection_names().unwrap().is_empty());
    }

    #[test]
    fn test_injected_failure_and_close() {
        let store = seeded();
        store.inject_failure(TmsError::Store("disk full".to_string()));
        assert_eq!(
            store.count_documents("people", doc! {}).unwrap_err(),
            TmsError::Store("disk full".to_string())
        );
        store.clear_failure();
        assert_eq!(store.count_documents("people", doc! {}).unwrap(), 3);

        store.close();
        store.close();
        assert!(store.is_closed());
        assert!(store.ping().unwrap_err().is_connection_error());
    }

    #[test]
    fn test_connector_failures_then_success() {
        let config = ClientConfig {
            host: "localhost".to_string(),
            port: 27017,
            username: "u".to_string(),
            password: "p".to_string(),
            database_name: "tms".to_string(),
        };
        let connector = MemoryConnector::new(Arc::new(MemoryStore::new())).failing(1);
        assert!(connector.connect(&config).is_err());
        assert!(connector.connect(&config).is_ok());
        assert_eq!(connector.attempts(), 2);
    }
}
