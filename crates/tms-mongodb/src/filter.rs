//! Filter and update documents
//!
//! Both are normalized when they are built, so every call site submits the
//! same shape to the store.

use bson::{doc, Bson, Document as BsonDocument};

use crate::identifier::{DocumentId, ID_FIELD};

/// Prefix that marks an update operator key (`$set`, `$inc`, ...)
pub const OPERATOR_SIGIL: char = '$';

/// Selects the documents an operation applies to
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Every document in the collection
    #[default]
    MatchAll,
    /// Documents whose field equals the value
    FieldEquals(String, Bson),
    /// A filter document passed through as-is
    Raw(BsonDocument),
}

impl Filter {
    /// Match documents where `field == value`
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::FieldEquals(field.into(), value.into())
    }

    /// Match the document with the given identifier
    pub fn by_id(id: DocumentId) -> Self {
        Filter::FieldEquals(ID_FIELD.to_string(), id.into())
    }

    /// Render as the filter document sent to the store
    pub fn into_document(self) -> BsonDocument {
        match self {
            Filter::MatchAll => BsonDocument::new(),
            Filter::FieldEquals(field, value) => {
                let mut filter = BsonDocument::new();
                filter.insert(field, value);
                filter
            }
            Filter::Raw(filter) => filter,
        }
    }
}

impl From<BsonDocument> for Filter {
    fn from(filter: BsonDocument) -> Self {
        if filter.is_empty() {
            Filter::MatchAll
        } else {
            Filter::Raw(filter)
        }
    }
}

impl From<Option<BsonDocument>> for Filter {
    fn from(filter: Option<BsonDocument>) -> Self {
        filter.map(Filter::from).unwrap_or_default()
    }
}

impl From<DocumentId> for Filter {
    fn from(id: DocumentId) -> Self {
        Filter::by_id(id)
    }
}

/// Describes a mutation of matched documents
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateSpec {
    /// Plain field → value pairs, submitted under `$set`
    ReplaceFields(BsonDocument),
    /// A document already keyed by update operators, submitted unchanged
    OperatorDocument(BsonDocument),
}

impl UpdateSpec {
    /// Set the given fields
    pub fn set(fields: BsonDocument) -> Self {
        UpdateSpec::ReplaceFields(fields)
    }

    /// Classify a raw update document.
    ///
    /// A document with any `$`-prefixed key is an operator document; any other
    /// document is a field replacement set.
    pub fn from_document(update: BsonDocument) -> Self {
        if update.keys().any(|key| key.starts_with(OPERATOR_SIGIL)) {
            UpdateSpec::OperatorDocument(update)
        } else {
            UpdateSpec::ReplaceFields(update)
        }
    }

    pub fn is_operator_document(&self) -> bool {
        matches!(self, UpdateSpec::OperatorDocument(_))
    }

    /// Render as the update document sent to the store
    pub fn into_document(self) -> BsonDocument {
        match self {
            UpdateSpec::ReplaceFields(fields) => doc! { "$set": fields },
            UpdateSpec::OperatorDocument(update) => update,
        }
    }
}

impl From<BsonDocument> for UpdateSpec {
    fn from(update: BsonDocument) -> Self {
        UpdateSpec::from_document(update)
    }
}
