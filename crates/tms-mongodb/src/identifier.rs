//! Document identifiers
//!
//! Identifiers are 12-byte ObjectIds on the wire and 24-character hex strings
//! at the client boundary. Conversion is always explicit: [`DocumentId::parse`]
//! in, [`Display`](std::fmt::Display) out.

use std::fmt;
use std::str::FromStr;

use bson::{oid::ObjectId, Bson};
use tms_common::{Result, TmsError};

/// Field every stored document is keyed by
pub const ID_FIELD: &str = "_id";

/// Identifier of a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the canonical string form
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` unless `value` is exactly 24 hex characters.
    pub fn parse(value: &str) -> Result<Self> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|e| TmsError::InvalidIdentifier {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DocumentId {
    type Err = TmsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<DocumentId> for Bson {
    fn from(id: DocumentId) -> Self {
        Bson::ObjectId(id.object_id())
    }
}

/// Render a stored identifier value in its string form.
///
/// ObjectIds become hex, strings are kept as-is, anything else uses its
/// display form.
pub fn render_id(value: &Bson) -> String {
    match value {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Replace the `_id` field of a returned record with its string form
pub(crate) fn stringify_id(mut record: bson::Document) -> bson::Document {
    if let Some(id) = record.get(ID_FIELD) {
        let rendered = render_id(id);
        record.insert(ID_FIELD, rendered);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_parse_roundtrip() {
        let id = DocumentId::new();
        let parsed = DocumentId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert_eq!(id.to_string().len(), 24);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for bad in ["not-a-valid-id", "", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "507f1f77bcf86cd7994390111"] {
            let err = DocumentId::parse(bad).unwrap_err();
            match err {
                TmsError::InvalidIdentifier { value, .. } => assert_eq!(value, bad),
                other => panic!("Expected InvalidIdentifier, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_str() {
        let id: DocumentId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_into_bson() {
        let id = DocumentId::new();
        assert_eq!(Bson::from(id), Bson::ObjectId(id.object_id()));
    }

    #[test]
    fn test_stringify_id() {
        let oid = ObjectId::new();
        let record = stringify_id(doc! { "_id": oid, "name": "x" });
        assert_eq!(record.get_str("_id").unwrap(), oid.to_hex());
        assert_eq!(record.get_str("name").unwrap(), "x");

        let custom = stringify_id(doc! { "_id": "E001" });
        assert_eq!(custom.get_str("_id").unwrap(), "E001");

        let numeric = stringify_id(doc! { "_id": 7 });
        assert_eq!(numeric.get_str("_id").unwrap(), "7");

        let without = stringify_id(doc! { "name": "x" });
        assert!(!without.contains_key("_id"));
    }
}
