use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::Value;

use super::manager::DatabaseError;

/// Parse a caller-supplied hex string into an ObjectId
pub fn parse_object_id(id: &str) -> Result<ObjectId, DatabaseError> {
    ObjectId::parse_str(id.trim()).map_err(|_| DatabaseError::InvalidId(id.to_string()))
}

/// Render a BSON value the way the web client expects it: ObjectIds as
/// plain hex strings, datetimes as RFC 3339, everything else as relaxed
/// extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
}
