pub mod document;
pub mod manager;
pub mod models;
pub mod repository;
pub mod results;

pub use document::{document_to_json, parse_object_id};
pub use manager::{DatabaseError, Store};
pub use models::{FieldErrors, Validate};
pub use repository::Repository;
pub use results::{CountAck, DeleteAck, InsertAck, UpdateAck};
