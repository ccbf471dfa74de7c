use futures::TryStreamExt;
use mongodb::{
    bson::{self, Document},
    options::{FindOneOptions, FindOptions},
    Collection,
};
use serde::Serialize;
use serde_json::Value;

use super::document::document_to_json;
use super::manager::DatabaseError;
use super::results::{DeleteAck, InsertAck, UpdateAck};

/// Single-collection access. Every method maps to exactly one driver call
/// and hands back JSON-ready values.
#[derive(Clone, Debug)]
pub struct Repository {
    collection: Collection<Document>,
}

impl Repository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    pub async fn select_any(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Value>, DatabaseError> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    pub async fn select_one(
        &self,
        filter: Document,
        options: FindOneOptions,
    ) -> Result<Option<Value>, DatabaseError> {
        let doc = self.collection.find_one(filter).with_options(options).await?;
        Ok(doc.map(document_to_json))
    }

    pub async fn select_404(
        &self,
        filter: Document,
        options: FindOneOptions,
    ) -> Result<Value, DatabaseError> {
        self.select_one(filter, options)
            .await?
            .ok_or_else(|| DatabaseError::NotFound("Record not found".to_string()))
    }

    /// Approximate count from collection metadata
    pub async fn estimated_count(&self) -> Result<u64, DatabaseError> {
        Ok(self.collection.estimated_document_count().await?)
    }

    pub async fn insert<T: Serialize>(&self, record: &T) -> Result<InsertAck, DatabaseError> {
        let doc = bson::to_document(record)?;
        let result = self.collection.insert_one(doc).await?;
        Ok(result.into())
    }

    pub async fn update(
        &self,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> Result<UpdateAck, DatabaseError> {
        let result = self
            .collection
            .update_one(filter, update)
            .upsert(upsert)
            .await?;
        Ok(result.into())
    }

    pub async fn delete(&self, filter: Document) -> Result<DeleteAck, DatabaseError> {
        let result = self.collection.delete_one(filter).await?;
        Ok(result.into())
    }
}
