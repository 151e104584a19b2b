//! Persistence layer: the `TodoStore` capability and its implementations.
//!
//! # Design
//! Handlers and the service never see the driver — they see `TodoStore`.
//! `MongoStore` is the real thing, one collection inside the fixed database.
//! `MemStore` keeps the same contract in a `HashMap` so the HTTP surface can
//! be exercised without a running deployment.
//!
//! Update and delete report how many documents matched instead of turning a
//! zero-match into an error; the service decides what that means.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use todos_core::{Todo, TodoError};

use crate::config;

/// A todo as it lives in the collection.
///
/// Field names follow the stored documents: the key is `_id`, the timestamp
/// is `createdAt`. The id is generated client-side at insert and never
/// changes; `createdAt` is written once and excluded from updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
}

impl From<TodoDocument> for Todo {
    fn from(document: TodoDocument) -> Self {
        Todo {
            id: document.id.to_hex(),
            title: document.title,
            completed: document.completed,
            created_at: document.created_at.to_chrono(),
        }
    }
}

/// Result of a full-collection scan.
///
/// `skipped` counts documents that failed to decode. The scan itself still
/// succeeds — one corrupt document must not take the whole listing down.
#[derive(Debug, Default)]
pub struct Scan {
    pub documents: Vec<TodoDocument>,
    pub skipped: u64,
}

/// Storage operations the service needs. Implementations must be safe to
/// share across concurrent requests; no locking is added above them.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persists a fully formed document under its own id.
    async fn insert(&self, document: TodoDocument) -> Result<(), TodoError>;

    /// Returns every document in the collection, in storage iteration order.
    async fn all(&self) -> Result<Scan, TodoError>;

    /// Sets `title` and `completed` on the matching document. Returns the
    /// matched count; zero is not an error.
    async fn update(&self, id: ObjectId, title: String, completed: bool) -> Result<u64, TodoError>;

    /// Removes the matching document. Returns the deleted count; zero is not
    /// an error.
    async fn delete(&self, id: ObjectId) -> Result<u64, TodoError>;
}

/// Decodes raw documents one at a time, counting the ones that fail.
fn decode_scan(raw: Vec<Document>) -> Scan {
    let mut scan = Scan::default();
    for document in raw {
        match bson::from_document::<TodoDocument>(document) {
            Ok(decoded) => scan.documents.push(decoded),
            Err(_) => scan.skipped += 1,
        }
    }
    scan
}

// ---------------------------------------------------------------------------
// MongoDB
// ---------------------------------------------------------------------------

/// The production store: one MongoDB collection.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Connects to the deployment behind `uri` and pings it.
    ///
    /// The driver connects lazily, so the ping is what turns an unreachable
    /// deployment into a startup failure instead of a failure on the first
    /// request.
    pub async fn connect(uri: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(config::DB_NAME);
        database.run_command(doc! { "ping": 1 }).await?;

        Ok(Self {
            collection: database.collection(config::COLLECTION_NAME),
        })
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert(&self, document: TodoDocument) -> Result<(), TodoError> {
        self.collection
            .insert_one(&document)
            .await
            .map_err(TodoError::storage)?;
        Ok(())
    }

    async fn all(&self) -> Result<Scan, TodoError> {
        // Scan raw documents and decode each one individually, so a single
        // undecodable document is skipped instead of failing the cursor.
        let raw = self.collection.clone_with_type::<Document>();
        let mut cursor = raw.find(doc! {}).await.map_err(TodoError::storage)?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(TodoError::storage)? {
            documents.push(document);
        }

        Ok(decode_scan(documents))
    }

    async fn update(&self, id: ObjectId, title: String, completed: bool) -> Result<u64, TodoError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "title": title, "completed": completed } },
            )
            .await
            .map_err(TodoError::storage)?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, TodoError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(TodoError::storage)?;
        Ok(result.deleted_count)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// In-memory store with the same matched/deleted-count semantics as Mongo.
/// Iteration order is whatever the map gives us, which is exactly the
/// guarantee the real store makes: none.
#[derive(Debug, Default)]
pub struct MemStore {
    documents: RwLock<HashMap<ObjectId, TodoDocument>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemStore {
    async fn insert(&self, document: TodoDocument) -> Result<(), TodoError> {
        self.documents.write().await.insert(document.id, document);
        Ok(())
    }

    async fn all(&self) -> Result<Scan, TodoError> {
        let documents = self.documents.read().await.values().cloned().collect();
        Ok(Scan {
            documents,
            skipped: 0,
        })
    }

    async fn update(&self, id: ObjectId, title: String, completed: bool) -> Result<u64, TodoError> {
        match self.documents.write().await.get_mut(&id) {
            Some(document) => {
                document.title = title;
                document.completed = completed;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, TodoError> {
        Ok(self.documents.write().await.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(title: &str) -> TodoDocument {
        TodoDocument {
            id: ObjectId::new(),
            title: title.to_string(),
            completed: false,
            created_at: bson::DateTime::now(),
        }
    }

    #[test]
    fn wire_form_renders_the_id_as_hex() {
        let doc = document("Buy milk");
        let id = doc.id;
        let todo = Todo::from(doc);

        assert_eq!(todo.id, id.to_hex());
        assert_eq!(todo.id.len(), 24);
        assert!(todo.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(todo.title, "Buy milk");
    }

    #[test]
    fn decode_scan_skips_undecodable_documents() {
        let good = bson::to_document(&document("still here")).unwrap();
        let corrupt = doc! { "_id": ObjectId::new(), "title": 7 };

        let scan = decode_scan(vec![good, corrupt]);

        assert_eq!(scan.documents.len(), 1);
        assert_eq!(scan.documents[0].title, "still here");
        assert_eq!(scan.skipped, 1);
    }

    #[tokio::test]
    async fn mem_store_inserts_and_lists() {
        let store = MemStore::new();
        let doc = document("one");
        let id = doc.id;

        store.insert(doc).await.unwrap();
        let scan = store.all().await.unwrap();

        assert_eq!(scan.documents.len(), 1);
        assert_eq!(scan.documents[0].id, id);
        assert_eq!(scan.skipped, 0);
    }

    #[tokio::test]
    async fn mem_store_update_reports_matched_count() {
        let store = MemStore::new();
        let doc = document("before");
        let id = doc.id;
        let created_at = doc.created_at;
        store.insert(doc).await.unwrap();

        let matched = store.update(id, "after".to_string(), true).await.unwrap();
        assert_eq!(matched, 1);

        let scan = store.all().await.unwrap();
        assert_eq!(scan.documents[0].title, "after");
        assert!(scan.documents[0].completed);
        // Untouched by the update.
        assert_eq!(scan.documents[0].id, id);
        assert_eq!(scan.documents[0].created_at, created_at);

        let unmatched = store
            .update(ObjectId::new(), "ghost".to_string(), false)
            .await
            .unwrap();
        assert_eq!(unmatched, 0);
    }

    #[tokio::test]
    async fn mem_store_delete_reports_deleted_count() {
        let store = MemStore::new();
        let doc = document("doomed");
        let id = doc.id;
        store.insert(doc).await.unwrap();

        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
        assert!(store.all().await.unwrap().documents.is_empty());
    }
}
