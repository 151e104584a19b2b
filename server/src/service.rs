//! Translation between the wire and persisted todo forms.
//!
//! # Design
//! `TodoService` owns the only two pieces of business logic this system has:
//! the non-empty-title invariant and the wire/document mapping. It is handed
//! to the handlers as shared state and fans out to whichever `TodoStore` was
//! wired in at startup.

use std::sync::Arc;

use bson::oid::ObjectId;
use tracing::{debug, warn};

use todos_core::{Todo, TodoError, TodoInput};

use crate::store::{TodoDocument, TodoStore};

/// Parses an externally supplied identifier into a storage key.
///
/// Surrounding whitespace is tolerated (the id arrives from a URL segment);
/// anything that is not 24 hex characters is a validation failure, distinct
/// from a key that simply matches nothing.
fn parse_id(raw: &str) -> Result<ObjectId, TodoError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| TodoError::InvalidId)
}

/// The todo service. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Validates the input, persists a new document and returns the
    /// generated identifier in its external hex form.
    pub async fn create(&self, input: TodoInput) -> Result<String, TodoError> {
        input.validate()?;

        let document = TodoDocument {
            id: ObjectId::new(),
            title: input.title,
            completed: input.completed,
            created_at: bson::DateTime::now(),
        };
        let id = document.id;

        self.store.insert(document).await?;
        Ok(id.to_hex())
    }

    /// Returns every stored todo in wire form.
    ///
    /// Documents that fail to decode are skipped, not fatal; the skip count
    /// is surfaced in the log so a corrupt collection does not go unnoticed.
    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let scan = self.store.all().await?;
        if scan.skipped > 0 {
            warn!(skipped = scan.skipped, "skipped undecodable todo documents");
        }
        Ok(scan.documents.into_iter().map(Todo::from).collect())
    }

    /// Rewrites `title` and `completed` on the addressed document. The
    /// identifier and creation timestamp are never touched.
    ///
    /// A well-formed id that matches nothing still reports success; only the
    /// log records the no-op.
    pub async fn update(&self, id: &str, input: TodoInput) -> Result<(), TodoError> {
        let id = parse_id(id)?;
        input.validate()?;

        let matched = self.store.update(id, input.title, input.completed).await?;
        if matched == 0 {
            debug!(id = %id, "update matched no document");
        }
        Ok(())
    }

    /// Removes the addressed document if present. Deleting nothing is not an
    /// error.
    pub async fn delete(&self, id: &str) -> Result<(), TodoError> {
        let id = parse_id(id)?;

        let deleted = self.store.delete(id).await?;
        if deleted == 0 {
            debug!(id = %id, "delete matched no document");
        }
        Ok(())
    }
}
