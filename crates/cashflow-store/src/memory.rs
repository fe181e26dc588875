//! In-memory document store
//!
//! Stand-in for an external document database. Documents live in plain
//! vectors so find-all returns them in insertion order, which is the
//! store's natural order.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{DocumentStore, StoreError, ACCOUNTS, ID_FIELD, TRANSACTIONS};

/// An in-memory document store with the two ledger collections pre-created
pub struct MemoryStore {
    name: String,
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Create an empty store with the given database name
    pub fn new(name: &str) -> Self {
        let mut collections = HashMap::new();
        collections.insert(ACCOUNTS.to_string(), Vec::new());
        collections.insert(TRANSACTIONS.to_string(), Vec::new());
        Self {
            name: name.to_string(),
            collections: RwLock::new(collections),
        }
    }

    /// Database name this store was created with
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        Ok(documents.clone())
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<Value, StoreError> {
        let mut stored = match document {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject),
        };
        let id = Uuid::new_v4().to_string();
        stored.insert(ID_FIELD.to_string(), Value::String(id));

        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        let stored = Value::Object(stored);
        documents.push(stored.clone());
        Ok(stored)
    }

    async fn set_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        for document in documents.iter_mut() {
            if crate::document_id(document) == Some(id) {
                let object = document.as_object_mut().ok_or(StoreError::NotAnObject)?;
                for (key, value) in fields {
                    object.insert(key, value);
                }
                return Ok(());
            }
        }

        // Absent id: no-op, matching the collaborator's contract
        log::debug!("set_fields on absent id {} in {}", id, collection);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        documents.retain(|document| crate::document_id(document) != Some(id));
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = MemoryStore::new("cashflow");
        let stored = store
            .insert(ACCOUNTS, json!({"institution": "Chase"}))
            .await
            .unwrap();
        assert!(crate::document_id(&stored).is_some());
        assert_eq!(stored["institution"], "Chase");
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = MemoryStore::new("cashflow");
        for n in 0..5 {
            store
                .insert(TRANSACTIONS, json!({"seq": n.to_string()}))
                .await
                .unwrap();
        }
        let documents = store.find_all(TRANSACTIONS).await.unwrap();
        let sequence: Vec<&str> = documents
            .iter()
            .map(|d| d["seq"].as_str().unwrap())
            .collect();
        assert_eq!(sequence, vec!["0", "1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_set_fields_updates_only_named_fields() {
        let store = MemoryStore::new("cashflow");
        let stored = store
            .insert(ACCOUNTS, json!({"institution": "Chase", "amount": "100"}))
            .await
            .unwrap();
        let id = crate::document_id(&stored).unwrap().to_string();

        let mut fields = Map::new();
        fields.insert("amount".to_string(), json!("250.00"));
        store.set_fields(ACCOUNTS, &id, fields).await.unwrap();

        let documents = store.find_all(ACCOUNTS).await.unwrap();
        assert_eq!(documents[0]["amount"], "250.00");
        assert_eq!(documents[0]["institution"], "Chase");
    }

    #[tokio::test]
    async fn test_set_fields_on_absent_id_is_noop() {
        let store = MemoryStore::new("cashflow");
        let mut fields = Map::new();
        fields.insert("amount".to_string(), json!("1.00"));
        assert!(store.set_fields(ACCOUNTS, "missing", fields).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = MemoryStore::new("cashflow");
        let stored = store
            .insert(ACCOUNTS, json!({"institution": "Chase"}))
            .await
            .unwrap();
        let id = crate::document_id(&stored).unwrap().to_string();

        store.remove(ACCOUNTS, &id).await.unwrap();
        assert!(store.find_all(ACCOUNTS).await.unwrap().is_empty());
        // Removing again still succeeds
        store.remove(ACCOUNTS, &id).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_collection_rejected() {
        let store = MemoryStore::new("cashflow");
        assert!(matches!(
            store.find_all("budgets").await,
            Err(StoreError::UnknownCollection(_))
        ));
    }
}
