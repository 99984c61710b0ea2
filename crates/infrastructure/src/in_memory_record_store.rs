use std::collections::HashMap;

use async_trait::async_trait;
use recordstep_application::RecordStore;
use recordstep_core::{AppError, AppResult};
use recordstep_domain::Record;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory record store implementation.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<String, Record>>,
}

impl InMemoryRecordStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces a record as-is.
    pub async fn insert_record(&self, record: Record) {
        self.records
            .write()
            .await
            .insert(record.id().to_owned(), record);
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true when no record is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_record(&self, fields: Map<String, Value>) -> AppResult<Record> {
        let record = Record::new(Uuid::new_v4().to_string(), fields)?;
        self.insert_record(record.clone()).await;

        Ok(record)
    }

    async fn find_record(&self, id: &str) -> AppResult<Option<Record>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn patch_record(&self, id: &str, patch: Map<String, Value>) -> AppResult<Record> {
        let mut records = self.records.write().await;
        let existing = records
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("record '{id}' does not exist")))?;

        let updated = existing.merged(&patch);
        records.insert(id.to_owned(), updated.clone());

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use recordstep_application::RecordStore;
    use recordstep_core::AppError;
    use serde_json::{Map, json};

    use super::InMemoryRecordStore;

    fn fields(value: serde_json::Value) -> Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn create_then_find_returns_same_record() {
        let store = InMemoryRecordStore::new();

        let created = store
            .create_record(fields(json!({"name": "Ada"})))
            .await
            .unwrap_or_else(|_| unreachable!());
        let found = store.find_record(created.id()).await;

        assert!(matches!(found, Ok(Some(record)) if record == created));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn created_identifiers_are_unique() {
        let store = InMemoryRecordStore::new();

        let first = store.create_record(Map::new()).await;
        let second = store.create_record(Map::new()).await;

        let (first, second) = (
            first.unwrap_or_else(|_| unreachable!()),
            second.unwrap_or_else(|_| unreachable!()),
        );
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn patch_keeps_untouched_fields() {
        let store = InMemoryRecordStore::new();
        let created = store
            .create_record(fields(json!({"name": "Ada", "x": 0})))
            .await
            .unwrap_or_else(|_| unreachable!());

        let patched = store
            .patch_record(created.id(), fields(json!({"x": 1, "archived": true})))
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(patched.field("name"), Some(&json!("Ada")));
        assert_eq!(patched.field("x"), Some(&json!(1)));
        assert!(patched.is_archived());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn patch_of_unknown_record_is_not_found() {
        let store = InMemoryRecordStore::new();

        let result = store.patch_record("ghost", Map::new()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.is_empty().await);
    }
}
