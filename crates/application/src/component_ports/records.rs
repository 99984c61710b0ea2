use async_trait::async_trait;
use recordstep_core::AppResult;
use recordstep_domain::Record;
use serde_json::{Map, Value};

/// Port for the backing record store.
///
/// There is no delete operation. Archiving is a field patch, so no
/// handler can remove a record from the store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Allocates a new record with a store-assigned identifier.
    async fn create_record(&self, fields: Map<String, Value>) -> AppResult<Record>;

    /// Finds one record by identifier.
    async fn find_record(&self, id: &str) -> AppResult<Option<Record>>;

    /// Merges `patch` into an existing record.
    ///
    /// Fails with `AppError::NotFound` when the record does not exist.
    async fn patch_record(&self, id: &str, patch: Map<String, Value>) -> AppResult<Record>;
}
