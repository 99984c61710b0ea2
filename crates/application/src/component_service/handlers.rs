use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use recordstep_core::{AppError, AppResult};
use recordstep_domain::{ARCHIVED_FLAG, ActionRequest, Record, RecordAction, UPDATED_FLAG};
use serde_json::{Map, Value};

use crate::component_ports::RecordStore;

/// One record operation bound to an action.
#[async_trait]
pub(super) trait RecordActionHandler: Send + Sync {
    async fn handle(&self, store: &dyn RecordStore, request: &ActionRequest)
    -> AppResult<Record>;
}

/// Maps action identifiers to their handlers.
pub(super) struct ActionRegistry {
    handlers: HashMap<RecordAction, Arc<dyn RecordActionHandler>>,
}

impl ActionRegistry {
    /// Registry with the four supported record operations.
    pub(super) fn standard() -> Self {
        let mut handlers: HashMap<RecordAction, Arc<dyn RecordActionHandler>> = HashMap::new();
        handlers.insert(RecordAction::Create, Arc::new(CreateRecordHandler));
        handlers.insert(RecordAction::Read, Arc::new(ReadRecordHandler));
        handlers.insert(RecordAction::Update, Arc::new(UpdateRecordHandler));
        handlers.insert(RecordAction::Archive, Arc::new(ArchiveRecordHandler));

        Self { handlers }
    }

    pub(super) fn resolve(
        &self,
        action: &str,
    ) -> AppResult<(RecordAction, Arc<dyn RecordActionHandler>)> {
        let action = RecordAction::from_str(action)?;
        let handler = self
            .handlers
            .get(&action)
            .cloned()
            .ok_or_else(|| AppError::UnknownAction(action.as_str().to_owned()))?;

        Ok((action, handler))
    }
}

struct CreateRecordHandler;

#[async_trait]
impl RecordActionHandler for CreateRecordHandler {
    async fn handle(
        &self,
        store: &dyn RecordStore,
        request: &ActionRequest,
    ) -> AppResult<Record> {
        let data = request.require_data()?;
        store.create_record(data.clone()).await
    }
}

struct ReadRecordHandler;

#[async_trait]
impl RecordActionHandler for ReadRecordHandler {
    async fn handle(
        &self,
        store: &dyn RecordStore,
        request: &ActionRequest,
    ) -> AppResult<Record> {
        let id = request.require_id()?;
        store
            .find_record(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("record '{id}' does not exist")))
    }
}

struct UpdateRecordHandler;

#[async_trait]
impl RecordActionHandler for UpdateRecordHandler {
    async fn handle(
        &self,
        store: &dyn RecordStore,
        request: &ActionRequest,
    ) -> AppResult<Record> {
        let id = request.require_id()?;
        let mut patch = request.require_data()?.clone();
        patch.insert(UPDATED_FLAG.to_owned(), Value::Bool(true));

        store.patch_record(id, patch).await
    }
}

struct ArchiveRecordHandler;

#[async_trait]
impl RecordActionHandler for ArchiveRecordHandler {
    async fn handle(
        &self,
        store: &dyn RecordStore,
        request: &ActionRequest,
    ) -> AppResult<Record> {
        let id = request.require_id()?;
        let mut patch = Map::new();
        patch.insert(ARCHIVED_FLAG.to_owned(), Value::Bool(true));

        // An id the store does not hold is still reported as archived.
        match store.patch_record(id, patch).await {
            Err(AppError::NotFound(_)) => Ok(Record::new(id, Map::new())?.flagged(ARCHIVED_FLAG)),
            result => result,
        }
    }
}
