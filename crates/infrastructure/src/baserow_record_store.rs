use async_trait::async_trait;
use recordstep_application::RecordStore;
use recordstep_core::{AppError, AppResult};
use recordstep_domain::Record;
use reqwest::Method;
use serde_json::{Map, Value};
use url::Url;

use crate::baserow_client::{BaserowClient, ensure_success, is_not_found, read_json};

/// Record store backed by the rows of a Baserow table.
///
/// Rows are addressed with user field names. Archiving is a field patch;
/// this adapter never issues a row delete.
#[derive(Debug, Clone)]
pub struct BaserowRecordStore {
    client: BaserowClient,
    table_id: u64,
}

impl BaserowRecordStore {
    /// Creates a record store for one table.
    #[must_use]
    pub fn new(client: BaserowClient, table_id: u64) -> Self {
        Self { client, table_id }
    }

    fn url(&self, row_id: Option<&str>) -> AppResult<Url> {
        let mut url = self.client.rows_url(self.table_id, row_id)?;
        url.query_pairs_mut().append_pair("user_field_names", "true");
        Ok(url)
    }
}

#[async_trait]
impl RecordStore for BaserowRecordStore {
    async fn create_record(&self, fields: Map<String, Value>) -> AppResult<Record> {
        let request = self
            .client
            .request(Method::POST, self.url(None)?)
            .json(&fields);
        let response = self.client.send(request, "row create").await?;
        let response = ensure_success(response, "row create").await?;

        Record::from_row(read_json(response, "row create").await?)
    }

    async fn find_record(&self, id: &str) -> AppResult<Option<Record>> {
        let request = self.client.request(Method::GET, self.url(Some(id))?);
        let response = self.client.send(request, "row read").await?;
        if is_not_found(&response) {
            return Ok(None);
        }

        let response = ensure_success(response, "row read").await?;
        Record::from_row(read_json(response, "row read").await?).map(Some)
    }

    async fn patch_record(&self, id: &str, patch: Map<String, Value>) -> AppResult<Record> {
        let request = self
            .client
            .request(Method::PATCH, self.url(Some(id))?)
            .json(&patch);
        let response = self.client.send(request, "row update").await?;
        if is_not_found(&response) {
            return Err(AppError::NotFound(format!("record '{id}' does not exist")));
        }

        let response = ensure_success(response, "row update").await?;
        Record::from_row(read_json(response, "row update").await?)
    }
}
