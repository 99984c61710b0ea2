use async_trait::async_trait;
use recordstep_application::AuditLogSink;
use recordstep_core::AppResult;
use recordstep_domain::AuditEntry;
use reqwest::Method;

use crate::baserow_client::{BaserowClient, ensure_success};

/// Appends failure audit entries as rows of a Baserow table.
#[derive(Debug, Clone)]
pub struct BaserowAuditLogSink {
    client: BaserowClient,
    table_id: u64,
}

impl BaserowAuditLogSink {
    /// Creates an audit sink for one table.
    #[must_use]
    pub fn new(client: BaserowClient, table_id: u64) -> Self {
        Self { client, table_id }
    }
}

#[async_trait]
impl AuditLogSink for BaserowAuditLogSink {
    async fn write_entry(&self, entry: &AuditEntry) -> AppResult<()> {
        let mut url = self.client.rows_url(self.table_id, None)?;
        url.query_pairs_mut().append_pair("user_field_names", "true");

        let response = self
            .client
            .send(
                self.client.request(Method::POST, url).json(entry),
                "audit write",
            )
            .await?;
        ensure_success(response, "audit write").await?;

        Ok(())
    }
}
