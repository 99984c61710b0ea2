use async_trait::async_trait;
use recordstep_application::{ConfigRows, ConfigSource};
use recordstep_core::AppResult;
use reqwest::Method;
use tracing::debug;

use crate::baserow_client::{BaserowClient, ensure_success, read_json};

/// Reads component configuration rows from a Baserow table.
#[derive(Debug, Clone)]
pub struct BaserowConfigSource {
    client: BaserowClient,
    table_id: u64,
}

impl BaserowConfigSource {
    /// Creates a config source for one table.
    #[must_use]
    pub fn new(client: BaserowClient, table_id: u64) -> Self {
        Self { client, table_id }
    }
}

#[async_trait]
impl ConfigSource for BaserowConfigSource {
    async fn fetch_config(&self, filter: &str) -> AppResult<ConfigRows> {
        let mut url = self.client.rows_url(self.table_id, None)?;
        url.query_pairs_mut().append_pair("search", filter);

        debug!(table_id = self.table_id, filter = filter, "fetching component configuration");

        let response = self
            .client
            .send(self.client.request(Method::GET, url), "config read")
            .await?;
        let response = ensure_success(response, "config read").await?;

        read_json(response, "config read").await
    }
}
