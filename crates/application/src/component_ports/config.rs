use async_trait::async_trait;
use recordstep_core::AppResult;
use serde_json::Value;

/// Raw rows returned by the remote configuration table.
pub type ConfigRows = Value;

/// Port for reading component configuration from a remote key/value table.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetches the configuration rows matching `filter`.
    async fn fetch_config(&self, filter: &str) -> AppResult<ConfigRows>;
}
