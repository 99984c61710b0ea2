use std::time::Duration;

use recordstep_core::{AppError, AppResult};
use reqwest::{Method, RequestBuilder, Response, StatusCode, header};
use serde_json::Value;
use url::Url;

/// Public Baserow API root.
pub const DEFAULT_BASEROW_BASE_URL: &str = "https://api.baserow.io";

/// Authorization scheme expected for Baserow database tokens.
pub const DEFAULT_AUTH_SCHEME: &str = "Token";

/// Table holding component configuration rows.
pub const DEFAULT_CONFIG_TABLE_ID: u64 = 653_888;

/// Table receiving failure audit rows.
pub const DEFAULT_AUDIT_TABLE_ID: u64 = 652_039;

/// Connection settings for the Baserow tables used by the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaserowConfig {
    /// API root, e.g. `https://api.baserow.io`.
    pub base_url: String,
    /// Authorization scheme placed before the token.
    pub auth_scheme: String,
    /// Access token.
    pub api_token: String,
    /// Configuration table identifier.
    pub config_table_id: u64,
    /// Audit log table identifier.
    pub audit_table_id: u64,
    /// Record table identifier, when records live in Baserow.
    pub records_table_id: Option<u64>,
    /// Transport timeout applied to every call.
    pub timeout: Duration,
}

impl BaserowConfig {
    /// Creates settings for the public API with the default tables.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASEROW_BASE_URL.to_owned(),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_owned(),
            api_token: api_token.into(),
            config_table_id: DEFAULT_CONFIG_TABLE_ID,
            audit_table_id: DEFAULT_AUDIT_TABLE_ID,
            records_table_id: None,
            timeout: Duration::from_secs(15),
        }
    }
}

/// Authenticated HTTP client for Baserow row endpoints.
#[derive(Debug, Clone)]
pub struct BaserowClient {
    http_client: reqwest::Client,
    base_url: Url,
    authorization: String,
}

impl BaserowClient {
    /// Creates a client from connection settings.
    pub fn new(config: &BaserowConfig) -> AppResult<Self> {
        if config.api_token.trim().is_empty() {
            return Err(AppError::Validation(
                "Baserow access token must not be empty".to_owned(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| {
                AppError::Unexpected(format!("failed to build HTTP client: {error}"))
            })?;
        let base_url = Url::parse(config.base_url.as_str()).map_err(|error| {
            AppError::Validation(format!(
                "invalid Baserow base URL '{}': {error}",
                config.base_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "Baserow base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            authorization: format!("{} {}", config.auth_scheme.trim(), config.api_token.trim()),
        })
    }

    /// Builds `{base}/api/database/rows/table/{table_id}/[{row_id}/]`.
    pub(crate) fn rows_url(&self, table_id: u64, row_id: Option<&str>) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AppError::Unexpected(format!(
                    "Baserow base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?;
            segments
                .pop_if_empty()
                .extend(["api", "database", "rows", "table"])
                .push(table_id.to_string().as_str());
            if let Some(row_id) = row_id {
                segments.push(row_id);
            }
            segments.push("");
        }

        Ok(url)
    }

    /// Starts an authenticated request.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(header::AUTHORIZATION, self.authorization.as_str())
    }

    /// Sends a request, mapping transport failures to remote errors.
    pub(crate) async fn send(&self, request: RequestBuilder, operation: &str) -> AppResult<Response> {
        request.send().await.map_err(|error| {
            AppError::Remote(format!("failed to call Baserow {operation}: {error}"))
        })
    }
}

/// Fails with a remote error unless the response status is a success.
pub(crate) async fn ensure_success(response: Response, operation: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_owned());
    Err(AppError::Remote(format!(
        "Baserow {operation} returned status {}: {body}",
        status.as_u16()
    )))
}

/// Decodes a JSON response body.
pub(crate) async fn read_json(response: Response, operation: &str) -> AppResult<Value> {
    response.json::<Value>().await.map_err(|error| {
        AppError::Remote(format!(
            "failed to parse Baserow {operation} response body: {error}"
        ))
    })
}

/// Returns true when the response reports a missing row.
pub(crate) fn is_not_found(response: &Response) -> bool {
    response.status() == StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::{BaserowClient, BaserowConfig};

    fn client(base_url: &str) -> BaserowClient {
        let mut config = BaserowConfig::new("secret");
        config.base_url = base_url.to_owned();
        BaserowClient::new(&config).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn table_url_keeps_trailing_slash() {
        let url = client("https://api.baserow.io").rows_url(653_888, None);
        assert_eq!(
            url.map(|url| url.to_string()).unwrap_or_default(),
            "https://api.baserow.io/api/database/rows/table/653888/"
        );
    }

    #[test]
    fn row_url_escapes_identifier() {
        let url = client("http://127.0.0.1:8080/").rows_url(1, Some("a/b"));
        assert_eq!(
            url.map(|url| url.to_string()).unwrap_or_default(),
            "http://127.0.0.1:8080/api/database/rows/table/1/a%2Fb/"
        );
    }

    #[test]
    fn blank_token_is_rejected() {
        let config = BaserowConfig::new("  ");
        assert!(BaserowClient::new(&config).is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut config = BaserowConfig::new("secret");
        config.base_url = "not a url".to_owned();
        assert!(BaserowClient::new(&config).is_err());
    }
}
