//! Throwaway HTTP server for adapter tests.

use std::collections::VecDeque;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::{BaserowClient, BaserowConfig};

/// Request as seen by the test server.
#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) authorization: Option<String>,
    pub(crate) body: Value,
}

#[derive(Clone, Default)]
struct ServerState {
    responses: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub(crate) struct TestServer {
    base_url: String,
    state: ServerState,
}

impl TestServer {
    /// Starts a server answering with `responses` in order, then `200 {}`.
    pub(crate) async fn spawn(responses: Vec<(StatusCode, Value)>) -> Self {
        let state = ServerState {
            responses: Arc::new(Mutex::new(responses.into())),
            captured: Arc::default(),
        };
        let app = Router::new().fallback(capture).with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|error| panic!("failed to bind test listener: {error}"));
        let address = listener
            .local_addr()
            .unwrap_or_else(|error| panic!("failed to read test listener address: {error}"));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{address}"),
            state,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) async fn requests(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().await.clone()
    }
}

async fn capture(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let body = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    state.captured.lock().await.push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body,
    });

    let (status, response) = state
        .responses
        .lock()
        .await
        .pop_front()
        .unwrap_or((StatusCode::OK, Value::Object(Default::default())));
    (status, Json(response))
}

/// Client pointed at `server` with token `secret`.
pub(crate) fn client_for(server: &TestServer, auth_scheme: &str) -> BaserowClient {
    let mut config = BaserowConfig::new("secret");
    config.base_url = server.base_url().to_owned();
    config.auth_scheme = auth_scheme.to_owned();
    BaserowClient::new(&config).unwrap_or_else(|error| panic!("invalid test client: {error}"))
}

/// Client pointed at a port nothing listens on.
pub(crate) async fn unreachable_client() -> BaserowClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|error| panic!("failed to bind test listener: {error}"));
    let address = listener
        .local_addr()
        .unwrap_or_else(|error| panic!("failed to read test listener address: {error}"));
    drop(listener);

    let mut config = BaserowConfig::new("secret");
    config.base_url = format!("http://{address}");
    BaserowClient::new(&config).unwrap_or_else(|error| panic!("invalid test client: {error}"))
}
