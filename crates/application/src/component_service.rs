use std::sync::Arc;

use recordstep_core::AppResult;
use recordstep_domain::{ActionRequest, ResultEnvelope};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::component_ports::{AuditLogSink, ConfigSource, DiagnosticsSink, RecordStore};

mod audit_logger;
mod handlers;
mod response;
mod settings;

pub use audit_logger::AuditLogger;
pub use settings::{
    ComponentSettings, DEFAULT_COMPONENT_NAME, DEFAULT_COMPONENT_VERSION, DEFAULT_CONFIG_FILTER,
};

use handlers::ActionRegistry;
use response::ResponseBuilder;

/// Record action component: validates one request, dispatches it to the
/// record store and always answers with a single envelope.
#[derive(Clone)]
pub struct ComponentService {
    settings: ComponentSettings,
    config_source: Arc<dyn ConfigSource>,
    record_store: Arc<dyn RecordStore>,
    audit_logger: AuditLogger,
    registry: Arc<ActionRegistry>,
    responses: ResponseBuilder,
}

impl ComponentService {
    /// Creates a component service.
    #[must_use]
    pub fn new(
        settings: ComponentSettings,
        config_source: Arc<dyn ConfigSource>,
        record_store: Arc<dyn RecordStore>,
        audit_sink: Arc<dyn AuditLogSink>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let responses = ResponseBuilder::new(settings.name(), settings.version());
        let audit_logger = AuditLogger::new(audit_sink, diagnostics);

        Self {
            settings,
            config_source,
            record_store,
            audit_logger,
            registry: Arc::new(ActionRegistry::standard()),
            responses,
        }
    }

    /// Processes one invocation input.
    ///
    /// Never fails: every fault is audited on a best-effort basis and turned
    /// into a failure envelope. The result always holds exactly one envelope.
    pub async fn handle_invocation(&self, input: &Value) -> Vec<ResultEnvelope> {
        match self.process(input).await {
            Ok(envelope) => vec![envelope],
            Err(error) => {
                warn!(
                    component = %self.settings.name(),
                    kind = error.kind(),
                    error = %error,
                    "component invocation failed"
                );

                let entry = self
                    .audit_logger
                    .failure_entry(self.settings.name(), &error, input);
                self.audit_logger.record(entry).await;

                vec![self.responses.failure(&error)]
            }
        }
    }

    async fn process(&self, input: &Value) -> AppResult<ResultEnvelope> {
        let request = ActionRequest::from_invocation_input(input)?;

        // Fetched for every request, including actions that never read it.
        let config = self
            .config_source
            .fetch_config(self.settings.config_filter())
            .await?;
        debug!(
            filter = %self.settings.config_filter(),
            rows = config_row_count(&config),
            "component configuration fetched"
        );

        let (action, handler) = self.registry.resolve(request.action())?;
        let record = handler
            .handle(self.record_store.as_ref(), &request)
            .await?;

        info!(
            component = %self.settings.name(),
            action = action.as_str(),
            record_id = %record.id(),
            "component action processed"
        );

        Ok(self.responses.success(action, record))
    }
}

fn config_row_count(config: &Value) -> usize {
    match config {
        Value::Array(rows) => rows.len(),
        Value::Object(object) => object
            .get("results")
            .and_then(Value::as_array)
            .map_or(1, Vec::len),
        _ => 0,
    }
}
