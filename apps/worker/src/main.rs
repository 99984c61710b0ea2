//! Record step runner: reads one invocation from stdin and writes the
//! envelope array to stdout.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use recordstep_application::{
    ComponentService, ComponentSettings, DEFAULT_COMPONENT_NAME, DEFAULT_COMPONENT_VERSION,
    RecordStore,
};
use recordstep_core::{AppError, AppResult};
use recordstep_infrastructure::{
    BaserowAuditLogSink, BaserowClient, BaserowConfig, BaserowConfigSource, BaserowRecordStore,
    DEFAULT_AUDIT_TABLE_ID, DEFAULT_AUTH_SCHEME, DEFAULT_BASEROW_BASE_URL,
    DEFAULT_CONFIG_TABLE_ID, InMemoryRecordStore, TracingDiagnosticsSink,
};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct RunnerConfig {
    settings: ComponentSettings,
    baserow: BaserowConfig,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = RunnerConfig::load()?;
    let service = build_component_service(&config)?;

    info!(
        component = %config.settings.name(),
        version = %config.settings.version(),
        api_base_url = %config.baserow.base_url,
        config_table_id = config.baserow.config_table_id,
        audit_table_id = config.baserow.audit_table_id,
        records_table_id = ?config.baserow.records_table_id,
        "record step runner started"
    );

    let raw_input = read_stdin().await?;
    let input = parse_invocation_input(&raw_input);
    let envelopes = service.handle_invocation(&input).await;

    let output = serde_json::to_string(&envelopes).map_err(|error| {
        AppError::Unexpected(format!("failed to serialize result envelopes: {error}"))
    })?;
    write_stdout(output.as_str()).await
}

fn build_component_service(config: &RunnerConfig) -> AppResult<ComponentService> {
    let client = BaserowClient::new(&config.baserow)?;
    let config_source = Arc::new(BaserowConfigSource::new(
        client.clone(),
        config.baserow.config_table_id,
    ));
    let audit_sink = Arc::new(BaserowAuditLogSink::new(
        client.clone(),
        config.baserow.audit_table_id,
    ));
    let record_store: Arc<dyn RecordStore> = match config.baserow.records_table_id {
        Some(table_id) => Arc::new(BaserowRecordStore::new(client, table_id)),
        None => {
            warn!("COMPONENT_RECORDS_TABLE_ID is not set; records are kept in memory");
            Arc::new(InMemoryRecordStore::new())
        }
    };

    Ok(ComponentService::new(
        config.settings.clone(),
        config_source,
        record_store,
        audit_sink,
        Arc::new(TracingDiagnosticsSink::new()),
    ))
}

/// Input that is not JSON, or not even UTF-8, is handed over as a string so
/// it still goes through validation and gets audited.
fn parse_invocation_input(raw_input: &[u8]) -> Value {
    let raw_input = match String::from_utf8(raw_input.to_vec()) {
        Ok(raw_input) => raw_input,
        Err(error) => {
            warn!(%error, "invocation input is not valid UTF-8");
            return Value::String(String::from_utf8_lossy(raw_input).into_owned());
        }
    };

    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    serde_json::from_str(trimmed).unwrap_or(Value::String(raw_input))
}

async fn read_stdin() -> AppResult<Vec<u8>> {
    let mut raw_input = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut raw_input)
        .await
        .map_err(|error| AppError::Unexpected(format!("failed to read stdin: {error}")))?;

    Ok(raw_input)
}

async fn write_stdout(output: &str) -> AppResult<()> {
    let mut stdout = tokio::io::stdout();
    let written: std::io::Result<()> = async {
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await
    }
    .await;

    written.map_err(|error| AppError::Unexpected(format!("failed to write stdout: {error}")))
}

impl RunnerConfig {
    fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = required_var(&lookup, "COMPONENT_API_TOKEN")?;
        let base_url = optional_var(&lookup, "COMPONENT_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASEROW_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let auth_scheme = optional_var(&lookup, "COMPONENT_AUTH_SCHEME")
            .unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_owned());
        let config_table_id =
            parse_var_u64(&lookup, "COMPONENT_CONFIG_TABLE_ID", DEFAULT_CONFIG_TABLE_ID)?;
        let audit_table_id =
            parse_var_u64(&lookup, "COMPONENT_AUDIT_TABLE_ID", DEFAULT_AUDIT_TABLE_ID)?;
        let records_table_id = match optional_var(&lookup, "COMPONENT_RECORDS_TABLE_ID") {
            Some(value) => Some(parse_u64("COMPONENT_RECORDS_TABLE_ID", value.as_str())?),
            None => None,
        };
        let timeout_secs = parse_var_u64(&lookup, "COMPONENT_HTTP_TIMEOUT_SECS", 15)?;

        if timeout_secs == 0 {
            return Err(AppError::Validation(
                "COMPONENT_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        let name = optional_var(&lookup, "COMPONENT_NAME")
            .unwrap_or_else(|| DEFAULT_COMPONENT_NAME.to_owned());
        let version = optional_var(&lookup, "COMPONENT_VERSION")
            .unwrap_or_else(|| DEFAULT_COMPONENT_VERSION.to_owned());

        Ok(Self {
            settings: ComponentSettings::new(name, version)?,
            baserow: BaserowConfig {
                base_url,
                auth_scheme,
                api_token,
                config_table_id,
                audit_table_id,
                records_table_id,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn required_var<F>(lookup: &F, name: &str) -> AppResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional_var(lookup, name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn optional_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_var_u64<F>(lookup: &F, name: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match optional_var(lookup, name) {
        Some(value) => parse_u64(name, value.as_str()),
        None => Ok(default),
    }
}

fn parse_u64(name: &str, value: &str) -> AppResult<u64> {
    value
        .parse::<u64>()
        .map_err(|error| AppError::Validation(format!("invalid {name} value '{value}': {error}")))
}
