use chrono::{SecondsFormat, Utc};
use recordstep_core::AppError;
use recordstep_domain::{Record, RecordAction, ResultEnvelope};

/// Builds envelopes stamped with the component identity.
#[derive(Debug, Clone)]
pub(super) struct ResponseBuilder {
    component: String,
    version: String,
}

impl ResponseBuilder {
    pub(super) fn new(component: &str, version: &str) -> Self {
        Self {
            component: component.to_owned(),
            version: version.to_owned(),
        }
    }

    pub(super) fn success(&self, action: RecordAction, record: Record) -> ResultEnvelope {
        ResultEnvelope::success(
            self.component.as_str(),
            self.version.as_str(),
            current_timestamp(),
            action,
            record,
        )
    }

    pub(super) fn failure(&self, error: &AppError) -> ResultEnvelope {
        ResultEnvelope::failure(
            self.component.as_str(),
            self.version.as_str(),
            current_timestamp(),
            error.to_string(),
        )
    }
}

/// UTC timestamp with millisecond precision and a `Z` suffix.
pub(super) fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
