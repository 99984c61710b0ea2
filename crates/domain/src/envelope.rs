use serde::Serialize;

use crate::{Record, RecordAction};

/// Processing details attached to successful envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeMetadata {
    /// Action that produced the result.
    pub action: RecordAction,
    /// Always `true` on a successful envelope.
    pub processed: bool,
}

/// Uniform result returned for every invocation.
///
/// Exactly one of `data` and `error` is present, chosen by `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    component: String,
    version: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<EnvelopeMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry: Option<bool>,
}

impl ResultEnvelope {
    /// Creates a success envelope for a processed action.
    #[must_use]
    pub fn success(
        component: impl Into<String>,
        version: impl Into<String>,
        timestamp: impl Into<String>,
        action: RecordAction,
        record: Record,
    ) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
            component: component.into(),
            version: version.into(),
            timestamp: timestamp.into(),
            metadata: Some(EnvelopeMetadata {
                action,
                processed: true,
            }),
            retry: None,
        }
    }

    /// Creates a failure envelope. Failures always advertise `retry: true`.
    #[must_use]
    pub fn failure(
        component: impl Into<String>,
        version: impl Into<String>,
        timestamp: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            component: component.into(),
            version: version.into(),
            timestamp: timestamp.into(),
            metadata: None,
            retry: Some(true),
        }
    }

    /// Returns whether the invocation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the resulting record of a successful invocation.
    #[must_use]
    pub fn data(&self) -> Option<&Record> {
        self.data.as_ref()
    }

    /// Returns the failure message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the component name.
    #[must_use]
    pub fn component(&self) -> &str {
        self.component.as_str()
    }

    /// Returns the component version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the ISO-8601 creation timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        self.timestamp.as_str()
    }

    /// Returns success metadata.
    #[must_use]
    pub fn metadata(&self) -> Option<&EnvelopeMetadata> {
        self.metadata.as_ref()
    }

    /// Returns the retry hint. Only failures carry one.
    #[must_use]
    pub fn retry(&self) -> Option<bool> {
        self.retry
    }
}
