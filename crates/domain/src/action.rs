use std::str::FromStr;

use recordstep_core::AppError;
use serde::{Deserialize, Serialize};

/// Record operations the component can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAction {
    /// Allocates a new record from the request data.
    Create,
    /// Fetches one record by identifier.
    Read,
    /// Merges request data into an existing record.
    Update,
    /// Flags an existing record as archived. Records are never deleted.
    Archive,
}

impl RecordAction {
    /// Returns the wire value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Archive => "archive",
        }
    }

    /// Returns all supported actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RecordAction] = &[
            RecordAction::Create,
            RecordAction::Read,
            RecordAction::Update,
            RecordAction::Archive,
        ];

        ALL
    }
}

impl FromStr for RecordAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "archive" => Ok(Self::Archive),
            _ => Err(AppError::UnknownAction(value.to_owned())),
        }
    }
}
