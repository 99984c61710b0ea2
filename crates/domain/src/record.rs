use recordstep_core::{AppError, AppResult, NonEmptyString};
use serde::Serialize;
use serde_json::{Map, Value};

/// Field flag set on records merged by an update.
pub const UPDATED_FLAG: &str = "updated";

/// Field flag set on records marked as archived.
pub const ARCHIVED_FLAG: &str = "archived";

/// Opaque record keyed by identifier.
///
/// Serializes flat, with `id` next to the record fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: NonEmptyString,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record. An `id` member inside `fields` is dropped in favour of `id`.
    pub fn new(id: impl Into<String>, mut fields: Map<String, Value>) -> AppResult<Self> {
        fields.remove("id");

        Ok(Self {
            id: NonEmptyString::new(id)?,
            fields,
        })
    }

    /// Builds a record from a JSON row whose `id` is a string or a number.
    pub fn from_row(row: Value) -> AppResult<Self> {
        let Value::Object(fields) = row else {
            return Err(AppError::Remote("record row must be a JSON object".to_owned()));
        };

        let id = match fields.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(AppError::Remote(
                    "record row is missing its 'id' member".to_owned(),
                ));
            }
        };

        Self::new(id, fields)
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns one field value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns true when the record carries `archived: true`.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.flag(ARCHIVED_FLAG)
    }

    /// Returns true when the named field is boolean `true`.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).and_then(Value::as_bool) == Some(true)
    }

    /// Overwrites fields with the values from `patch`. The identifier never changes.
    #[must_use]
    pub fn merged(mut self, patch: &Map<String, Value>) -> Self {
        for (name, value) in patch {
            if name != "id" {
                self.fields.insert(name.clone(), value.clone());
            }
        }

        self
    }

    /// Sets a boolean field to `true`.
    #[must_use]
    pub fn flagged(mut self, name: &str) -> Self {
        self.fields.insert(name.to_owned(), Value::Bool(true));
        self
    }
}
