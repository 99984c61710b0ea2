use recordstep_core::{AppError, AppResult, NonEmptyString};
use serde_json::{Map, Value};

/// One validated action request taken from the invocation input.
///
/// The action is kept as the raw requested value. Whether it names a
/// supported operation is decided at dispatch time, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    action: NonEmptyString,
    id: Option<String>,
    data: Option<Map<String, Value>>,
}

impl ActionRequest {
    /// Creates a request from already separated parts.
    ///
    /// The identifier is trimmed; a blank identifier counts as absent.
    pub fn new(
        action: impl Into<String>,
        id: Option<String>,
        data: Option<Map<String, Value>>,
    ) -> AppResult<Self> {
        let action = NonEmptyString::new(action)
            .map_err(|_| AppError::Validation("action is required".to_owned()))?;
        let id = id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty());

        Ok(Self { action, id, data })
    }

    /// Extracts the first request item from raw invocation input.
    ///
    /// Accepts an array of items (only the first is consumed), a bare request
    /// object, and host items that wrap the request in a `json` member.
    pub fn from_invocation_input(input: &Value) -> AppResult<Self> {
        let item = match input {
            Value::Array(items) => items.first(),
            Value::Object(_) => Some(input),
            _ => None,
        }
        .ok_or_else(action_required)?;

        let fields = unwrap_host_item(item).ok_or_else(action_required)?;

        let action = match fields.get("action") {
            None | Some(Value::Null) => return Err(action_required()),
            Some(Value::String(action)) => action.clone(),
            Some(_) => {
                return Err(AppError::Validation(
                    "action must be a string".to_owned(),
                ));
            }
        };

        let id = match fields.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            Some(_) => {
                return Err(AppError::Validation(
                    "id must be a string or a number".to_owned(),
                ));
            }
        };

        let data = match fields.get("data") {
            None | Some(Value::Null) => None,
            Some(Value::Object(data)) => Some(data.clone()),
            Some(_) => {
                return Err(AppError::Validation("data must be an object".to_owned()));
            }
        };

        Self::new(action, id, data)
    }

    /// Returns the requested action value.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }

    /// Returns the optional record identifier.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the optional field payload.
    #[must_use]
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    /// Returns the record identifier or fails when the request carries none.
    pub fn require_id(&self) -> AppResult<&str> {
        self.id.as_deref().ok_or_else(|| {
            AppError::Validation(format!("id is required for action '{}'", self.action()))
        })
    }

    /// Returns the field payload or fails when the request carries none.
    pub fn require_data(&self) -> AppResult<&Map<String, Value>> {
        self.data.as_ref().ok_or_else(|| {
            AppError::Validation(format!(
                "data is required for action '{}'",
                self.action()
            ))
        })
    }
}

fn unwrap_host_item(item: &Value) -> Option<&Map<String, Value>> {
    let fields = item.as_object()?;

    if !fields.contains_key("action")
        && let Some(Value::Object(wrapped)) = fields.get("json")
    {
        return Some(wrapped);
    }

    Some(fields)
}

fn action_required() -> AppError {
    AppError::Validation("action is required".to_owned())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use recordstep_core::AppError;
    use serde_json::{Value, json};

    use super::ActionRequest;

    fn assert_action_required(input: &Value) {
        let result = ActionRequest::from_invocation_input(input);
        assert!(
            matches!(&result, Err(AppError::Validation(message)) if message == "action is required"),
            "expected missing action for {input}, got {result:?}"
        );
    }

    #[test]
    fn takes_first_item_of_collection() {
        let input = json!([
            {"action": "read", "id": "r1"},
            {"action": "archive", "id": "r2"}
        ]);

        let request = ActionRequest::from_invocation_input(&input);
        let request = request.unwrap_or_else(|_| unreachable!());
        assert_eq!(request.action(), "read");
        assert_eq!(request.id(), Some("r1"));
        assert!(request.data().is_none());
    }

    #[test]
    fn accepts_bare_request_object() {
        let input = json!({"action": "create", "data": {"name": "Ada"}});

        let request = ActionRequest::from_invocation_input(&input);
        let request = request.unwrap_or_else(|_| unreachable!());
        assert_eq!(request.action(), "create");
        assert_eq!(
            request.data().and_then(|data| data.get("name")),
            Some(&json!("Ada"))
        );
    }

    #[test]
    fn unwraps_host_json_items() {
        let input = json!([{"json": {"action": "archive", "id": 42}}]);

        let request = ActionRequest::from_invocation_input(&input);
        let request = request.unwrap_or_else(|_| unreachable!());
        assert_eq!(request.action(), "archive");
        assert_eq!(request.id(), Some("42"));
    }

    #[test]
    fn missing_or_empty_action_is_rejected() {
        assert_action_required(&Value::Null);
        assert_action_required(&json!([]));
        assert_action_required(&json!([{}]));
        assert_action_required(&json!([{"action": null}]));
        assert_action_required(&json!([{"action": ""}]));
        assert_action_required(&json!([{"action": "   "}]));
        assert_action_required(&json!("not a request"));
    }

    #[test]
    fn unknown_action_passes_the_gate() {
        let request = ActionRequest::from_invocation_input(&json!([{"action": "destroy"}]));
        assert!(matches!(request, Ok(request) if request.action() == "destroy"));
    }

    #[test]
    fn non_object_data_is_rejected() {
        let result =
            ActionRequest::from_invocation_input(&json!([{"action": "create", "data": [1, 2]}]));
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("data")));
    }

    #[test]
    fn non_string_action_is_rejected() {
        for input in [json!([{"action": 5}]), json!([{"action": ["read"]}])] {
            let result = ActionRequest::from_invocation_input(&input);
            assert!(
                matches!(&result, Err(AppError::Validation(message)) if message == "action must be a string"),
                "expected non-string action rejection for {input}, got {result:?}"
            );
        }
    }

    #[test]
    fn boolean_id_is_rejected() {
        let result =
            ActionRequest::from_invocation_input(&json!([{"action": "read", "id": true}]));
        assert!(
            matches!(result, Err(AppError::Validation(message)) if message == "id must be a string or a number")
        );
    }

    #[test]
    fn identifier_is_trimmed_once() {
        let request =
            ActionRequest::from_invocation_input(&json!([{"action": "read", "id": "  r1 "}]))
                .unwrap_or_else(|_| unreachable!());

        assert_eq!(request.id(), Some("r1"));
        assert!(matches!(request.require_id(), Ok("r1")));
    }

    #[test]
    fn require_id_rejects_blank_identifier() {
        let request = ActionRequest::new("read", Some("  ".to_owned()), None)
            .unwrap_or_else(|_| unreachable!());
        assert!(request.id().is_none());
        assert!(request.require_id().is_err());
    }

    #[test]
    fn require_data_names_the_action() {
        let request = ActionRequest::new("update", Some("r1".to_owned()), None)
            .unwrap_or_else(|_| unreachable!());
        let result = request.require_data();
        assert!(matches!(result, Err(AppError::Validation(message)) if message.contains("update")));
    }

    proptest! {
        #[test]
        fn any_non_blank_action_string_passes_the_gate(action in "[a-z_]{1,16}") {
            let input = json!([{"action": action.clone()}]);
            let request = ActionRequest::from_invocation_input(&input);
            prop_assert!(matches!(request, Ok(request) if request.action() == action));
        }

        #[test]
        fn whitespace_actions_never_pass_the_gate(action in "[ \t\n]{0,8}") {
            let input = json!([{"action": action}]);
            let result = ActionRequest::from_invocation_input(&input);
            prop_assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }
}
