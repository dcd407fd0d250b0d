//! Conversation record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{RecordId, SessionId};

/// Output captured from another tool during a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    /// Identifier of the tool that produced the output.
    pub tool_id: String,
    /// Arbitrary tool payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

impl ToolOutput {
    /// Capture a serializable tool result.
    ///
    /// A payload that cannot be represented as JSON is recorded without output.
    pub fn capture<T: Serialize>(tool_id: impl Into<String>, output: &T) -> Self {
        Self {
            tool_id: tool_id.into(),
            output: serde_json::to_value(output).ok(),
        }
    }
}

/// One stored exchange between the user and the assistant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    /// Unique record identifier.
    pub id: RecordId,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// What the user said.
    pub user_message: String,
    /// What the assistant answered; empty while the answer is pending.
    pub ai_response: String,
    /// Free-text annotation about the exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Session the record was created in.
    pub session_id: SessionId,
    /// Side-tool results for this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_outputs: Option<Vec<ToolOutput>>,
}

impl ConversationRecord {
    /// Case-insensitive substring match against every searchable field.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        if self.user_message.to_lowercase().contains(needle)
            || self.ai_response.to_lowercase().contains(needle)
        {
            return true;
        }

        if self
            .context
            .as_deref()
            .is_some_and(|context| context.to_lowercase().contains(needle))
        {
            return true;
        }

        self.tool_outputs.as_ref().is_some_and(|outputs| {
            serde_json::to_string(outputs)
                .map(|json| json.to_lowercase().contains(needle))
                .unwrap_or(false)
        })
    }
}

/// Fields for a new record, as received from the tool boundary.
#[derive(Clone, Debug, Default)]
pub struct NewConversation {
    /// Required, must not be blank.
    pub user_message: Option<String>,
    /// Required, but may be the empty string.
    pub ai_response: Option<String>,
    /// Optional annotation.
    pub context: Option<String>,
    /// Optional tool outputs.
    pub tool_outputs: Option<Vec<ToolOutput>>,
}

/// Partial overwrite of an existing record.
///
/// Only non-empty strings replace the stored value; a supplied tool-output list
/// always replaces it, even when empty.
#[derive(Clone, Debug, Default)]
pub struct ConversationPatch {
    /// New user message.
    pub user_message: Option<String>,
    /// New assistant response.
    pub ai_response: Option<String>,
    /// New context.
    pub context: Option<String>,
    /// New tool outputs.
    pub tool_outputs: Option<Vec<ToolOutput>>,
}

impl ConversationPatch {
    /// Apply the patch in place.
    pub fn apply_to(self, record: &mut ConversationRecord) {
        if let Some(user_message) = non_empty(self.user_message) {
            record.user_message = user_message;
        }
        if let Some(ai_response) = non_empty(self.ai_response) {
            record.ai_response = ai_response;
        }
        if let Some(context) = non_empty(self.context) {
            record.context = Some(context);
        }
        if let Some(tool_outputs) = self.tool_outputs {
            record.tool_outputs = Some(tool_outputs);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ConversationRecord {
        ConversationRecord {
            id: RecordId::from("r1"),
            timestamp: Utc::now(),
            user_message: "Find me coffee beans".to_string(),
            ai_response: String::new(),
            context: Some("Type: shopping".to_string()),
            session_id: SessionId::from("s1"),
            tool_outputs: Some(vec![ToolOutput {
                tool_id: "product-search".to_string(),
                output: Some(json!({"title": "Arabica Roast"})),
            }]),
        }
    }

    #[test]
    fn test_matches_every_field() {
        let r = record();
        assert!(r.matches("coffee"));
        assert!(r.matches("shopping"));
        assert!(r.matches("arabica"));
        assert!(!r.matches("pasta"));
    }

    #[test]
    fn test_patch_ignores_empty_strings() {
        let mut r = record();
        let patch = ConversationPatch {
            user_message: Some(String::new()),
            ai_response: Some("Here are some beans".to_string()),
            context: Some(String::new()),
            tool_outputs: None,
        };
        patch.apply_to(&mut r);
        assert_eq!(r.user_message, "Find me coffee beans");
        assert_eq!(r.ai_response, "Here are some beans");
        assert_eq!(r.context.as_deref(), Some("Type: shopping"));
        assert!(r.tool_outputs.is_some());
    }

    #[test]
    fn test_patch_replaces_tool_outputs_even_when_empty() {
        let mut r = record();
        let patch = ConversationPatch {
            tool_outputs: Some(Vec::new()),
            ..ConversationPatch::default()
        };
        patch.apply_to(&mut r);
        assert_eq!(r.tool_outputs, Some(Vec::new()));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(record()).unwrap_or_default();
        assert!(value.get("userMessage").is_some());
        assert!(value.get("aiResponse").is_some());
        assert!(value.get("sessionId").is_some());
        assert_eq!(value["toolOutputs"][0]["toolId"], "product-search");
    }
}
