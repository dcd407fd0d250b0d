//! `conversation-memory` tool contract.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::memory::conversation_store::{ConversationStore, DEFAULT_LIMIT};
use crate::memory::record::{ConversationPatch, ConversationRecord, NewConversation, ToolOutput};

/// Tool identifier.
pub const TOOL_ID: &str = "conversation-memory";

/// Action requested from the memory tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryAction {
    /// Append a record.
    Store,
    /// List recent records.
    Retrieve,
    /// Substring search.
    Search,
    /// Partial overwrite.
    Update,
    /// Remove one record.
    Delete,
    /// Remove everything and rotate the session.
    Clear,
}

/// Input of the memory tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryToolInput {
    /// Action to perform.
    pub action: MemoryAction,
    /// User message to store or overwrite.
    pub user_message: Option<String>,
    /// Assistant response to store or overwrite.
    pub ai_response: Option<String>,
    /// Outputs from other tools for this turn.
    pub tool_outputs: Option<Vec<ToolOutput>>,
    /// Additional context about the exchange.
    pub context: Option<String>,
    /// Record to update or delete.
    pub conversation_id: Option<String>,
    /// Search term.
    pub search_query: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
}

impl MemoryToolInput {
    /// Empty input for the given action.
    #[must_use]
    pub const fn new(action: MemoryAction) -> Self {
        Self {
            action,
            user_message: None,
            ai_response: None,
            tool_outputs: None,
            context: None,
            conversation_id: None,
            search_query: None,
            limit: None,
        }
    }
}

/// Output of the memory tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryToolOutput {
    /// Whether the action succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Records produced by the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversations: Option<Vec<ConversationRecord>>,
    /// Record count relevant to the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl MemoryToolOutput {
    fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
            conversations: None,
            total_count: None,
        }
    }

    fn failed(err: &ToolError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            conversations: None,
            total_count: None,
        }
    }

    fn with_conversations(mut self, conversations: Vec<ConversationRecord>) -> Self {
        self.conversations = Some(conversations);
        self
    }

    const fn with_total(mut self, total: usize) -> Self {
        self.total_count = Some(total);
        self
    }
}

/// Run one memory action against the store.
pub fn execute(store: &mut ConversationStore, input: MemoryToolInput) -> MemoryToolOutput {
    let limit = input.limit.unwrap_or(DEFAULT_LIMIT);

    match input.action {
        MemoryAction::Store => {
            let new = NewConversation {
                user_message: input.user_message,
                ai_response: input.ai_response,
                context: input.context,
                tool_outputs: input.tool_outputs,
            };
            match store.store(new) {
                Ok(record) => {
                    let record = record.clone();
                    let total = store.len();
                    MemoryToolOutput::ok(format!(
                        "Conversation stored in memory (Total: {total})"
                    ))
                    .with_conversations(vec![record])
                    .with_total(total)
                }
                Err(err) => MemoryToolOutput::failed(&err),
            }
        }
        MemoryAction::Retrieve => {
            let recent = store.retrieve(limit);
            MemoryToolOutput::ok(format!("Retrieved {} recent conversations", recent.len()))
                .with_conversations(recent)
                .with_total(store.len())
        }
        MemoryAction::Search => match store.search(input.search_query.as_deref(), limit) {
            Ok(found) => {
                let query = input.search_query.unwrap_or_default();
                let count = found.len();
                MemoryToolOutput::ok(format!(
                    "Found {count} conversations matching \"{query}\""
                ))
                .with_conversations(found)
                .with_total(count)
            }
            Err(err) => MemoryToolOutput::failed(&err),
        },
        MemoryAction::Update => {
            let patch = ConversationPatch {
                user_message: input.user_message,
                ai_response: input.ai_response,
                context: input.context,
                tool_outputs: input.tool_outputs,
            };
            match store.update(input.conversation_id.as_deref(), patch) {
                Ok(record) => MemoryToolOutput::ok("Conversation updated successfully".to_string())
                    .with_conversations(vec![record.clone()]),
                Err(err) => MemoryToolOutput::failed(&err),
            }
        }
        MemoryAction::Delete => match store.delete(input.conversation_id.as_deref()) {
            Ok(total) => {
                MemoryToolOutput::ok("Conversation deleted successfully".to_string()).with_total(total)
            }
            Err(err) => MemoryToolOutput::failed(&err),
        },
        MemoryAction::Clear => {
            let cleared = store.clear();
            MemoryToolOutput::ok(format!("Cleared {cleared} conversations from memory")).with_total(0)
        }
    }
}
