//! In-memory conversation history with a best-effort persistence mirror.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{ToolError, ToolResult};
use crate::ids::{RecordId, SessionId};
use crate::memory::persistence::RecordMirror;
use crate::memory::record::{ConversationPatch, ConversationRecord, NewConversation};

/// Default number of records returned by `retrieve` and `search`.
pub const DEFAULT_LIMIT: usize = 10;

/// Ordered conversation history.
///
/// Insertion order is the only ordering. Every mutation is followed by a full
/// write to the mirror; a failed write is logged and never fails the operation.
pub struct ConversationStore {
    records: Vec<ConversationRecord>,
    session_id: SessionId,
    mirror: Arc<dyn RecordMirror>,
}

impl ConversationStore {
    /// Open the store, loading whatever the mirror holds.
    ///
    /// A missing, unreadable or malformed mirror starts the store empty.
    pub fn open(mirror: Arc<dyn RecordMirror>) -> Self {
        let records = match mirror.load() {
            Ok(records) => records,
            Err(err) => {
                warn!("Failed to load conversation memory, starting empty: {err}");
                Vec::new()
            }
        };
        debug!("Loaded {} conversation record(s)", records.len());

        Self {
            records,
            session_id: SessionId::new(),
            mirror,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Session that new records are filed under.
    #[must_use]
    pub const fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Append a new record.
    ///
    /// # Errors
    /// Returns a validation error if the user message is missing or blank, or if
    /// the response is absent. An empty response is accepted as a placeholder.
    pub fn store(&mut self, new: NewConversation) -> ToolResult<&ConversationRecord> {
        let user_message = new
            .user_message
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ToolError::validation("userMessage is required for storing"))?;
        let ai_response = new.ai_response.ok_or_else(|| {
            ToolError::validation(
                "aiResponse must be provided (can be an empty string if not generated yet)",
            )
        })?;

        self.records.push(ConversationRecord {
            id: RecordId::new(),
            timestamp: Utc::now(),
            user_message,
            ai_response,
            context: new.context,
            session_id: self.session_id.clone(),
            tool_outputs: new.tool_outputs,
        });
        self.persist();

        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// The last `limit` records, most recent first.
    #[must_use]
    pub fn retrieve(&self, limit: usize) -> Vec<ConversationRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    /// The most recent `limit` records matching `query`, most recent first.
    ///
    /// # Errors
    /// Returns a validation error if the query is missing or empty.
    pub fn search(&self, query: Option<&str>, limit: usize) -> ToolResult<Vec<ConversationRecord>> {
        let needle = query
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ToolError::validation("Search query is required"))?
            .to_lowercase();

        Ok(self
            .records
            .iter()
            .rev()
            .filter(|record| record.matches(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ConversationRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Overwrite the supplied fields of a record.
    ///
    /// # Errors
    /// Returns a validation error if no id is given, or not-found if no record
    /// has that id.
    pub fn update(
        &mut self,
        id: Option<&str>,
        patch: ConversationPatch,
    ) -> ToolResult<&ConversationRecord> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ToolError::validation("Conversation ID is required for updating"))?;
        let index = self.position(id)?;

        patch.apply_to(&mut self.records[index]);
        self.persist();

        Ok(&self.records[index])
    }

    /// Remove a record, returning the new total.
    ///
    /// # Errors
    /// Returns a validation error if no id is given, or not-found if no record
    /// has that id.
    pub fn delete(&mut self, id: Option<&str>) -> ToolResult<usize> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ToolError::validation("Conversation ID is required for deletion"))?;
        let index = self.position(id)?;

        self.records.remove(index);
        self.persist();

        Ok(self.records.len())
    }

    /// Drop every record and start a new session, returning the previous count.
    pub fn clear(&mut self) -> usize {
        let cleared = self.records.len();
        self.records.clear();
        self.session_id = SessionId::new();
        self.persist();
        cleared
    }

    fn position(&self, id: &str) -> ToolResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == *id)
            .ok_or_else(|| ToolError::not_found("Conversation not found"))
    }

    fn persist(&self) {
        if let Err(err) = self.mirror.save(&self.records) {
            warn!("Failed to save conversation memory: {err}");
        }
    }
}
