//! Conversation memory for the assistant.
//!
//! - `record`: record model, new-record and patch inputs
//! - `persistence`: whole-file JSON mirror
//! - `conversation_store`: ordered history and its query surface
//! - `tool`: the `conversation-memory` tool contract

pub mod conversation_store;
pub mod persistence;
pub mod record;
pub mod tool;

pub use conversation_store::{ConversationStore, DEFAULT_LIMIT};
pub use persistence::{JsonFileMirror, NoMirror, PersistenceError, RecordMirror};
pub use record::{ConversationPatch, ConversationRecord, NewConversation, ToolOutput};
pub use tool::{MemoryAction, MemoryToolInput, MemoryToolOutput};
