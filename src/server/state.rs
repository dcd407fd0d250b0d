//! Application state shared across all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::llm::select_renderer;
use crate::memory::{ConversationStore, JsonFileMirror};
use crate::products::RapidApiSearch;
use crate::workflow::Assistant;

use super::ServerResult;

/// Shared application state.
pub struct AppState {
    /// The assistant and its stores.
    pub assistant: Assistant,
}

impl AppState {
    /// Build the state from configuration: load memory, pick the renderer,
    /// set up the product client.
    ///
    /// # Errors
    /// Returns an error if the product client or the assistant cannot be created.
    pub async fn from_config(config: &AppConfig) -> ServerResult<Arc<Self>> {
        let mirror = Arc::new(JsonFileMirror::new(config.storage.memory_file.clone()));
        let memory = ConversationStore::open(mirror);
        info!(
            records = memory.len(),
            file = %config.storage.memory_file.display(),
            "conversation memory loaded"
        );

        let products = RapidApiSearch::new(config.products.clone())?;
        if !products.is_live() {
            info!("RAPIDAPI_KEY not set, product search returns mock data");
        }

        let renderer = select_renderer(&config.llm).await;
        let assistant = Assistant::new(memory, Arc::new(products), renderer)?;

        Ok(Self::with_assistant(assistant))
    }

    /// Wrap an already built assistant.
    #[must_use]
    pub fn with_assistant(assistant: Assistant) -> Arc<Self> {
        Arc::new(Self { assistant })
    }
}
