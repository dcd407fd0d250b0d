//! The assistant pipeline: classify, process, render.

use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::ids::RecordId;
use crate::llm::{RenderError, ResponseRenderer};
use crate::meals::suggest as meal_tool;
use crate::meals::{MealToolInput, MealToolOutput, TimeContext};
use crate::memory::{ConversationPatch, ConversationStore, NewConversation, ToolOutput};
use crate::products::{ProductSearch, ProductToolInput, cheapest, tool as product_tool};
use crate::shopping::{NewItem, ShoppingList};
use crate::workflow::classify::RequestClassifier;
use crate::workflow::types::{
    MealData, ProcessedData, ProductPick, RequestAnalysis, RequestType, ShoppingData,
};

/// Servings used for pipeline meal suggestions.
const PIPELINE_SERVINGS: f64 = 2.0;

/// Pipeline failure.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The classifier rule table failed to compile.
    #[error("classifier rules invalid: {0}")]
    Classifier(#[from] regex::Error),
    /// The final response could not be rendered.
    #[error("response rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Convenience result alias for pipeline runs.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Result of the process stage plus what is recorded alongside it.
#[derive(Clone, Debug)]
pub struct ProcessOutcome {
    /// Data handed to the renderer.
    pub data: ProcessedData,
    /// Placeholder record created for this turn, if storing succeeded.
    pub record_id: Option<RecordId>,
    /// Tool results to attach to the record.
    pub tool_outputs: Vec<ToolOutput>,
}

/// The assistant: owns the stores and runs requests through the pipeline.
///
/// Store locks are held for single operations only, never across a lookup or
/// a render.
pub struct Assistant {
    memory: Mutex<ConversationStore>,
    shopping: Mutex<ShoppingList>,
    products: Arc<dyn ProductSearch>,
    renderer: Arc<dyn ResponseRenderer>,
    classifier: RequestClassifier,
}

impl Assistant {
    /// Build an assistant around an opened conversation store.
    ///
    /// # Errors
    /// Returns an error if the classifier rules fail to compile.
    pub fn new(
        memory: ConversationStore,
        products: Arc<dyn ProductSearch>,
        renderer: Arc<dyn ResponseRenderer>,
    ) -> WorkflowResult<Self> {
        Ok(Self {
            memory: Mutex::new(memory),
            shopping: Mutex::new(ShoppingList::new()),
            products,
            renderer,
            classifier: RequestClassifier::new()?,
        })
    }

    /// Conversation store.
    #[must_use]
    pub const fn memory(&self) -> &Mutex<ConversationStore> {
        &self.memory
    }

    /// Shopping list.
    #[must_use]
    pub const fn shopping(&self) -> &Mutex<ShoppingList> {
        &self.shopping
    }

    /// Product lookup adapter.
    #[must_use]
    pub fn products(&self) -> &dyn ProductSearch {
        self.products.as_ref()
    }

    /// Renderer backend description.
    #[must_use]
    pub fn renderer_name(&self) -> String {
        self.renderer.describe()
    }

    /// Handle `message` at the current local time.
    ///
    /// # Errors
    /// Returns an error if rendering fails.
    pub async fn process(&self, message: &str) -> WorkflowResult<String> {
        self.process_at(message, chrono::Local::now().naive_local())
            .await
    }

    /// Handle `message` as if received at local time `now`.
    ///
    /// # Errors
    /// Returns an error if rendering fails.
    pub async fn process_at(&self, message: &str, now: NaiveDateTime) -> WorkflowResult<String> {
        let analysis = self.classify(message, now);
        let outcome = self.process_request(&analysis, now).await;

        debug!(actions = outcome.data.actions_completed.len(), "rendering response");
        let response = self.renderer.render(&outcome.data).await?;

        if let Some(id) = &outcome.record_id {
            self.complete_record(id, &response, outcome.tool_outputs).await;
        }

        Ok(response)
    }

    /// Stage 1: classify the message.
    #[must_use]
    pub fn classify(&self, message: &str, now: NaiveDateTime) -> RequestAnalysis {
        self.classifier.classify_at(message, now)
    }

    /// Stage 2: store the request, then run the tools its type calls for.
    pub async fn process_request(
        &self,
        analysis: &RequestAnalysis,
        now: NaiveDateTime,
    ) -> ProcessOutcome {
        let mut actions = vec!["Analyzed user request".to_string()];
        let record_id = self.store_placeholder(analysis).await;
        if record_id.is_some() {
            actions.push("Stored conversation in memory".to_string());
        }

        let mut outcome = ProcessOutcome {
            data: ProcessedData {
                conversation_stored: record_id.is_some(),
                ..ProcessedData::default()
            },
            record_id,
            tool_outputs: Vec::new(),
        };

        match analysis.request_type {
            RequestType::Meal | RequestType::General => {
                self.plan_meal(analysis, now, &mut outcome, &mut actions)
                    .await;
            }
            RequestType::Shopping => {
                self.shop(analysis, &mut outcome, &mut actions).await;
            }
        }

        outcome.data.actions_completed = actions;
        outcome
    }

    async fn store_placeholder(&self, analysis: &RequestAnalysis) -> Option<RecordId> {
        let mut memory = self.memory.lock().await;
        match memory.store(NewConversation {
            user_message: Some(analysis.user_request.clone()),
            ai_response: Some(String::new()),
            context: Some(analysis.context.clone()),
            tool_outputs: None,
        }) {
            Ok(record) => Some(record.id.clone()),
            Err(err) => {
                warn!(error = %err, "request not stored in memory");
                None
            }
        }
    }

    async fn plan_meal(
        &self,
        analysis: &RequestAnalysis,
        now: NaiveDateTime,
        outcome: &mut ProcessOutcome,
        actions: &mut Vec<String>,
    ) {
        let time = TimeContext::at(now);
        let input = MealToolInput {
            preferences: analysis.preferences.clone(),
            dietary_restrictions: analysis
                .has_preference("vegetarian")
                .then(|| vec!["vegetarian".to_string()]),
            ..MealToolInput::for_servings(PIPELINE_SERVINGS)
        };
        let meal = meal_tool::suggest(&input, &time);
        outcome.tool_outputs.push(ToolOutput::capture(
            meal_tool::TOOL_ID,
            &MealToolOutput::suggested(meal.clone(), &time),
        ));

        info!(meal = %meal.name, "suggested meal");
        outcome.data.meal_data = Some(MealData::from(&meal));
        actions.push("Generated meal suggestion".to_string());

        let items = meal
            .ingredients
            .iter()
            .map(|ing| NewItem::new(ing.item.clone(), ing.quantity, ing.unit.clone()))
            .collect();
        {
            let mut shopping = self.shopping.lock().await;
            if let Err(err) = shopping.add(items) {
                warn!(error = %err, "ingredients not added to shopping list");
            }
        }
        actions.push("Added ingredients to shopping list".to_string());

        let mut picks = Vec::new();
        for ing in &meal.ingredients {
            let search = product_tool::execute(
                self.products.as_ref(),
                &ProductToolInput::new(ing.item.clone()),
            )
            .await;
            if let Some(product) = search.products.as_deref().and_then(cheapest) {
                picks.push(ProductPick::for_ingredient(product, &ing.item));
            }
            outcome
                .tool_outputs
                .push(ToolOutput::capture(product_tool::TOOL_ID, &search));
        }

        let price_analysis = if picks.is_empty() {
            "No product prices available".to_string()
        } else {
            format!("Optimized prices for {} ingredient(s)", picks.len())
        };
        outcome.data.shopping_data = Some(ShoppingData {
            products: picks,
            price_analysis,
        });
        actions.push("Searched Amazon and optimized prices".to_string());
    }

    async fn shop(
        &self,
        analysis: &RequestAnalysis,
        outcome: &mut ProcessOutcome,
        actions: &mut Vec<String>,
    ) {
        let search = product_tool::execute(
            self.products.as_ref(),
            &ProductToolInput::new(analysis.user_request.clone()),
        )
        .await;
        let products = search.products.clone().unwrap_or_default();

        let price_analysis = cheapest(&products).map_or_else(
            || "No product pricing information".to_string(),
            |p| {
                format!(
                    "Cheapest option: {} at {}",
                    p.title,
                    p.price.as_deref().unwrap_or_default()
                )
            },
        );
        outcome.data.shopping_data = Some(ShoppingData {
            products: products
                .iter()
                .map(|p| ProductPick::for_ingredient(p, &p.title))
                .collect(),
            price_analysis,
        });
        outcome
            .tool_outputs
            .push(ToolOutput::capture(product_tool::TOOL_ID, &search));

        {
            let mut shopping = self.shopping.lock().await;
            if let Err(err) = shopping.add(vec![NewItem::new(
                analysis.user_request.clone(),
                1.0,
                "item",
            )]) {
                warn!(error = %err, "request not added to shopping list");
            }
        }

        actions.push("Searched Amazon products".to_string());
        actions.push("Added item to shopping list".to_string());
    }

    async fn complete_record(&self, id: &RecordId, response: &str, tool_outputs: Vec<ToolOutput>) {
        let mut memory = self.memory.lock().await;
        let patch = ConversationPatch {
            ai_response: Some(response.to_string()),
            tool_outputs: Some(tool_outputs),
            ..ConversationPatch::default()
        };
        if let Err(err) = memory.update(Some(id.as_str()), patch) {
            warn!(error = %err, %id, "could not record the rendered response");
        }
    }
}
