//! HTTP route handlers for the assistant API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::meals::{MealToolInput, MealToolOutput, TimeContext};
use crate::memory::{MemoryToolInput, MemoryToolOutput};
use crate::products::{ProductToolInput, ProductToolOutput};
use crate::shopping::{ShoppingToolInput, ShoppingToolOutput};
use crate::{meals, memory, products, shopping};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/assistant", post(assistant))
        .route("/api/tools/conversation-memory", post(conversation_memory))
        .route("/api/tools/shopping-list", post(shopping_list))
        .route("/api/tools/product-search", post(product_search))
        .route("/api/tools/meal-suggestion", post(meal_suggestion))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pantry-agent",
        "version": env!("CARGO_PKG_VERSION"),
        "renderer": state.assistant.renderer_name()
    }))
}

/// JSON body of a tool call. A body that cannot be read as the tool's input
/// is answered with the tool's `{success: false, message}` shape.
pub struct ToolInput<T>(pub T);

impl<S, T> FromRequest<S> for ToolInput<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ToolInputRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(input)) => Ok(Self(input)),
            Err(rejection) => Err(ToolInputRejection(rejection)),
        }
    }
}

/// Rejected tool body, rendered as a failed tool result.
#[derive(Debug)]
pub struct ToolInputRejection(JsonRejection);

impl IntoResponse for ToolInputRejection {
    fn into_response(self) -> Response {
        let message = format!("Invalid tool input: {}", self.0.body_text());
        debug!(status = %self.0.status(), %message, "rejected tool call");
        let body = Json(serde_json::json!({ "success": false, "message": message }));
        (self.0.status(), body).into_response()
    }
}

/// Assistant request.
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    /// The user's message.
    pub message: String,
}

/// Assistant response.
#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    /// The rendered reply.
    pub response: String,
}

/// Run a message through the full pipeline.
async fn assistant(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, (StatusCode, String)> {
    let response = state
        .assistant
        .process(&request.message)
        .await
        .map_err(|e| {
            error!(error = %e, "assistant pipeline failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Assistant error: {e}"))
        })?;

    Ok(Json(AssistantResponse { response }))
}

async fn conversation_memory(
    State(state): State<Arc<AppState>>,
    ToolInput(input): ToolInput<MemoryToolInput>,
) -> Json<MemoryToolOutput> {
    let mut store = state.assistant.memory().lock().await;
    Json(memory::tool::execute(&mut store, input))
}

async fn shopping_list(
    State(state): State<Arc<AppState>>,
    ToolInput(input): ToolInput<ShoppingToolInput>,
) -> Json<ShoppingToolOutput> {
    let mut list = state.assistant.shopping().lock().await;
    Json(shopping::tool::execute(&mut list, input))
}

async fn product_search(
    State(state): State<Arc<AppState>>,
    ToolInput(input): ToolInput<ProductToolInput>,
) -> Json<ProductToolOutput> {
    Json(products::tool::execute(state.assistant.products(), &input).await)
}

async fn meal_suggestion(ToolInput(input): ToolInput<MealToolInput>) -> Json<MealToolOutput> {
    Json(meals::suggest::execute(&input, &TimeContext::now()))
}
