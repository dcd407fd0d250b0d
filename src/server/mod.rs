//! HTTP server for the assistant API.
//!
//! Serves the full pipeline at `/api/assistant` and each tool under
//! `/api/tools/*`, with permissive CORS and request tracing.

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::products::ProductSearchError;
use crate::workflow::WorkflowError;

/// Server startup or runtime failure.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The product search client could not be built.
    #[error("failed to create product client: {0}")]
    ProductClient(#[from] ProductSearchError),
    /// The assistant could not be assembled.
    #[error("failed to create assistant: {0}")]
    Assistant(#[from] WorkflowError),
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Convenience result alias for the server.
pub type ServerResult<T> = Result<T, ServerError>;

/// Router with the API routes plus the CORS and trace layers.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve on all interfaces at `port` until `shutdown_signal` completes.
///
/// # Errors
/// Returns an error if the port cannot be bound or serving fails.
pub async fn run_server_with_shutdown<F>(
    state: Arc<AppState>,
    port: u16,
    shutdown_signal: F,
) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, renderer = %state.assistant.renderer_name(), "pantry agent listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(ServerError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::llm::TemplateRenderer;
    use crate::memory::{ConversationStore, NoMirror};
    use crate::products::{ProductsConfig, RapidApiSearch};
    use crate::workflow::Assistant;

    fn state() -> Arc<AppState> {
        let products = RapidApiSearch::new(ProductsConfig::default()).expect("client");
        let assistant = Assistant::new(
            ConversationStore::open(Arc::new(NoMirror)),
            Arc::new(products),
            Arc::new(TemplateRenderer),
        )
        .expect("assistant");
        AppState::with_assistant(assistant)
    }

    #[tokio::test]
    async fn test_cors_preflight_is_allowed() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/assistant")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .expect("request");

        let response = build_app(state()).oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = tokio::net::TcpListener::bind("0.0.0.0:0").await.expect("listener");
        let port = taken.local_addr().expect("addr").port();

        let result = run_server_with_shutdown(state(), port, async {}).await;
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
