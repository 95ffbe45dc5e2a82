use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::ERROR_SENTINEL;

use super::container::Container;
use super::controller::{ChatController, FeedbackController};
use super::error::ApiResult;

pub const CHAT_ROUTE: &str = "/api/chat";
pub const FEEDBACK_ROUTE: &str = "/api/feedback";

/// Builds the axum router with both endpoints and the shared container.
pub fn router(container: Arc<Container>) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .route(
            CHAT_ROUTE,
            post(chat_handler).layer(DefaultBodyLimit::disable()),
        )
        .route(FEEDBACK_ROUTE, post(feedback_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(container)
}

/// `POST /api/chat`: always `200 OK` with a JSON string body.
///
/// The body is taken as raw bytes with no size limit so malformed or oversized
/// transcripts reach the relay's own error handling. A body that cannot be read
/// at all still answers with the sentinel.
async fn chat_handler(
    State(container): State<Arc<Container>>,
    body: Result<Bytes, BytesRejection>,
) -> Json<String> {
    match body {
        Ok(body) => Json(ChatController::new(&container).chat(&body).await),
        Err(rejection) => {
            warn!("Failed to read chat request body: {rejection}");
            Json(ERROR_SENTINEL.to_string())
        }
    }
}

/// `POST /api/feedback`: `204` when accepted, `400` when invalid.
async fn feedback_handler(
    State(container): State<Arc<Container>>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    FeedbackController::new(&container).feedback(&body)
}

/// Serve the relay on an already bound listener until Ctrl-C.
pub async fn serve(container: Arc<Container>, listener: TcpListener) -> Result<()> {
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        model = container.model_name(),
        max_output_tokens = container.generation_config().max_output_tokens(),
        "Chat relay listening"
    );

    axum::serve(listener, router(container))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
