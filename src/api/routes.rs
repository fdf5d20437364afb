use axum::{
    routing::post,
    Router,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::api::models::SummarizeRequest;
use crate::api::response;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// The body is parsed as JSON whatever its content type. Only a body that
/// fails to deserialize is rejected; everything after that answers `200`.
async fn summarize_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let req = match serde_json::from_slice::<SummarizeRequest>(&body) {
        Ok(req) => req,
        Err(err) => {
            tracing::warn!(error = %err, "rejecting malformed request body");
            return response::rejected(&err).into_response();
        }
    };

    tracing::info!(url = %req.url, model_id = %state.config.model_id, "processing summarize request");
    let start_time = std::time::Instant::now();

    let summary = state.summarizer.summarize(&req.url).await;

    if summary.is_degraded() {
        tracing::warn!(
            url = %req.url,
            failures = summary.failures.len(),
            "returning degraded summary"
        );
    }
    tracing::info!(url = %req.url, elapsed = ?start_time.elapsed(), "request processed");

    response::bullets(summary.bullets).into_response()
}
