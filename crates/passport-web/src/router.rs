use std::any::Any;
use std::path::Path;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{error, Level};

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Builds the application: API routes, health probe, and static assets from
/// `static_dir` for every other path.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
            tracing::info_span!("http_request", method = %req.method(), uri = %req.uri())
        })
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/random-user", get(handlers::random_user))
        .route("/api/country", get(handlers::country))
        .route("/api/rates", get(handlers::rates))
        .route("/api/news", get(handlers::news))
        .route("/api/profile", get(handlers::profile))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(trace)
        .layer(CorsLayer::permissive())
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    error!(panic = %detail, "handler panicked");
    ApiError::panicked().into_response()
}
