use axum::{
    routing::{delete, get},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod interviews;

/// Liveness probe; never touches the store.
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router around the process-scoped connection.
pub fn build_router(db: DatabaseConnection, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/interviews", get(interviews::list).post(interviews::upsert))
        .route("/interviews/:id", delete(interviews::remove))
        .with_state(db)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
