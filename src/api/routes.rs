use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{aggregates, resources};
use crate::error::AppError;
use crate::state::AppState;

pub async fn health_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<Value>, AppError> {
    state.resources.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Assemble the full API router.
///
/// Shared by `main` and the integration suite so the two never drift.
/// Reads are public; mutations check the bearer token in-handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/resources/{kind}",
            get(resources::list_handler).post(resources::create_handler),
        )
        .route(
            "/api/resources/{kind}/search/{term}",
            get(resources::search_handler),
        )
        .route(
            "/api/resources/{kind}/{id}",
            get(resources::read_handler)
                .put(resources::update_handler)
                .delete(resources::delete_handler),
        )
        .route(
            "/api/aggregates/students-by-course",
            get(aggregates::students_by_course_handler),
        )
        .route(
            "/api/aggregates/activities-by-name",
            get(aggregates::activities_by_name_handler),
        )
        .route(
            "/api/aggregates/patents-by-status",
            get(aggregates::patents_by_status_handler),
        )
        .route(
            "/api/aggregates/projects-by-category",
            get(aggregates::projects_by_category_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
