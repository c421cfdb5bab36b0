//! Health endpoint.

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// GET /health - Which schedule revision is served and when it was built.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store.current();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: snapshot.version.clone(),
        description: snapshot.description.clone(),
        built_at: snapshot.built_at.to_rfc3339(),
        classes: snapshot.class_index.len(),
        teachers: snapshot.teacher_index.len(),
    })
}
