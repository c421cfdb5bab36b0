//! Class list endpoint.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::AppState;

/// GET /classes - Codes of all classes with lessons, one per line.
pub async fn list_classes(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.store.current();

    let body: String = snapshot
        .indexed_class_codes()
        .into_iter()
        .map(|code| format!("{}\n", code))
        .collect();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}
