//! Lessons query endpoint.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use crate::errors::ScheduleError;
use crate::etag;
use crate::query::{run_query, Selectors};
use crate::AppState;

/// Lessons query parameters, each a comma-separated list of codes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LessonsQuery {
    pub classes: String,
    pub teachers: String,
}

impl LessonsQuery {
    /// The first value wins when a parameter is repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut classes = None;
        let mut teachers = None;
        for (key, value) in pairs {
            match key.as_str() {
                "classes" => classes = classes.or(Some(value)),
                "teachers" => teachers = teachers.or(Some(value)),
                _ => {}
            }
        }
        Self {
            classes: classes.unwrap_or_default(),
            teachers: teachers.unwrap_or_default(),
        }
    }
}

/// GET /lessons - Lessons of the requested classes and teachers.
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<Response, ScheduleError> {
    let params = LessonsQuery::from_pairs(pairs);
    let if_none_match = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok());

    tracing::info!(
        classes = %params.classes,
        teachers = %params.teachers,
        if_none_match = ?if_none_match,
        "Lessons query"
    );

    let selectors = Selectors::parse(&params.classes, &params.teachers);
    if selectors.is_empty() {
        return Err(ScheduleError::NoSelector);
    }

    let snapshot = state.store.current();
    let token = etag::fingerprint(&params.classes, &params.teachers, &snapshot.version);

    if etag::matches(if_none_match, &token) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, token)]).into_response());
    }

    let response = run_query(&selectors, &snapshot)?;
    let body = serde_json::to_vec(&response)
        .map_err(|e| ScheduleError::Serialization(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
            (header::ETAG, token),
        ],
        body,
    )
        .into_response())
}
