use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::modules::attendance::adapters::inbound::http_errors::roster_error;
use crate::modules::attendance::core::student::StudentDraft;
use crate::shell::state::AppState;

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.roster.list().await {
        Ok(students) => Json(students).into_response(),
        Err(e) => roster_error(e),
    }
}

pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<StudentDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.roster.add(draft).await {
        Ok(student) => (StatusCode::CREATED, Json(student)).into_response(),
        Err(e) => roster_error(e),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StudentDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.roster.update(&id, draft).await {
        Ok(student) => Json(student).into_response(),
        Err(e) => roster_error(e),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.roster.delete(&id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => roster_error(e),
    }
}
