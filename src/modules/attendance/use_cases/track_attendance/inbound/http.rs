use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::attendance::adapters::inbound::http_errors::{
    attendance_error, error_response, roster_error,
};
use crate::modules::attendance::core::attendance_record::AttendanceStatus;
use crate::modules::attendance::use_cases::track_attendance::command::MarkAttendance;
use crate::shared::core::primitives::CanonicalDate;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct FetchAttendanceParams {
    pub date: String,
}

#[derive(Serialize)]
pub struct AttendanceStatusResponse {
    pub student_id: String,
    pub date: CanonicalDate,
    pub status: Option<AttendanceStatus>,
}

pub async fn fetch(
    State(state): State<AppState>,
    Query(params): Query<FetchAttendanceParams>,
) -> impl IntoResponse {
    let date = match CanonicalDate::parse(&params.date) {
        Ok(d) => d,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    match state.attendance.fetch_for_date(date).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => attendance_error(e),
    }
}

pub async fn mark(
    State(state): State<AppState>,
    body: Result<Json<MarkAttendance>, JsonRejection>,
) -> impl IntoResponse {
    let Json(command) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.attendance.mark_attendance(command).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => attendance_error(e),
    }
}

pub async fn status(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    let snapshot = state.attendance.snapshot().await;
    Json(AttendanceStatusResponse {
        status: snapshot.status_of(&student_id),
        date: snapshot.date(),
        student_id,
    })
}

pub async fn summary(State(state): State<AppState>) -> impl IntoResponse {
    match state.roster.count().await {
        Ok(total) => Json(state.attendance.summary(total).await).into_response(),
        Err(e) => roster_error(e),
    }
}
