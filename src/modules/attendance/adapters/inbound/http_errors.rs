use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::Serialize;

use crate::modules::attendance::adapters::outbound::backing_store::StoreError;
use crate::modules::attendance::use_cases::export_attendance::errors::ExportError;
use crate::modules::attendance::use_cases::manage_roster::handler::RosterError;
use crate::modules::attendance::use_cases::track_attendance::store::AttendanceError;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn store_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::UniqueViolation { .. } => StatusCode::CONFLICT,
        StoreError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        StoreError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn store_error(error: StoreError) -> Response {
    error_response(store_status(&error), error.to_string())
}

pub fn attendance_error(error: AttendanceError) -> Response {
    match error {
        AttendanceError::Store(e) => store_error(e),
        e @ AttendanceError::MarkInProgress { .. } => {
            error_response(StatusCode::CONFLICT, e.to_string())
        }
    }
}

pub fn roster_error(error: RosterError) -> Response {
    match error {
        RosterError::Validation(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        RosterError::Store(e) => store_error(e),
    }
}

pub fn export_error(error: ExportError) -> Response {
    match error {
        ExportError::Store(e) => store_error(e),
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}
