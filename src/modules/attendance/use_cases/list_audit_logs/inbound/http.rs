use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::attendance::adapters::inbound::http_errors::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListAuditLogsParams {
    pub limit: Option<usize>,
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<ListAuditLogsParams>,
) -> impl IntoResponse {
    match state.audit_logs.list_recent(params.limit).await {
        Ok(views) => Json(views).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
