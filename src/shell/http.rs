use axum::{
    Extension, Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::modules::attendance::use_cases::export_attendance::inbound::http as export_http;
use crate::modules::attendance::use_cases::list_audit_logs::inbound::http as audit_http;
use crate::modules::attendance::use_cases::manage_roster::inbound::http as roster_http;
use crate::modules::attendance::use_cases::track_attendance::inbound::http as attendance_http;
use crate::shell::graphql::{graphiql, graphql, schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = schema(state.clone());

    Router::new()
        .route("/attendance", get(attendance_http::fetch))
        .route("/attendance/mark", post(attendance_http::mark))
        .route("/attendance/status/{student_id}", get(attendance_http::status))
        .route("/attendance/summary", get(attendance_http::summary))
        .route("/students", get(roster_http::list).post(roster_http::add))
        .route(
            "/students/{id}",
            put(roster_http::update).delete(roster_http::delete),
        )
        .route("/audit-logs", get(audit_http::handle))
        .route("/exports/attendance.csv", get(export_http::download))
        .route("/exports/attendance/save", post(export_http::save))
        .with_state(state)
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
