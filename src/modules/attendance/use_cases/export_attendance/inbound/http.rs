use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;

use crate::modules::attendance::adapters::inbound::http_errors::export_error;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct SaveExportResponse {
    pub location: String,
}

pub async fn download(State(state): State<AppState>) -> impl IntoResponse {
    match state.exporter.export().await {
        Ok(file) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, format!("{}; charset=utf-8", file.mime_type)),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.filename),
                ),
            ],
            file.content,
        )
            .into_response(),
        Err(e) => export_error(e),
    }
}

pub async fn save(State(state): State<AppState>) -> impl IntoResponse {
    match state.exporter.export_to(state.export_sink.as_ref()).await {
        Ok(location) => (StatusCode::CREATED, Json(SaveExportResponse { location })).into_response(),
        Err(e) => export_error(e),
    }
}

#[cfg(test)]
mod export_attendance_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::{get, post},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::attendance::adapters::outbound::backing_store::StudentTable;
    use crate::shell::config::AppConfig;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::state::{make_offline_state, make_state_with_config, make_test_state, test_config};
    use crate::tests::fixtures::students::StudentDraftBuilder;

    use super::{download, save};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/exports/attendance.csv", get(download))
            .route("/exports/attendance/save", post(save))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_return_the_csv_as_an_attachment() {
        let (state, table, _) = make_test_state();
        table
            .insert_student(StudentDraftBuilder::new().build())
            .await
            .unwrap();

        let response = app(state)
            .oneshot(
                Request::get("/exports/attendance.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"attendance_2026-10-14.csv\""
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(
            text,
            "Roll Number,Name,Email,Phone,Status,Date\n\
             \"A1\",\"Ann\",\"\",\"\",\"Not Marked\",\"10/14/2026\"\n"
        );
    }

    #[tokio::test]
    async fn it_should_save_the_csv_into_the_export_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_dir: dir.path().to_path_buf(),
            ..test_config()
        };
        let (state, _) = make_state_with_config(&config);

        let response = app(state)
            .oneshot(
                Request::post("/exports/attendance/save")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(dir.path().join("attendance_2026-10-14.csv").exists());
    }

    #[tokio::test]
    async fn it_should_return_500_when_the_roster_cannot_be_read() {
        let response = app(make_offline_state())
            .oneshot(
                Request::get("/exports/attendance.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
