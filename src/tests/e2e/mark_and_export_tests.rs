use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rstest::{fixture, rstest};
use tower::ServiceExt;

use crate::shell::http::router;
use crate::tests::fixtures::state::{TEST_DAY, make_test_state};

#[fixture]
fn before_each() -> Router {
    let (state, _, _) = make_test_state();
    router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn add_student(app: &Router, roll_number: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/students",
            format!(r#"{{"roll_number":"{roll_number}","name":"{name}"}}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    json["id"].as_str().unwrap().to_string()
}

async fn mark(app: &Router, student_id: &str, status: &str) {
    let (code, _) = send(
        app,
        post_json(
            "/attendance/mark",
            format!(r#"{{"student_id":"{student_id}","status":"{status}"}}"#),
        ),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
}

#[rstest]
#[tokio::test]
async fn it_should_export_the_latest_mark_and_unmarked_students(before_each: Router) {
    let app = before_each;
    let ann = add_student(&app, "A1", "Ann").await;
    add_student(&app, "B2", "Bo").await;

    let (status, _) = send(
        &app,
        Request::get(format!("/attendance?date={TEST_DAY}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    mark(&app, &ann, "present").await;
    mark(&app, &ann, "absent").await;

    let (status, csv) = send(
        &app,
        Request::get("/exports/attendance.csv")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        csv,
        "Roll Number,Name,Email,Phone,Status,Date\n\
         \"A1\",\"Ann\",\"\",\"\",\"absent\",\"10/14/2026\"\n\
         \"B2\",\"Bo\",\"\",\"\",\"Not Marked\",\"10/14/2026\"\n"
    );
}

#[rstest]
#[tokio::test]
async fn it_should_keep_one_record_per_student_and_day(before_each: Router) {
    let app = before_each;
    let ann = add_student(&app, "A1", "Ann").await;

    mark(&app, &ann, "present").await;
    mark(&app, &ann, "late").await;
    mark(&app, &ann, "absent").await;

    let (_, body) = send(
        &app,
        Request::get(format!("/attendance?date={TEST_DAY}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], "absent");

    let (_, body) = send(
        &app,
        Request::get("/audit-logs").body(Body::empty()).unwrap(),
    )
    .await;
    let logs: serde_json::Value = serde_json::from_str(&body).unwrap();
    let actions: Vec<_> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(actions, vec!["UPDATE", "UPDATE", "INSERT", "INSERT"]);
}

#[rstest]
#[tokio::test]
async fn it_should_drop_the_previous_day_when_the_date_changes(before_each: Router) {
    let app = before_each;
    let ann = add_student(&app, "A1", "Ann").await;
    mark(&app, &ann, "present").await;

    send(
        &app,
        Request::get("/attendance?date=2026-10-15")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    let (_, body) = send(
        &app,
        Request::get(format!("/attendance/status/{ann}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["date"], "2026-10-15");
    assert_eq!(json["status"], serde_json::Value::Null);

    let (_, csv) = send(
        &app,
        Request::get("/exports/attendance.csv")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert!(csv.contains("\"Not Marked\",\"10/15/2026\""));
}
