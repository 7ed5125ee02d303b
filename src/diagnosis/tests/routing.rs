use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::diagnosis::router::{diagnose_handler, DiagnoseRequest};

fn post_json(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn diagnose_route_returns_camel_case_result() {
    let fixture = fixture("support-connect");
    let body = serde_json::to_vec(&json!({ "answers": fixture.answers })).unwrap();

    let response = router()
        .oneshot(post_json("/api/v1/diagnose", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["typeId"], "support-connect");
    assert_eq!(body["category"], "support");
    assert_eq!(body["vector"], "connect");
    assert!(body["scores"]["raw"].is_object());
    assert!(body["scores"]["penalties"]["ng.isolation"].is_number());
    assert_eq!(body["scores"]["categories"]["support"], 1.0);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("You are a Support × Connect type: "));
}

#[tokio::test]
async fn diagnose_handler_rejects_incomplete_answers() {
    let mut answers = fixture("challenge-speed").answers;
    answers.pop();

    let response = diagnose_handler(
        State(Arc::new(builtin_service())),
        Ok(Json(DiagnoseRequest { answers })),
    )
    .await;

    assert_error_response(
        response,
        StatusCode::BAD_REQUEST,
        "missing answer for question Q25",
    )
    .await;
}

#[tokio::test]
async fn diagnose_route_rejects_over_cap_selection() {
    let mut answers = serde_json::to_value(fixture("create-explore").answers).unwrap();
    answers[16] = json!({
        "questionId": "Q17",
        "optionKeys": ["silent_alone", "pressure", "change"]
    });
    let body = serde_json::to_vec(&json!({ "answers": answers })).unwrap();

    let response = router()
        .oneshot(post_json("/api/v1/diagnose", body))
        .await
        .unwrap();

    assert_error_response(
        response,
        StatusCode::BAD_REQUEST,
        "question Q17 allows up to 2 selections",
    )
    .await;
}

#[tokio::test]
async fn diagnose_route_rejects_malformed_json() {
    let response = router()
        .oneshot(post_json("/api/v1/diagnose", b"{\"answers\": [".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn diagnose_route_rejects_answers_with_both_selection_keys() {
    let mut answers =
        serde_json::to_value(&fixture("challenge-speed").answers).expect("answers serialize");
    answers[0]["optionKeys"] = json!(["B"]);
    let body = serde_json::to_vec(&json!({ "answers": answers })).expect("body serializes");

    let response = router()
        .oneshot(post_json("/api/v1/diagnose", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("carries both optionKey and optionKeys"), "{message}");
}

#[tokio::test]
async fn questions_route_lists_the_catalog() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/questions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let questions = body.as_array().expect("question list");
    assert_eq!(questions.len(), 25);
    assert_eq!(questions[0]["id"], "Q01");
    assert_eq!(questions[0]["type"], "single");
    assert_eq!(questions[0]["maxSelect"], 1);
}

#[tokio::test]
async fn type_route_describes_known_types() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/types/strategy-connect")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["typeId"], "strategy-connect");
    assert_eq!(body["categoryLabel"], "Strategy");
    assert_eq!(body["vectorLabel"], "Connect");
}

#[tokio::test]
async fn type_route_returns_not_found_for_unknown_types() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/types/speed-challenge")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_error_response(
        response,
        StatusCode::NOT_FOUND,
        "unknown type id: speed-challenge",
    )
    .await;
}
