use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use blogful_test::{json_pointer, TestApp};
use serde_json::{json, Value};

#[test]
fn pointer_for_simple_field() {
    assert_eq!(json_pointer("title"), "/title");
}

#[test]
fn pointer_for_nested_field() {
    assert_eq!(json_pointer("error.message"), "/error/message");
}

#[test]
fn pointer_for_array_indices() {
    assert_eq!(json_pointer("[0].title"), "/0/title");
    assert_eq!(json_pointer("articles[2].tags[1]"), "/articles/2/tags/1");
}

#[test]
fn pointer_escapes_reserved_characters() {
    assert_eq!(json_pointer("a/b.c~d"), "/a~1b/c~0d");
}

fn echo_app() -> TestApp {
    TestApp::new(
        Router::new()
            .route("/items", get(|| async { Json(json!([{ "title": "first" }])) }))
            .route(
                "/items",
                post(|Json(body): Json<Value>| async move {
                    (
                        StatusCode::CREATED,
                        [(axum::http::header::LOCATION, "/items/1")],
                        Json(body),
                    )
                }),
            ),
    )
}

#[tokio::test]
async fn get_and_assert_json_path() {
    echo_app()
        .get("/items")
        .send()
        .await
        .assert_ok()
        .assert_json_path("[0].title", "first")
        .assert_json_path("[1].title", Value::Null);
}

#[tokio::test]
async fn post_json_exposes_location_and_body() {
    let resp = echo_app()
        .post("/items")
        .json(&json!({ "title": "second" }))
        .send()
        .await
        .assert_created();
    assert_eq!(resp.location(), "/items/1");
    let title: String = resp.json_path("title");
    assert_eq!(title, "second");
}

#[tokio::test]
async fn unmatched_requests_are_rejected() {
    echo_app().delete("/items").send().await.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    echo_app().get("/nowhere").send().await.assert_not_found();
}
