use axum::http::StatusCode;
use axum::response::IntoResponse;
use blogful_core::{ErrorDetail, HttpError};
use http_body_util::BodyExt;

async fn error_parts(err: HttpError) -> (StatusCode, Option<ErrorDetail>, serde_json::Value) {
    let resp = err.into_response();
    let status = resp.status();
    let detail = resp.extensions().get::<ErrorDetail>().cloned();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, detail, json)
}

#[tokio::test]
async fn not_found_uses_envelope() {
    let (status, detail, body) = error_parts(HttpError::NotFound("Article doesn't exist".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(detail.is_none());
    assert_eq!(body, serde_json::json!({ "error": { "message": "Article doesn't exist" } }));
}

#[tokio::test]
async fn bad_request_uses_envelope() {
    let (status, _, body) = error_parts(HttpError::BadRequest("Missing 'title' in request body".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing 'title' in request body");
}

#[tokio::test]
async fn internal_carries_detail_extension() {
    let (status, detail, body) = error_parts(HttpError::Internal("disk on fire".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(detail, Some(ErrorDetail("disk on fire".into())));
    assert_eq!(body["error"]["message"], "disk on fire");
}

#[test]
fn display_formatting() {
    assert_eq!(HttpError::NotFound("x".into()).to_string(), "Not Found: x");
    assert_eq!(HttpError::BadRequest("y".into()).to_string(), "Bad Request: y");
    assert_eq!(HttpError::Internal("z".into()).to_string(), "Internal Error: z");
}
