//! Additional integration tests for specific request flows and wire shapes.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use campus_api::api::create_router;
use campus_api::app::AppState;
use campus_api::domain::{InsertAck, Student, StudentPage};
use campus_api::test_utils::MockDocumentStore;

fn test_router() -> Router {
    let store = Arc::new(MockDocumentStore::new());
    create_router(Arc::new(AppState::new(store)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_student_lifecycle_flow() {
    let router = test_router();

    // 1. POST - create a student
    let create_request = Request::builder()
        .method("POST")
        .uri("/students")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({
                "name": "Ann Carter",
                "class_name": "10B",
                "subject": "Physics",
                "email": "ann.carter@example.com"
            })
            .to_string(),
        ))
        .unwrap();

    let create_response = router.clone().oneshot(create_request).await.unwrap();
    assert_eq!(create_response.status(), StatusCode::OK);
    let ack: InsertAck = serde_json::from_value(body_json(create_response).await).unwrap();
    let student_id = ack.inserted_id;

    // 2. GET - retrieve the created student by id
    let get_request = Request::builder()
        .method("GET")
        .uri(format!("/students/{student_id}"))
        .body(Body::empty())
        .unwrap();

    let get_response = router.clone().oneshot(get_request).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);
    let student: Student = serde_json::from_value(body_json(get_response).await).unwrap();
    assert_eq!(student.name.as_deref(), Some("Ann Carter"));
    assert_eq!(student.class_name.as_deref(), Some("10B"));

    // 3. PUT - replace the full field set
    let put_request = Request::builder()
        .method("PUT")
        .uri(format!("/students/{student_id}"))
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({
                "name": "Ann Carter",
                "class_name": "11A",
                "subject": "Physics",
                "email": "ann.carter@example.com"
            })
            .to_string(),
        ))
        .unwrap();

    let put_response = router.clone().oneshot(put_request).await.unwrap();
    assert_eq!(put_response.status(), StatusCode::OK);

    // 4. GET - list and verify the student is present
    let list_request = Request::builder()
        .method("GET")
        .uri("/students?page=0&size=10")
        .body(Body::empty())
        .unwrap();

    let list_response = router.clone().oneshot(list_request).await.unwrap();
    assert_eq!(list_response.status(), StatusCode::OK);
    let page: StudentPage = serde_json::from_value(body_json(list_response).await).unwrap();
    assert_eq!(page.count, 1);
    assert!(
        page.students
            .iter()
            .any(|s| s.id.as_deref() == Some(student_id.as_str())
                && s.class_name.as_deref() == Some("11A"))
    );

    // 5. DELETE - remove the student
    let delete_request = Request::builder()
        .method("DELETE")
        .uri(format!("/students/{student_id}"))
        .body(Body::empty())
        .unwrap();

    let delete_response = router.clone().oneshot(delete_request).await.unwrap();
    assert_eq!(delete_response.status(), StatusCode::OK);

    let gone_request = Request::builder()
        .method("GET")
        .uri(format!("/students/{student_id}"))
        .body(Body::empty())
        .unwrap();
    let gone_response = router.oneshot(gone_request).await.unwrap();
    assert_eq!(gone_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_insert_ack_wire_shape() {
    let router = test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/students")
        .header("Content-Type", "application/json")
        .body(Body::from(json!({"name": "Ann"}).to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let body = body_json(response).await;

    // Driver-native acknowledgment keys, camelCase on the wire
    assert_eq!(body["acknowledged"], true);
    assert!(body["insertedId"].is_string());
    assert!(body.get("inserted_id").is_none());
}

#[tokio::test]
async fn test_students_list_envelope_shape() {
    let router = test_router();

    let request = Request::builder()
        .method("GET")
        .uri("/students")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let body = body_json(response).await;

    assert!(body["count"].is_u64());
    assert!(body["students"].is_array());
}

#[tokio::test]
async fn test_error_body_shape_on_missing_document() {
    let router = test_router();

    let request = Request::builder()
        .method("GET")
        .uri("/gallery/64b7f0a2c9e77a3f4d2e9b33")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "not_found");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_malformed_json_body_rejected() {
    let router = test_router();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
