//! Handler tests for the student REST endpoints.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockStudentsCommand, MockStudentsQuery, NO_STUDENT_ROW_MATCHED, StudentRepository,
};
use crate::domain::{Error, Gender, NewStudent, StudentId};
use crate::outbound::InMemoryStudentRepository;

const ANN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn ann() -> Student {
    let details = NewStudent::try_new("Ann", "a@x.com", "1", Gender::Female).expect("valid draft");
    Student::new(StudentId::new(ANN_ID).expect("valid id"), details)
}

fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}

fn repository() -> Arc<InMemoryStudentRepository> {
    Arc::new(InMemoryStudentRepository::new())
}

fn memory_state(repository: Arc<InMemoryStudentRepository>) -> HttpState {
    HttpState::from_repository(repository)
}

fn mock_state(command: MockStudentsCommand, query: MockStudentsQuery) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(query))
}

fn error_message(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_generated_id() {
    let repository = repository();
    let app = actix_test::init_service(test_app(memory_state(repository.clone()))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/students")
        .set_json(json!({"name": "Ann", "email": "a@x.com", "phone": "1", "gender": "Female"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    let id = body.get("id").and_then(Value::as_str).expect("id present");
    assert!(StudentId::new(id).is_ok());
    assert_eq!(body.get("gender").and_then(Value::as_str), Some("Female"));
    assert_eq!(repository.list().await.expect("list").len(), 1);
}

#[rstest]
#[actix_web::test]
async fn create_rejects_duplicate_email() {
    let repository = repository();
    let app = actix_test::init_service(test_app(memory_state(repository.clone()))).await;
    let payload = json!({"name": "Ann", "email": "a@x.com", "phone": "1", "gender": "Female"});

    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let request = actix_test::TestRequest::post()
            .uri("/api/students")
            .set_json(&payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), expected);
        if expected == StatusCode::BAD_REQUEST {
            let body: Value = actix_test::read_body_json(response).await;
            assert_eq!(error_message(&body), Some("Email already exists"));
        }
    }
    assert_eq!(repository.list().await.expect("list").len(), 1);
}

#[rstest]
#[case(json!({"name": "", "email": "a@x.com", "phone": "1", "gender": "Male"}), "name")]
#[case(json!({"name": "Ann", "phone": "1", "gender": "Male"}), "email")]
#[case(json!({"name": "Ann", "email": "a@x.com", "phone": "1", "gender": "Robot"}), "gender")]
#[actix_web::test]
async fn create_rejects_invalid_fields(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(memory_state(repository()))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/students")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some(field)
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_generic_internal_error() {
    let app = actix_test::init_service(test_app(memory_state(repository()))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/students")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some("Internal Server Error"));
}

#[rstest]
#[case(json!({"name": "Ann", "email": "a@x.com", "phone": "1", "gender": "Female"}))]
#[case(json!({"id": "", "name": "Ann", "email": "a@x.com", "phone": "1", "gender": "Female"}))]
#[actix_web::test]
async fn update_requires_id(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(memory_state(repository()))).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/students")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some("ID is required"));
}

#[rstest]
#[actix_web::test]
async fn update_replaces_fields() {
    let repository = Arc::new(InMemoryStudentRepository::with_students([ann()]));
    let app = actix_test::init_service(test_app(memory_state(repository.clone()))).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/students")
        .set_json(json!({
            "id": ANN_ID,
            "name": "Annie",
            "email": "a@x.com",
            "phone": "2",
            "gender": "Other",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Annie"));
    assert_eq!(body.get("id").and_then(Value::as_str), Some(ANN_ID));
    let stored = repository.list().await.expect("list");
    assert_eq!(stored.first().map(Student::phone), Some("2"));
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_id_returns_500() {
    let app = actix_test::init_service(test_app(memory_state(repository()))).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/students")
        .set_json(json!({
            "id": ANN_ID,
            "name": "Ann",
            "email": "a@x.com",
            "phone": "1",
            "gender": "Female",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some(NO_STUDENT_ROW_MATCHED)
    );
}

#[rstest]
#[actix_web::test]
async fn delete_succeeds_for_unknown_ids() {
    let app = actix_test::init_service(test_app(memory_state(repository()))).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/students?id={ANN_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": STUDENT_DELETED}));
}

#[rstest]
#[actix_web::test]
async fn delete_of_non_uuid_id_succeeds_without_touching_the_store() {
    let mut command = MockStudentsCommand::new();
    command.expect_delete_student().never();
    let app = actix_test::init_service(test_app(mock_state(command, MockStudentsQuery::new()))).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/students?id=42")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": STUDENT_DELETED}));
}

#[rstest]
#[actix_web::test]
async fn update_of_non_uuid_id_matches_no_row() {
    let mut command = MockStudentsCommand::new();
    command.expect_update_student().never();
    let app = actix_test::init_service(test_app(mock_state(command, MockStudentsQuery::new()))).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/students")
        .set_json(json!({
            "id": "42",
            "name": "Ann",
            "email": "a@x.com",
            "phone": "1",
            "gender": "Female",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some(NO_STUDENT_ROW_MATCHED));
}

#[rstest]
#[case("/api/students")]
#[case("/api/students?id=")]
#[actix_web::test]
async fn delete_requires_id(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(memory_state(repository()))).await;

    let request = actix_test::TestRequest::delete().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some("ID is required"));
}

#[rstest]
#[actix_web::test]
async fn list_surfaces_store_failure_message() {
    let mut query = MockStudentsQuery::new();
    query
        .expect_list_students()
        .times(1)
        .return_once(|| Err(Error::internal("connection refused")));
    let app = actix_test::init_service(test_app(mock_state(MockStudentsCommand::new(), query))).await;

    let request = actix_test::TestRequest::get().uri("/api/students").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(error_message(&body), Some("connection refused"));
}

#[rstest]
#[actix_web::test]
async fn delete_surfaces_store_failure_as_500() {
    let mut command = MockStudentsCommand::new();
    command
        .expect_delete_student()
        .times(1)
        .return_once(|_| Err(Error::internal("database error")));
    let app = actix_test::init_service(test_app(mock_state(command, MockStudentsQuery::new()))).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/students?id={ANN_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[rstest]
#[actix_web::test]
async fn list_returns_stored_rows() {
    let repository = Arc::new(InMemoryStudentRepository::with_students([ann()]));
    let app = actix_test::init_service(test_app(memory_state(repository))).await;

    let request = actix_test::TestRequest::get().uri("/api/students").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, serde_json::to_value(vec![ann()]).expect("serialise"));
}
