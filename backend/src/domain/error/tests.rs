//! Tests for the domain error payload and its serialised form.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_internal_message() {
    let error = Error::internal("  ");
    assert_eq!(error.message(), "Internal Server Error");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn with_trace_id_ignores_blank_values() {
    let error = Error::invalid_request("bad").with_trace_id(" ");
    assert!(error.trace_id().is_none());
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_message_under_error_key(expected_trace_id: String) {
    let error = Error::invalid_request("Email already exists")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "email"}));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "error": "Email already exists",
            "code": "invalid_request",
            "traceId": expected_trace_id,
            "details": {"field": "email"},
        })
    );
}

#[rstest]
fn serialisation_omits_absent_optionals() {
    let value = serde_json::to_value(Error::invalid_request("ID is required")).expect("serialise");
    assert_eq!(value, json!({"error": "ID is required", "code": "invalid_request"}));
}

#[rstest]
fn deserialisation_rejects_blank_message() {
    let result = serde_json::from_value::<Error>(json!({"error": " ", "code": "invalid_request"}));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialisation_keeps_payload_trace_id(expected_trace_id: String) {
    let ambient: TraceId = "11111111-1111-1111-1111-111111111111"
        .parse()
        .expect("valid UUID");
    let payload = json!({"error": "boom", "code": "internal_error", "traceId": expected_trace_id});
    let error = TraceId::scope(ambient, async move {
        serde_json::from_value::<Error>(payload).expect("valid payload")
    })
    .await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
