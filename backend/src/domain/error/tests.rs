//! Tests for the error payload formatting and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
fn constructors_set_the_matching_code() {
    let cases = [
        (Error::invalid_request("bad"), ErrorCode::InvalidRequest),
        (Error::unauthorized("no auth"), ErrorCode::Unauthorized),
        (Error::forbidden("denied"), ErrorCode::Forbidden),
        (Error::not_found("missing"), ErrorCode::NotFound),
        (
            Error::method_not_allowed("unsupported"),
            ErrorCode::MethodNotAllowed,
        ),
        (Error::internal("boom"), ErrorCode::InternalError),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code);
    }
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
fn display_renders_the_message(base_error: Error) {
    assert_eq!(base_error.to_string(), "bad");
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn try_from_error_dto_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_string(),
        trace_id: None,
        details: None,
    };

    let error = TraceId::scope(trace_id, async move {
        Error::try_from(dto).expect("conversion succeeds for valid payload without trace")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn try_from_error_dto_preserves_details() {
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_string(),
        trace_id: Some(TRACE_ID.to_owned()),
        details: Some(json!({"field": "password"})),
    };

    let error = Error::try_from(dto).expect("conversion succeeds");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert_eq!(error.details(), Some(&json!({"field": "password"})));
}

#[rstest]
fn try_from_error_dto_rejects_blank_trace_ids() {
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_string(),
        trace_id: Some("   ".to_owned()),
        details: None,
    };

    let result = Error::try_from(dto);
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn serializes_camel_case_and_omits_absent_fields(base_error: Error) {
    let bare = serde_json::to_value(&base_error).expect("error serializes");
    assert_eq!(bare, json!({ "code": "invalid_request", "message": "bad" }));

    let traced = serde_json::to_value(base_error.with_trace_id(TRACE_ID))
        .expect("error serializes");
    assert_eq!(
        traced,
        json!({ "code": "invalid_request", "message": "bad", "traceId": TRACE_ID }),
    );
}

#[rstest]
fn deserializes_the_snake_case_trace_alias() {
    let error: Error = serde_json::from_value(json!({
        "code": "unauthorized",
        "message": "no auth",
        "trace_id": TRACE_ID,
    }))
    .expect("alias deserializes");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[derive(Debug, Clone)]
enum ConstructedError {
    Success,
    Failure(ErrorValidationError),
}

impl ConstructedError {
    fn from_result(result: Result<Error, ErrorValidationError>) -> Self {
        match result {
            Ok(_) => Self::Success,
            Err(err) => Self::Failure(err),
        }
    }
}

#[given("a well-formed error payload")]
fn a_well_formed_error_payload() -> (ErrorCode, String) {
    (ErrorCode::InvalidRequest, "well formed".to_owned())
}

#[when("the error is constructed")]
fn the_error_is_constructed(payload: (ErrorCode, String)) -> ConstructedError {
    ConstructedError::from_result(Error::try_new(payload.0, payload.1))
}

#[then("the construction succeeds")]
fn the_construction_succeeds(result: ConstructedError) {
    assert!(matches!(result, ConstructedError::Success));
}

#[rstest]
fn constructing_an_error_happy_path() {
    let payload = a_well_formed_error_payload();
    let result = the_error_is_constructed((payload.0, payload.1.clone()));
    the_construction_succeeds(result);
}

#[given("a blank error message")]
fn a_blank_error_message() -> (ErrorCode, String) {
    (ErrorCode::InvalidRequest, "   ".to_owned())
}

#[then("construction fails with an empty message")]
fn construction_fails_with_empty_message(result: ConstructedError) {
    assert!(matches!(
        result,
        ConstructedError::Failure(ErrorValidationError::EmptyMessage)
    ));
}

#[rstest]
fn constructing_an_error_unhappy_path() {
    let payload = a_blank_error_message();
    let result = the_error_is_constructed((payload.0, payload.1.clone()));
    construction_fails_with_empty_message(result);
}
