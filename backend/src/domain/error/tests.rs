//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn conflict_error() -> Error {
    Error::already_exists("Student S1 already exists")
        .with_details(json!({ "collection": "Student", "id": "S1" }))
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::method_not_allowed("post only"), ErrorCode::MethodNotAllowed)]
#[case(Error::credential_conflict("exists"), ErrorCode::CredentialConflict)]
#[case(Error::weak_credential("weak"), ErrorCode::WeakCredential)]
#[case(Error::unknown_identity("who"), ErrorCode::UnknownIdentity)]
#[case(Error::invalid_credential("wrong"), ErrorCode::InvalidCredential)]
#[case(Error::unauthorized("login"), ErrorCode::Unauthorized)]
#[case(Error::already_exists("dup"), ErrorCode::AlreadyExists)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::upstream("down"), ErrorCode::UpstreamError)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn serialises_code_in_snake_case(conflict_error: Error) {
    let value = serde_json::to_value(&conflict_error).expect("serialise error");
    assert_eq!(value["code"], "already_exists");
    assert_eq!(value["message"], "Student S1 already exists");
    assert_eq!(value["details"]["id"], "S1");
    assert!(value.get("traceId").is_none());
}

#[rstest]
fn deserialises_from_wire_payload() {
    let payload = json!({
        "code": "unauthorized",
        "message": "login required",
        "traceId": TRACE_ID,
    });
    let error: Error = serde_json::from_value(payload).expect("deserialise error");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert!(error.details().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::upstream("store down") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::not_found("Student S9 not found").to_string(), "Student S9 not found");
}
