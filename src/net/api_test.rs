use super::*;
use serde_json::json;

// =============================================================
// ApiRequest
// =============================================================

#[test]
fn post_json_sets_content_type_and_authorization() {
    let req = ApiRequest::post_json("/api/contact", "Bearer T", "{}".to_owned());
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Authorization"), Some("Bearer T"));
    assert_eq!(req.body.as_deref(), Some("{}"));
}

#[test]
fn empty_authorization_is_sent_not_omitted() {
    let req = ApiRequest::post_json("/api/contact", "", "{}".to_owned());
    assert_eq!(req.header("Authorization"), Some(""));
}

#[test]
fn get_has_no_body_or_headers() {
    let req = ApiRequest::get("/get-comments?t=1");
    assert_eq!(req.method, Method::Get);
    assert!(req.headers.is_empty());
    assert!(req.body.is_none());
}

// =============================================================
// ApiResponse
// =============================================================

#[test]
fn expect_ok_passes_2xx_and_rejects_others() {
    let ok = ApiResponse { status: 204, body: String::new() };
    assert!(expect_ok(ok).is_ok());

    let err = expect_ok(ApiResponse { status: 500, body: "{}".into() }).unwrap_err();
    assert!(matches!(err, ClientError::Status(500)));
}

#[test]
fn json_parse_failure_is_decode_error() {
    let resp = ApiResponse { status: 200, body: "<html>".into() };
    assert!(matches!(resp.json::<Value>(), Err(ClientError::Decode(_))));
}

// =============================================================
// ApiOutcome
// =============================================================

#[test]
fn string_error_is_rejected_verbatim() {
    assert_eq!(
        ApiOutcome::from_value(json!({"error": "bad input"})).unwrap(),
        ApiOutcome::Rejected("bad input".into())
    );
}

#[test]
fn falsy_error_values_are_accepted() {
    for error in [json!(null), json!(false), json!(0), json!("")] {
        let body = json!({"error": error, "message": "ok"});
        assert_eq!(ApiOutcome::from_value(body.clone()).unwrap(), ApiOutcome::Accepted(body));
    }
}

#[test]
fn non_string_truthy_error_uses_json_text() {
    assert_eq!(
        ApiOutcome::from_value(json!({"error": {"field": "email"}})).unwrap(),
        ApiOutcome::Rejected(r#"{"field":"email"}"#.into())
    );
    assert_eq!(ApiOutcome::from_value(json!({"error": 3})).unwrap(), ApiOutcome::Rejected("3".into()));
}

#[test]
fn body_without_error_is_accepted() {
    let body = json!({"message": "Comment submitted successfully!"});
    assert_eq!(ApiOutcome::from_value(body.clone()).unwrap(), ApiOutcome::Accepted(body));
}

#[test]
fn null_body_is_unexpected() {
    let err = ApiOutcome::from_value(json!(null)).unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedBody("null")));
    assert_eq!(err.to_string(), "unexpected response body: null");
}

#[test]
fn array_body_is_accepted() {
    assert_eq!(ApiOutcome::from_value(json!([1, 2])).unwrap(), ApiOutcome::Accepted(json!([1, 2])));
}

#[test]
fn truthiness_matches_javascript() {
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(-1)));
    assert!(is_truthy(&json!("0")));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
    assert!(!is_truthy(&json!(0.0)));
}
