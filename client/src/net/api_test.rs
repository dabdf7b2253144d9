use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::net::mock::MockTransport;
use crate::state::session_store::{TOKEN_KEY, USER_KEY};
use crate::util::storage::MemoryStorage;

fn client(storage: MemoryStorage) -> (MockTransport, ApiClient<MockTransport, Arc<MemoryStorage>>) {
    let transport = MockTransport::new();
    let api = ApiClient::new(transport.clone(), SessionStore::new(Arc::new(storage)));
    (transport, api)
}

fn signed_in_storage() -> MemoryStorage {
    MemoryStorage::with_entries([(TOKEN_KEY, "abc"), (USER_KEY, "{}")])
}

#[test]
fn api_config_trims_trailing_slash() {
    assert_eq!(ApiConfig::new("http://localhost:8000/").base_url, "http://localhost:8000");
    assert_eq!(ApiConfig::default().base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn query_pairs_skips_nulls_and_renders_scalars() {
    #[derive(Serialize)]
    struct Filter {
        skip: Option<u64>,
        search: Option<String>,
        completed: Option<bool>,
        department_id: Option<i64>,
    }
    let mut pairs = query_pairs(&Filter {
        skip: Some(20),
        search: None,
        completed: Some(false),
        department_id: Some(3),
    })
    .expect("pairs");
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("completed".to_owned(), "false".to_owned()),
            ("department_id".to_owned(), "3".to_owned()),
            ("skip".to_owned(), "20".to_owned()),
        ]
    );
}

#[test]
fn query_pairs_rejects_non_objects() {
    assert!(matches!(query_pairs(&[1, 2]), Err(ApiError::Encode(_))));
}

#[test]
fn error_detail_reads_string_and_structured_details() {
    assert_eq!(error_detail(r#"{"detail":"Not found"}"#).as_deref(), Some("Not found"));
    assert_eq!(error_detail(r#"{"detail":[{"loc":["body"]}]}"#).as_deref(), Some(r#"[{"loc":["body"]}]"#));
    assert_eq!(error_detail("<html>"), None);
    assert_eq!(error_detail(r#"{"detail":null}"#), None);
}

#[test]
fn status_error_message_includes_detail_when_present() {
    let with = ApiError::Status { status: 404, detail: Some("Employee not found".to_owned()) };
    assert_eq!(with.to_string(), "backend returned 404: Employee not found");
    let without = ApiError::Status { status: 502, detail: None };
    assert_eq!(without.to_string(), "backend returned 502");
    assert!(!without.is_unauthorized());
    assert!(ApiError::Status { status: 401, detail: None }.is_unauthorized());
}

#[tokio::test]
async fn get_attaches_stored_bearer_token() {
    let (transport, api) = client(signed_in_storage());
    transport.reply_json(200, &json!({ "message": "ok" }));

    let ack: crate::net::types::Ack = api.get("/ping").await.expect("ack");
    assert_eq!(ack.message, "ok");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/ping");
    assert_eq!(request.bearer.as_deref(), Some("abc"));
}

#[tokio::test]
async fn requests_without_token_go_out_anonymous() {
    let (transport, api) = client(MemoryStorage::new());
    transport.reply(200, "[]");

    let items: Vec<serde_json::Value> = api.get("/departments").await.expect("items");
    assert!(items.is_empty());
    assert_eq!(transport.last_request().bearer, None);
}

#[tokio::test]
async fn post_sends_json_body() {
    let (transport, api) = client(signed_in_storage());
    transport.reply_json(201, &json!({ "message": "created" }));

    let _: crate::net::types::Ack = api.post("/things", &json!({ "name": "x" })).await.expect("ack");
    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body, Body::Json(json!({ "name": "x" })));
}

#[tokio::test]
async fn non_success_status_maps_to_status_error_with_detail() {
    let (transport, api) = client(signed_in_storage());
    transport.reply(403, r#"{"detail":"Not enough permissions"}"#);

    let err = api.get::<serde_json::Value>("/permissions").await.expect_err("forbidden");
    assert_eq!(err, ApiError::Status { status: 403, detail: Some("Not enough permissions".to_owned()) });
}

#[tokio::test]
async fn transport_failure_maps_to_transport_error() {
    let (transport, api) = client(signed_in_storage());
    transport.fail("connection refused");

    let err = api.get::<serde_json::Value>("/employees").await.expect_err("offline");
    assert_eq!(err, ApiError::Transport(TransportError("connection refused".to_owned())));
}

#[tokio::test]
async fn undecodable_body_maps_to_decode_error() {
    let (transport, api) = client(signed_in_storage());
    transport.reply(200, "not json");

    let err = api.get::<crate::net::types::Ack>("/ping").await.expect_err("decode");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn issue_token_posts_form_without_bearer() {
    let (transport, api) = client(signed_in_storage());
    transport.reply_json(200, &json!({ "access_token": "new", "token_type": "bearer" }));

    let response = api.issue_token("alice", "s3cret").await.expect("token");
    assert_eq!(response.access_token.as_deref(), Some("new"));

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, TOKEN_PATH);
    assert_eq!(request.bearer, None);
    assert_eq!(
        request.body,
        Body::Form(vec![
            ("username".to_owned(), "alice".to_owned()),
            ("password".to_owned(), "s3cret".to_owned()),
        ])
    );
}

#[tokio::test]
async fn current_user_uses_explicit_token() {
    let (transport, api) = client(MemoryStorage::new());
    transport.reply_json(
        200,
        &json!({
            "id": 1, "username": "alice", "department_id": null, "employee_id": null,
            "role": "staff", "is_active": true
        }),
    );

    let user = api.current_user("fresh").await.expect("user");
    assert_eq!(user.username, "alice");
    let request = transport.last_request();
    assert_eq!(request.path, CURRENT_USER_PATH);
    assert_eq!(request.bearer.as_deref(), Some("fresh"));
}
