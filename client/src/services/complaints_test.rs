use serde_json::json;

use super::*;
use crate::net::http::{Body, Method};
use crate::services::test_support::{TOKEN, complaint_json, query_value, signed_in_api};

#[tokio::test]
async fn list_filters_by_status_and_department() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &json!([complaint_json(1, "open")]));

    let query = ComplaintQuery {
        status: Some("open".to_owned()),
        department_involved: Some(1),
        ..ComplaintQuery::default()
    };
    let complaints = list(&api, &query).await.expect("list");
    assert_eq!(complaints[0].severity, "high");

    let request = transport.last_request();
    assert_eq!(request.path, "/complaints");
    assert_eq!(request.bearer.as_deref(), Some(TOKEN));
    assert_eq!(query_value(&request.query, "status").as_deref(), Some("open"));
    assert_eq!(query_value(&request.query, "department_involved").as_deref(), Some("1"));
}

#[tokio::test]
async fn update_status_patches_status_route() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &complaint_json(2, "resolved"));

    let complaint = update_status(&api, 2, "resolved").await.expect("status");
    assert_eq!(complaint.status, "resolved");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.path, "/complaints/2/status");
    assert_eq!(request.body, Body::Json(json!({ "status": "resolved" })));
}

#[tokio::test]
async fn assign_and_privacy_use_action_routes() {
    let (transport, api) = signed_in_api();
    transport
        .reply_json(200, &complaint_json(2, "in_progress"))
        .reply_json(200, &complaint_json(2, "in_progress"));

    assign(&api, 2, 8).await.expect("assign");
    set_privacy(&api, 2, true).await.expect("privacy");

    let requests = transport.requests();
    assert_eq!(requests[0].path, "/complaints/2/assign");
    assert_eq!(requests[0].body, Body::Json(json!({ "assigned_to": 8 })));
    assert_eq!(requests[1].path, "/complaints/2/privacy");
    assert_eq!(requests[1].body, Body::Json(json!({ "is_private": true })));
}

#[tokio::test]
async fn department_views_use_department_routes() {
    let (transport, api) = signed_in_api();
    transport
        .reply_json(200, &json!([complaint_json(3, "open")]))
        .reply_json(200, &json!([{ "id": 8, "username": "carol", "role": "manager" }]));

    let complaints = by_department(&api, 1).await.expect("by department");
    assert_eq!(complaints.len(), 1);
    let handlers = department_handlers(&api, 1).await.expect("handlers");
    assert_eq!(handlers[0].username, "carol");
    assert_eq!(handlers[0].employee_id, None);

    let requests = transport.requests();
    assert_eq!(requests[0].path, "/complaints/department/1");
    assert_eq!(requests[1].path, "/complaints/department-handlers/1");
}

#[tokio::test]
async fn create_update_delete_round_out_the_resource() {
    let (transport, api) = signed_in_api();
    transport
        .reply_json(201, &complaint_json(4, "open"))
        .reply_json(200, &complaint_json(4, "open"))
        .reply_json(200, &complaint_json(4, "open"))
        .reply_json(200, &json!({ "message": "Complaint deleted successfully" }));

    let draft = ComplaintDraft {
        complaint_type: Some("service".to_owned()),
        description: Some("late delivery".to_owned()),
        ..ComplaintDraft::default()
    };
    create(&api, &draft).await.expect("create");
    get(&api, 4).await.expect("get");
    update(&api, 4, &ComplaintDraft { resolution: Some("refunded".to_owned()), ..ComplaintDraft::default() })
        .await
        .expect("update");
    delete(&api, 4).await.expect("delete");

    let methods: Vec<Method> = transport.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::Post, Method::Get, Method::Put, Method::Delete]);
}

#[tokio::test]
async fn forbidden_assignment_is_reported() {
    let (transport, api) = signed_in_api();
    transport.reply(403, r#"{"detail":"Only managers can assign complaints"}"#);

    let err = assign(&api, 2, 8).await.expect_err("forbidden");
    assert_eq!(err.status(), Some(403));
}
