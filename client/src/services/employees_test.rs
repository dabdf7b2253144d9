use serde_json::json;

use super::*;
use crate::net::http::{Body, Method};
use crate::services::test_support::{TOKEN, employee_json, page_json, query_value, signed_in_api};

#[tokio::test]
async fn list_sends_filters_and_decodes_page() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &page_json(vec![employee_json(1), employee_json(2)]));

    let query = EmployeeQuery {
        department_id: Some(1),
        search: Some("ada".to_owned()),
        limit: Some(20),
        ..EmployeeQuery::default()
    };
    let page = list(&api, &query).await.expect("page");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].full_name(), "Ada Lovelace");
    assert_eq!(page.pagination.total, 2);

    let request = transport.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/employees");
    assert_eq!(request.bearer.as_deref(), Some(TOKEN));
    assert_eq!(query_value(&request.query, "department_id").as_deref(), Some("1"));
    assert_eq!(query_value(&request.query, "search").as_deref(), Some("ada"));
    assert_eq!(query_value(&request.query, "status"), None);
}

#[tokio::test]
async fn get_targets_item_path() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &employee_json(5));

    let employee = get(&api, 5).await.expect("employee");
    assert_eq!(employee.employee_id, "E-005");
    assert_eq!(transport.last_request().path, "/employees/5");
}

#[tokio::test]
async fn create_posts_only_set_fields() {
    let (transport, api) = signed_in_api();
    transport.reply_json(201, &employee_json(7));

    let draft = EmployeeDraft {
        employee_id: Some("E-007".to_owned()),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        ..EmployeeDraft::default()
    };
    create(&api, &draft).await.expect("created");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/employees");
    assert_eq!(
        request.body,
        Body::Json(json!({ "employee_id": "E-007", "first_name": "Ada", "last_name": "Lovelace" }))
    );
}

#[tokio::test]
async fn update_puts_item() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &employee_json(7));

    let draft = EmployeeDraft { position: Some("Lead".to_owned()), ..EmployeeDraft::default() };
    update(&api, 7, &draft).await.expect("updated");

    let request = transport.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/employees/7");
    assert_eq!(request.body, Body::Json(json!({ "position": "Lead" })));
}

#[tokio::test]
async fn delete_returns_ack() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &json!({ "message": "Employee deleted successfully" }));

    let ack = delete(&api, 7).await.expect("deleted");
    assert_eq!(ack.message, "Employee deleted successfully");
    assert_eq!(transport.last_request().method, Method::Delete);
}

#[tokio::test]
async fn missing_employee_surfaces_status_detail() {
    let (transport, api) = signed_in_api();
    transport.reply(404, r#"{"detail":"Employee not found"}"#);

    let err = get(&api, 99).await.expect_err("missing");
    assert_eq!(err, ApiError::Status { status: 404, detail: Some("Employee not found".to_owned()) });
}
