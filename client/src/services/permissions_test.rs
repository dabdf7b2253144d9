use serde_json::json;

use super::*;
use crate::net::http::{Body, Method};
use crate::services::test_support::{TOKEN, permission_json, signed_in_api};

#[tokio::test]
async fn list_returns_permissions() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &json!([permission_json(1)]));

    let permissions = list(&api).await.expect("list");
    assert_eq!(permissions[0].category, "operations");

    let request = transport.last_request();
    assert_eq!(request.path, "/permissions");
    assert_eq!(request.bearer.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn roles_decodes_grant_matrix() {
    let (transport, api) = signed_in_api();
    transport.reply_json(
        200,
        &json!({
            "roles": {
                "staff": [{
                    "permission_id": 1,
                    "permission_name": "complaints",
                    "can_view": true,
                    "can_create": true,
                    "can_edit": false,
                    "can_delete": false
                }],
                "manager": []
            }
        }),
    );

    let matrix = roles(&api).await.expect("roles");
    assert!(matrix.grants("staff")[0].can_create);
    assert!(matrix.grants("manager").is_empty());
    assert_eq!(transport.last_request().path, "/permissions/roles");
}

#[tokio::test]
async fn crud_routes_target_expected_paths() {
    let (transport, api) = signed_in_api();
    transport
        .reply_json(201, &permission_json(2))
        .reply_json(200, &permission_json(2))
        .reply_json(200, &permission_json(2))
        .reply_json(200, &json!({ "message": "Permission deleted successfully" }));

    let draft = PermissionDraft { permission_name: Some("complaints".to_owned()), ..PermissionDraft::default() };
    create(&api, &draft).await.expect("create");
    get(&api, 2).await.expect("get");
    update(&api, 2, &PermissionDraft { description: Some("Triage".to_owned()), ..PermissionDraft::default() })
        .await
        .expect("update");
    delete(&api, 2).await.expect("delete");

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].body, Body::Json(json!({ "permission_name": "complaints" })));
    assert_eq!(requests[2].path, "/permissions/2");
    assert_eq!(requests[3].method, Method::Delete);
}

#[tokio::test]
async fn non_admin_is_rejected() {
    let (transport, api) = signed_in_api();
    transport.reply(403, r#"{"detail":"Not enough permissions"}"#);

    let err = create(&api, &PermissionDraft::default()).await.expect_err("forbidden");
    assert_eq!(err, ApiError::Status { status: 403, detail: Some("Not enough permissions".to_owned()) });
}
