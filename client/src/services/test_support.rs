//! Shared fixtures for resource tests.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::net::api::ApiClient;
use crate::net::mock::MockTransport;
use crate::state::session_store::{SessionStore, TOKEN_KEY, USER_KEY};
use crate::util::storage::MemoryStorage;

pub(crate) const TOKEN: &str = "tok-123";

pub(crate) type TestApi = ApiClient<MockTransport, Arc<MemoryStorage>>;

/// Client with a stored bearer token and a fresh scripted transport.
pub(crate) fn signed_in_api() -> (MockTransport, TestApi) {
    let transport = MockTransport::new();
    let storage = Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, TOKEN), (USER_KEY, "{}")]));
    (transport.clone(), ApiClient::new(transport, SessionStore::new(storage)))
}

pub(crate) fn query_value(query: &[(String, String)], key: &str) -> Option<String> {
    query.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

pub(crate) fn employee_json(id: i64) -> Value {
    json!({
        "id": id,
        "employee_id": format!("E-{id:03}"),
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "phone": null,
        "department_id": 1,
        "position": "Engineer",
        "status": "active",
        "hire_date": "2024-01-15"
    })
}

pub(crate) fn department_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Support",
        "department_code": "SUP",
        "description": null,
        "manager_id": 4,
        "is_active": true
    })
}

pub(crate) fn complaint_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "customer_name": "Bob",
        "customer_email": null,
        "customer_phone": null,
        "complaint_type": "service",
        "description": "late delivery",
        "department_involved": 1,
        "severity": "high",
        "status": status,
        "resolution": null,
        "is_private": false,
        "reported_by": 2,
        "assigned_to": null
    })
}

pub(crate) fn reminder_json(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "title": "Review rota",
        "description": null,
        "reminder_date": "2026-10-14T09:00:00",
        "priority": "high",
        "is_completed": false,
        "repeat_type": null
    })
}

pub(crate) fn permission_json(id: i64) -> Value {
    json!({
        "id": id,
        "permission_name": "complaints",
        "description": "Handle customer complaints",
        "category": "operations"
    })
}

pub(crate) fn page_json(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "pagination": { "total": total, "limit": 20, "offset": 0, "has_more": false },
        "sort": { "field": "id", "order": "asc" }
    })
}
