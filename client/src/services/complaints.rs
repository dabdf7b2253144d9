//! `/complaints` resource plus its workflow actions.
//!
//! Status, assignment, and privacy changes go through dedicated `PATCH`
//! routes so the backend can apply its own transition rules.

#[cfg(test)]
#[path = "complaints_test.rs"]
mod complaints_test;

use serde::Serialize;
use serde_json::json;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpTransport;
use crate::net::types::{Ack, Complaint, ComplaintDraft, ComplaintHandler};
use crate::util::storage::Storage;

const BASE: &str = "/complaints";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub severity: Option<String>,
    pub department_involved: Option<i64>,
}

fn item_path(id: i64) -> String {
    format!("{BASE}/{id}")
}

fn action_path(id: i64, action: &str) -> String {
    format!("{BASE}/{id}/{action}")
}

pub async fn list<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    query: &ComplaintQuery,
) -> Result<Vec<Complaint>, ApiError> {
    api.get_with_query(BASE, query).await
}

pub async fn get<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Complaint, ApiError> {
    api.get(&item_path(id)).await
}

pub async fn create<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    draft: &ComplaintDraft,
) -> Result<Complaint, ApiError> {
    api.post(BASE, draft).await
}

pub async fn update<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    draft: &ComplaintDraft,
) -> Result<Complaint, ApiError> {
    api.put(&item_path(id), draft).await
}

pub async fn delete<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Ack, ApiError> {
    api.delete(&item_path(id)).await
}

pub async fn update_status<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    status: &str,
) -> Result<Complaint, ApiError> {
    api.patch(&action_path(id, "status"), &json!({ "status": status })).await
}

/// Hand the complaint to `user_id`.
pub async fn assign<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    user_id: i64,
) -> Result<Complaint, ApiError> {
    api.patch(&action_path(id, "assign"), &json!({ "assigned_to": user_id })).await
}

pub async fn set_privacy<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    is_private: bool,
) -> Result<Complaint, ApiError> {
    api.patch(&action_path(id, "privacy"), &json!({ "is_private": is_private })).await
}

/// Complaints involving one department.
pub async fn by_department<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    department_id: i64,
) -> Result<Vec<Complaint>, ApiError> {
    api.get(&format!("{BASE}/department/{department_id}")).await
}

/// Users who may be assigned a department's complaints.
pub async fn department_handlers<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    department_id: i64,
) -> Result<Vec<ComplaintHandler>, ApiError> {
    api.get(&format!("{BASE}/department-handlers/{department_id}")).await
}
