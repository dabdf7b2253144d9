//! `/employees` resource.

#[cfg(test)]
#[path = "employees_test.rs"]
mod employees_test;

use serde::Serialize;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpTransport;
use crate::net::types::{Ack, Employee, EmployeeDraft, Page};
use crate::util::storage::Storage;

const BASE: &str = "/employees";

/// Filters and paging for the employee list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub department_id: Option<i64>,
    pub status: Option<String>,
    pub position: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    /// Matches first/last name, email, or staff number.
    pub search: Option<String>,
}

fn item_path(id: i64) -> String {
    format!("{BASE}/{id}")
}

pub async fn list<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    query: &EmployeeQuery,
) -> Result<Page<Employee>, ApiError> {
    api.get_with_query(BASE, query).await
}

pub async fn get<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Employee, ApiError> {
    api.get(&item_path(id)).await
}

pub async fn create<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    draft: &EmployeeDraft,
) -> Result<Employee, ApiError> {
    api.post(BASE, draft).await
}

pub async fn update<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    draft: &EmployeeDraft,
) -> Result<Employee, ApiError> {
    api.put(&item_path(id), draft).await
}

pub async fn delete<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Ack, ApiError> {
    api.delete(&item_path(id)).await
}
