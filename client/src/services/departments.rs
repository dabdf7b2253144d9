//! `/departments` resource.

#[cfg(test)]
#[path = "departments_test.rs"]
mod departments_test;

use serde::Serialize;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpTransport;
use crate::net::types::{Ack, Department, DepartmentDraft};
use crate::util::storage::Storage;

const BASE: &str = "/departments";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DepartmentQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

fn item_path(id: i64) -> String {
    format!("{BASE}/{id}")
}

pub async fn list<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    query: &DepartmentQuery,
) -> Result<Vec<Department>, ApiError> {
    api.get_with_query(BASE, query).await
}

pub async fn get<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Department, ApiError> {
    api.get(&item_path(id)).await
}

pub async fn create<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    draft: &DepartmentDraft,
) -> Result<Department, ApiError> {
    api.post(BASE, draft).await
}

pub async fn update<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    draft: &DepartmentDraft,
) -> Result<Department, ApiError> {
    api.put(&item_path(id), draft).await
}

pub async fn delete<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Ack, ApiError> {
    api.delete(&item_path(id)).await
}
