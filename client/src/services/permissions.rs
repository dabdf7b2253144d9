//! `/permissions` resource and the role grant matrix.

#[cfg(test)]
#[path = "permissions_test.rs"]
mod permissions_test;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpTransport;
use crate::net::types::{Ack, Permission, PermissionDraft, RolesPermissions};
use crate::util::storage::Storage;

const BASE: &str = "/permissions";

fn item_path(id: i64) -> String {
    format!("{BASE}/{id}")
}

pub async fn list<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>) -> Result<Vec<Permission>, ApiError> {
    api.get(BASE).await
}

pub async fn get<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Permission, ApiError> {
    api.get(&item_path(id)).await
}

pub async fn create<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    draft: &PermissionDraft,
) -> Result<Permission, ApiError> {
    api.post(BASE, draft).await
}

pub async fn update<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    draft: &PermissionDraft,
) -> Result<Permission, ApiError> {
    api.put(&item_path(id), draft).await
}

pub async fn delete<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Ack, ApiError> {
    api.delete(&item_path(id)).await
}

/// Every role with its permission grants.
pub async fn roles<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>) -> Result<RolesPermissions, ApiError> {
    api.get(&format!("{BASE}/roles")).await
}
