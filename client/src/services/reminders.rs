//! `/reminders` resource. Reminders are always scoped to the signed-in user
//! by the backend.

#[cfg(test)]
#[path = "reminders_test.rs"]
mod reminders_test;

use serde::Serialize;

use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpTransport;
use crate::net::types::{Ack, Page, Reminder, ReminderDraft};
use crate::util::storage::Storage;

const BASE: &str = "/reminders";

/// Look-ahead window the backend applies when `days` is omitted.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReminderQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
struct UpcomingQuery {
    days: u32,
}

fn item_path(id: i64) -> String {
    format!("{BASE}/{id}")
}

pub async fn list<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    query: &ReminderQuery,
) -> Result<Page<Reminder>, ApiError> {
    api.get_with_query(BASE, query).await
}

pub async fn get<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Reminder, ApiError> {
    api.get(&item_path(id)).await
}

pub async fn create<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    draft: &ReminderDraft,
) -> Result<Reminder, ApiError> {
    api.post(BASE, draft).await
}

pub async fn update<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    id: i64,
    draft: &ReminderDraft,
) -> Result<Reminder, ApiError> {
    api.put(&item_path(id), draft).await
}

pub async fn delete<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Ack, ApiError> {
    api.delete(&item_path(id)).await
}

/// Mark a reminder done.
pub async fn complete<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>, id: i64) -> Result<Reminder, ApiError> {
    api.patch_empty(&format!("{BASE}/{id}/complete")).await
}

/// Incomplete reminders due within the next `days` days.
pub async fn upcoming<T: HttpTransport, S: Storage>(
    api: &ApiClient<T, S>,
    days: u32,
) -> Result<Vec<Reminder>, ApiError> {
    api.get_with_query(&format!("{BASE}/upcoming"), &UpcomingQuery { days }).await
}

/// Incomplete reminders due today.
pub async fn today<T: HttpTransport, S: Storage>(api: &ApiClient<T, S>) -> Result<Vec<Reminder>, ApiError> {
    api.get(&format!("{BASE}/today")).await
}
