use serde_json::json;

use super::*;
use crate::net::http::{Body, Method};
use crate::services::test_support::{TOKEN, page_json, query_value, reminder_json, signed_in_api};

#[tokio::test]
async fn list_decodes_page_with_filters() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &page_json(vec![reminder_json(1)]));

    let query = ReminderQuery { completed: Some(false), priority: Some("high".to_owned()), ..ReminderQuery::default() };
    let page = list(&api, &query).await.expect("page");
    assert_eq!(page.items[0].title, "Review rota");

    let request = transport.last_request();
    assert_eq!(request.path, "/reminders");
    assert_eq!(request.bearer.as_deref(), Some(TOKEN));
    assert_eq!(query_value(&request.query, "completed").as_deref(), Some("false"));
    assert_eq!(query_value(&request.query, "priority").as_deref(), Some("high"));
}

#[tokio::test]
async fn complete_patches_without_body() {
    let (transport, api) = signed_in_api();
    let mut done = reminder_json(3);
    done["is_completed"] = json!(true);
    transport.reply_json(200, &done);

    let reminder = complete(&api, 3).await.expect("complete");
    assert!(reminder.is_completed);

    let request = transport.last_request();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.path, "/reminders/3/complete");
    assert_eq!(request.body, Body::Empty);
}

#[tokio::test]
async fn upcoming_sends_days_window() {
    let (transport, api) = signed_in_api();
    transport.reply_json(200, &json!([reminder_json(1), reminder_json(2)]));

    let reminders = upcoming(&api, DEFAULT_UPCOMING_DAYS).await.expect("upcoming");
    assert_eq!(reminders.len(), 2);

    let request = transport.last_request();
    assert_eq!(request.path, "/reminders/upcoming");
    assert_eq!(query_value(&request.query, "days").as_deref(), Some("7"));
}

#[tokio::test]
async fn today_hits_today_route() {
    let (transport, api) = signed_in_api();
    transport.reply(200, "[]");

    assert!(today(&api).await.expect("today").is_empty());
    let request = transport.last_request();
    assert_eq!(request.path, "/reminders/today");
    assert!(request.query.is_empty());
}

#[tokio::test]
async fn crud_routes_target_expected_paths() {
    let (transport, api) = signed_in_api();
    transport
        .reply_json(201, &reminder_json(5))
        .reply_json(200, &reminder_json(5))
        .reply_json(200, &reminder_json(5))
        .reply_json(200, &json!({ "message": "Reminder deleted successfully" }));

    let draft = ReminderDraft {
        title: Some("Review rota".to_owned()),
        reminder_date: Some("2026-10-14T09:00:00".to_owned()),
        ..ReminderDraft::default()
    };
    create(&api, &draft).await.expect("create");
    get(&api, 5).await.expect("get");
    update(&api, 5, &ReminderDraft { priority: Some("low".to_owned()), ..ReminderDraft::default() })
        .await
        .expect("update");
    delete(&api, 5).await.expect("delete");

    let requests = transport.requests();
    assert_eq!(requests[0].body, Body::Json(json!({ "title": "Review rota", "reminder_date": "2026-10-14T09:00:00" })));
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/reminders", "/reminders/5", "/reminders/5", "/reminders/5"]);
}
