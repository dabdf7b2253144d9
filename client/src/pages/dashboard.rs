//! Dashboard landing page for signed-in users.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered inside `ProtectedLayout`, so a user is present whenever this
//! mounts. Shows identity, role affordances and today's reminders, and owns
//! the logout button.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::types::{Reminder, User};
use crate::state::session::Session;

/// Role badge text. Inactive accounts are flagged instead of labeled.
fn role_label(user: &User) -> String {
    if user.is_active {
        user.role_kind().label().to_owned()
    } else {
        format!("{} (inactive)", user.role_kind().label())
    }
}

/// Header greeting for `user`.
fn greeting(user: &User) -> String {
    format!("Welcome, {}", user.username)
}

/// Pending reminders first, preserving server order within each group.
fn pending_first(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders.sort_by_key(|r| r.is_completed);
    reminders
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let reminders = RwSignal::new(Vec::<Reminder>::new());
    let reminders_error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    let auth = expect_context::<crate::app::BrowserAuth>();

    #[cfg(feature = "csr")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            let result = crate::services::reminders::today(auth.api()).await;
            if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                return;
            }
            match result {
                Ok(items) => reminders.set(pending_first(items)),
                Err(e) => {
                    tracing::warn!(error = %e, "loading today's reminders failed");
                    reminders_error.set(Some(e.to_string()));
                }
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        auth.logout();
    };

    let user = move || session.get().user;

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>{move || user().map(|u| greeting(&u)).unwrap_or_default()}</h1>
                <span class="dashboard__role">{move || user().map(|u| role_label(&u)).unwrap_or_default()}</span>
                <Show when=move || session.get().is_manager()>
                    <span class="dashboard__badge">"Manager tools"</span>
                </Show>
                <button class="dashboard__logout" on:click=on_logout>
                    "Sign Out"
                </button>
            </header>

            <section class="dashboard__reminders">
                <h2>"Today"</h2>
                {move || match reminders_error.get() {
                    Some(message) => view! { <p class="dashboard__error">{message}</p> }.into_any(),
                    None if reminders.get().is_empty() => {
                        view! { <p class="dashboard__empty">"Nothing due today."</p> }.into_any()
                    }
                    None => view! {
                        <ul class="reminder-list">
                            <For
                                each=move || reminders.get()
                                key=|r| r.id
                                children=move |r| {
                                    let class = if r.is_completed { "reminder reminder--done" } else { "reminder" };
                                    view! {
                                        <li class=class>
                                            <span class="reminder__title">{r.title}</span>
                                            <span class="reminder__priority">{r.priority}</span>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    }
                    .into_any(),
                }}
            </section>
        </div>
    }
}
