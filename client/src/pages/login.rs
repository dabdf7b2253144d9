//! Login page with username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::auth::AuthError;

const MISSING_CREDENTIALS: &str = "Enter both username and password.";

/// Trim the username and require both fields. The password is kept verbatim.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Message shown under the form when sign-in fails.
fn login_failure_message(error: &AuthError) -> String {
    match error {
        AuthError::Api(api) if api.is_unauthorized() => "Incorrect username or password.".to_owned(),
        AuthError::Busy => "A sign-in is already in progress.".to_owned(),
        other => format!("Sign-in failed: {other}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let auth = expect_context::<crate::app::BrowserAuth>();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();
    #[cfg(feature = "csr")]
    let mounted = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
    #[cfg(feature = "csr")]
    {
        let mounted = mounted.clone();
        on_cleanup(move || mounted.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (username_value, password_value) = match validate_login_input(&username.get(), &password.get()) {
            Ok(pair) => pair,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let auth = auth.clone();
            let navigate = navigate.clone();
            let mounted = mounted.clone();
            leptos::task::spawn_local(async move {
                let result = auth.login(&username_value, &password_value).await;
                if !mounted.load(std::sync::atomic::Ordering::Relaxed) {
                    return;
                }
                busy.set(false);
                match result {
                    Ok(_) => {
                        password.set(String::new());
                        info.set(String::new());
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => info.set(login_failure_message(&e)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (username_value, password_value);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Staffdesk"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
