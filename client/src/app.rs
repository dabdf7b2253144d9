//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_layout::ProtectedLayout;
use crate::net::api::{ApiClient, ApiConfig};
use crate::net::browser::BrowserTransport;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::state::auth::AuthMachine;
use crate::state::session::Session;
use crate::state::session_store::SessionStore;
use crate::util::storage::BrowserStorage;

/// Auth state machine wired to `fetch` and `localStorage`.
pub type BrowserAuth = AuthMachine<BrowserTransport, BrowserStorage>;

/// Build the browser session machine. Called once per page load.
pub fn browser_auth(config: ApiConfig) -> BrowserAuth {
    AuthMachine::new(ApiClient::new(BrowserTransport::new(config), SessionStore::new(BrowserStorage)))
}

/// Root application component.
///
/// Provides the auth machine and its session signal, restores the persisted
/// session, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = browser_auth(ApiConfig::default());
    let session = RwSignal::new(auth.session());

    #[cfg(feature = "csr")]
    {
        let mut updates = auth.subscribe();
        session.set(auth.initialize());
        leptos::task::spawn_local(async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                session.set(next);
            }
        });
    }

    provide_context(auth);
    provide_context::<RwSignal<Session>>(session);

    view! {
        <Title text="Staffdesk"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardRoute/>
            </Routes>
        </Router>
    }
}

#[component]
fn DashboardRoute() -> impl IntoView {
    view! {
        <ProtectedLayout>
            <DashboardPage/>
        </ProtectedLayout>
    }
}
