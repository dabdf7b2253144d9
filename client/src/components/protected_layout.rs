//! Layout shell for authenticated routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every protected page. Rendering follows `util::auth::render`; the
//! redirect to `/login` comes from a `RouteGuard` subscribed to the auth
//! machine, so a stale render never navigates.

use leptos::prelude::*;

use crate::state::session::Session;
use crate::util::auth::{GuardView, render};

#[component]
pub fn ProtectedLayout(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    #[cfg(feature = "csr")]
    {
        use leptos_router::NavigateOptions;
        use leptos_router::hooks::use_navigate;

        use crate::app::BrowserAuth;
        use crate::util::auth::RouteGuard;

        let auth = expect_context::<BrowserAuth>();
        let navigate = use_navigate();
        let guard = RouteGuard::new(move |path: &str| navigate(path, NavigateOptions::default()));
        let handle = guard.handle();
        leptos::task::spawn_local(guard.watch(auth.subscribe()));
        on_cleanup(move || handle.detach());
    }

    view! {
        <div class="layout">
            {move || match render(&session.get()) {
                GuardView::Waiting => view! { <div class="layout__loading">"Loading..."</div> }.into_any(),
                GuardView::Blank => ().into_any(),
                GuardView::Content => children().into_any(),
            }}
        </div>
    }
}
