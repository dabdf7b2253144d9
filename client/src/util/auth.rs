//! Route guard for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes render through `render` and redirect through a
//! `RouteGuard` subscribed to session transitions. Rendering never navigates;
//! navigation happens only when a transition is observed, and at most once
//! per entry into the signed-out state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::state::session::Session;

/// Sign-in route unauthenticated visitors are sent to.
pub const LOGIN_ROUTE: &str = "/login";

/// What a protected view shows for a given session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    /// Restoration or sign-in still running.
    Waiting,
    /// Signed out; the redirect is on its way, show nothing.
    Blank,
    Content,
}

/// Pure render decision for a protected view.
pub fn render(session: &Session) -> GuardView {
    if session.loading {
        GuardView::Waiting
    } else if session.user.is_some() {
        GuardView::Content
    } else {
        GuardView::Blank
    }
}

/// True when auth has settled and no user is present.
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading && session.user.is_none()
}

/// Issues navigation commands on behalf of the guard.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Detach switch held by the mounted view that owns a guard.
#[derive(Clone, Debug)]
pub struct GuardHandle {
    alive: Arc<AtomicBool>,
}

impl GuardHandle {
    /// Stop the guard; it will issue no further navigation.
    pub fn detach(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_attached(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Redirects to [`LOGIN_ROUTE`] once per transition into the signed-out state.
pub struct RouteGuard<N> {
    navigator: N,
    redirected: bool,
    alive: Arc<AtomicBool>,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator, redirected: false, alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn handle(&self) -> GuardHandle {
        GuardHandle { alive: Arc::clone(&self.alive) }
    }

    /// React to one observed session. Returns true when a redirect was issued.
    ///
    /// A present user re-arms the guard so a later logout redirects again.
    pub fn observe(&mut self, session: &Session) -> bool {
        if !self.alive.load(Ordering::Acquire) {
            return false;
        }
        if session.user.is_some() {
            self.redirected = false;
            return false;
        }
        if !should_redirect_unauth(session) || self.redirected {
            return false;
        }
        self.redirected = true;
        self.navigator.navigate(LOGIN_ROUTE);
        true
    }

    /// Follow `updates` until the machine goes away or the guard is detached.
    ///
    /// The current value is observed first, so mounting on an already
    /// signed-out session redirects immediately.
    pub async fn watch(mut self, mut updates: watch::Receiver<Session>) {
        let current = updates.borrow_and_update().clone();
        self.observe(&current);
        while updates.changed().await.is_ok() {
            if !self.alive.load(Ordering::Acquire) {
                break;
            }
            let next = updates.borrow_and_update().clone();
            self.observe(&next);
        }
    }
}
