//! Auth state machine for the current dashboard user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The machine is the only writer
//! of the in-memory `Session` and the only caller of the token endpoint.
//!
//! STATES
//! ======
//! `Initializing -> {Authenticated, Unauthenticated}`, then login/logout
//! move between the two settled states. A failed login changes nothing.
//!
//! CONCURRENCY
//! ===========
//! At most one login is in flight; a second attempt fails with `Busy`.
//! Logout bumps a generation counter so a login that completes afterwards
//! discards its result instead of writing a stale token. Completion also
//! checks liveness, so a login that resolves after `shutdown` is a no-op.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;

use super::session::{AuthStatus, Session};
use crate::net::api::{ApiClient, ApiError};
use crate::net::http::HttpTransport;
use crate::net::types::{SessionBundle, User};
use crate::util::storage::{Storage, StorageError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("token response did not include an access token")]
    MissingToken,
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
    #[error("a sign-in is already in progress")]
    Busy,
    #[error("sign-in was superseded by a logout")]
    Superseded,
    #[error("session has been shut down")]
    ShutDown,
}

struct Inner<T, S> {
    api: ApiClient<T, S>,
    state: watch::Sender<Session>,
    initialized: AtomicBool,
    in_flight: AtomicBool,
    generation: AtomicU64,
    alive: AtomicBool,
}

/// Shared handle to the session state machine.
///
/// Clones share one machine; inject it wherever the session is needed.
pub struct AuthMachine<T, S> {
    inner: Arc<Inner<T, S>>,
}

impl<T, S> Clone for AuthMachine<T, S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: HttpTransport, S: Storage> AuthMachine<T, S> {
    /// Build a machine in the `Initializing` state.
    pub fn new(api: ApiClient<T, S>) -> Self {
        let (state, _) = watch::channel(Session::initializing());
        Self {
            inner: Arc::new(Inner {
                api,
                state,
                initialized: AtomicBool::new(false),
                in_flight: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                alive: AtomicBool::new(true),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient<T, S> {
        &self.inner.api
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> AuthStatus {
        self.inner.state.borrow().status()
    }

    /// Receive every session transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn is_manager(&self) -> bool {
        self.inner.state.borrow().is_manager()
    }

    pub fn is_admin(&self) -> bool {
        self.inner.state.borrow().is_admin()
    }

    /// Restore the session from the persisted bundle.
    ///
    /// Runs once; later calls return the current session unchanged. A
    /// malformed bundle is cleared and treated as signed out. While a login
    /// is in flight this returns the current session and the login settles
    /// the machine.
    pub fn initialize(&self) -> Session {
        if self.inner.in_flight.load(Ordering::Acquire) {
            return self.session();
        }
        if self.inner.initialized.swap(true, Ordering::AcqRel) {
            return self.session();
        }
        let next = match self.inner.api.store().read() {
            Ok(Some(persisted)) => {
                tracing::info!(username = %persisted.bundle.user.username, "session restored");
                Session::signed_in(persisted.bundle.user)
            }
            Ok(None) => Session::signed_out(),
            Err(reason) => {
                tracing::warn!(%reason, "discarding malformed persisted session");
                if let Err(e) = self.inner.api.store().clear() {
                    tracing::warn!(error = %e, "could not clear malformed session");
                }
                Session::signed_out()
            }
        };
        self.publish(next.clone());
        next
    }

    /// Exchange credentials for a session.
    ///
    /// On success the token and bundle are persisted together and the
    /// machine becomes `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on any failure; state and storage are then
    /// exactly as they were before the call.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        if !self.inner.alive.load(Ordering::Acquire) {
            return Err(AuthError::ShutDown);
        }
        if self.inner.in_flight.swap(true, Ordering::AcqRel) {
            return Err(AuthError::Busy);
        }
        let mut attempt = LoginAttempt {
            inner: &self.inner,
            prior: self.session(),
            generation: self.inner.generation.load(Ordering::Acquire),
            settled: false,
        };
        self.inner.state.send_modify(|s| s.loading = true);

        let result = self.complete_login(&attempt, username, password).await;
        match &result {
            Ok(user) => {
                attempt.settled = true;
                tracing::info!(username = %user.username, "signed in");
            }
            Err(e) => tracing::warn!(error = %e, "sign-in failed"),
        }
        result
    }

    async fn complete_login(
        &self,
        attempt: &LoginAttempt<'_, T, S>,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let api = &self.inner.api;
        let response = api.issue_token(username, password).await?;
        attempt.check_current()?;

        let token = response
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;
        let user = match response.user {
            Some(user) => user,
            None => {
                let user = api.current_user(&token).await?;
                attempt.check_current()?;
                user
            }
        };

        let bundle = SessionBundle { user, employee: response.employee, department: response.department };
        api.store().write(&token, &bundle)?;
        self.inner.initialized.store(true, Ordering::Release);
        self.publish(Session::signed_in(bundle.user.clone()));
        Ok(bundle.user)
    }

    /// Clear the persisted bundle and become `Unauthenticated`.
    ///
    /// Idempotent. A login still in flight is superseded.
    pub fn logout(&self) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.initialized.store(true, Ordering::Release);
        if let Err(e) = self.inner.api.store().clear() {
            tracing::warn!(error = %e, "could not clear persisted session");
        }
        let was_signed_in = self.inner.state.borrow().is_authenticated();
        self.publish(Session::signed_out());
        if was_signed_in {
            tracing::info!("signed out");
        }
    }

    /// End the machine's lifecycle. In-flight logins discard their results.
    pub fn shutdown(&self) {
        self.inner.alive.store(false, Ordering::Release);
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
    }

    fn publish(&self, next: Session) {
        self.inner.state.send_replace(next);
    }
}

/// Bookkeeping for one in-flight login.
///
/// Dropping it releases the in-flight slot. If the login did not settle
/// (failure or cancellation) and nothing superseded it, the prior session is
/// restored so `loading` never sticks.
struct LoginAttempt<'a, T, S> {
    inner: &'a Inner<T, S>,
    prior: Session,
    generation: u64,
    settled: bool,
}

impl<T, S> LoginAttempt<'_, T, S> {
    fn check_current(&self) -> Result<(), AuthError> {
        if !self.inner.alive.load(Ordering::Acquire) {
            return Err(AuthError::ShutDown);
        }
        if self.inner.generation.load(Ordering::Acquire) != self.generation {
            return Err(AuthError::Superseded);
        }
        Ok(())
    }
}

impl<T, S> Drop for LoginAttempt<'_, T, S> {
    fn drop(&mut self) {
        if !self.settled && self.check_current().is_ok() {
            self.inner.state.send_replace(std::mem::replace(&mut self.prior, Session::signed_out()));
        }
        self.inner.in_flight.store(false, Ordering::Release);
    }
}
