//! In-memory session snapshot published by the auth state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components read `Session` values from a
//! subscription; only the auth state machine produces them.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

/// Current user plus loading status.
///
/// `loading` is true only while restoring or while a login is in flight.
/// Once settled, `user` is either a complete record or absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
}

/// Coarse state-machine position derived from a `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl Session {
    /// State before the persisted bundle has been read.
    pub fn initializing() -> Self {
        Self { user: None, loading: true }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), loading: false }
    }

    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    pub fn status(&self) -> AuthStatus {
        match (&self.user, self.loading) {
            (_, true) => AuthStatus::Loading,
            (Some(_), false) => AuthStatus::Authenticated,
            (None, false) => AuthStatus::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn is_manager(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_manager)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}
