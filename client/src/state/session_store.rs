//! Persisted credential bundle: bearer token plus cached identity snapshot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bundle lives under two fixed storage keys and is the only session
//! source of truth across reloads. It is written on login, cleared on logout,
//! and read once when the auth state machine initializes.
//!
//! ERROR HANDLING
//! ==============
//! `read` never panics on bad data: anything that is not a complete bundle
//! comes back as `MalformedSession` for the caller to degrade on.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use crate::net::types::SessionBundle;
use crate::util::storage::{Storage, StorageError};

/// Storage key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON `{user, employee, department}` bundle.
pub const USER_KEY: &str = "user";

/// A complete bundle read back from storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedSession {
    pub token: String,
    pub bundle: SessionBundle,
}

/// Why the stored bundle could not be used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedSession {
    #[error("token stored without a user bundle")]
    TokenWithoutUser,
    #[error("user bundle stored without a token")]
    UserWithoutToken,
    #[error("stored token is empty")]
    EmptyToken,
    #[error("user bundle is not valid: {0}")]
    InvalidBundle(String),
    #[error("storage could not be read: {0}")]
    Unreadable(StorageError),
}

/// Typed access to the two persisted keys.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the bundle. `Ok(None)` when neither key is present.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSession`] for half-written, empty, or undecodable bundles.
    pub fn read(&self) -> Result<Option<PersistedSession>, MalformedSession> {
        let token = self.storage.get(TOKEN_KEY).map_err(MalformedSession::Unreadable)?;
        let raw = self.storage.get(USER_KEY).map_err(MalformedSession::Unreadable)?;
        match (token, raw) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(MalformedSession::TokenWithoutUser),
            (None, Some(_)) => Err(MalformedSession::UserWithoutToken),
            (Some(token), Some(raw)) => {
                if token.trim().is_empty() {
                    return Err(MalformedSession::EmptyToken);
                }
                let bundle = decode_bundle(&raw)?;
                Ok(Some(PersistedSession { token, bundle }))
            }
        }
    }

    /// Current bearer token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when storage cannot be read.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.storage.get(TOKEN_KEY)?.filter(|t| !t.trim().is_empty()))
    }

    /// Persist token and bundle together.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when either key cannot be written; neither key
    /// changes in that case.
    pub fn write(&self, token: &str, bundle: &SessionBundle) -> Result<(), StorageError> {
        let raw = encode_bundle(bundle)?;
        self.storage.set_all(&[(TOKEN_KEY, token), (USER_KEY, raw.as_str())])
    }

    /// Remove both keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend rejects the removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_all(&[TOKEN_KEY, USER_KEY])
    }
}

fn decode_bundle(raw: &str) -> Result<SessionBundle, MalformedSession> {
    serde_json::from_str(raw).map_err(|e| MalformedSession::InvalidBundle(e.to_string()))
}

fn encode_bundle(bundle: &SessionBundle) -> Result<String, StorageError> {
    serde_json::to_string(bundle)
        .map_err(|e| StorageError::Write { key: USER_KEY.to_owned(), message: e.to_string() })
}
