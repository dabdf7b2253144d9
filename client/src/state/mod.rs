//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the value components render from, `session_store` owns the
//! persisted credential bundle, `auth` is the state machine that moves
//! between them, and `roles` derives UI affordances from the user record.

pub mod auth;
pub mod roles;
pub mod session;
pub mod session_store;
