//! Route-level screens.
//!
//! `login` is public; `dashboard` renders inside `ProtectedLayout`.

pub mod dashboard;
pub mod login;
