//! Shared UI components.

pub mod protected_layout;
