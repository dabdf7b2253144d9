//! Typed wrappers over the backend's resource routes.
//!
//! ARCHITECTURE
//! ============
//! One module per resource. Each function builds a path, hands it to the
//! shared `ApiClient` (which attaches the bearer token), and returns the
//! decoded body. Failures propagate unchanged; retry policy is the caller's.

pub mod complaints;
pub mod departments;
pub mod employees;
pub mod permissions;
pub mod reminders;

#[cfg(test)]
#[path = "test_support.rs"]
mod test_support;
