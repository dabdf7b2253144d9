//! Helpers shared across client modules.
//!
//! `auth` holds the route guard for protected views and `storage` the
//! key/value backends the session store writes through.

pub mod auth;
pub mod storage;
