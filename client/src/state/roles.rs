//! Role-derived UI affordances.
//!
//! Flags are recomputed from the `User` on every read and never cached next
//! to the session. Inactive accounts get no elevated flags.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

use crate::net::types::User;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Staff,
    /// Any role string the dashboard does not recognize.
    Other,
}

impl Role {
    /// Parse a backend role string, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "manager" => Self::Manager,
            "staff" => Self::Staff,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
            Self::Other => "Member",
        }
    }
}

impl User {
    pub fn role_kind(&self) -> Role {
        Role::parse(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.is_active && self.role_kind() == Role::Admin
    }

    /// Manager-level affordances: managers and admins, active accounts only.
    pub fn is_manager(&self) -> bool {
        self.is_active && matches!(self.role_kind(), Role::Manager | Role::Admin)
    }

    pub fn is_staff(&self) -> bool {
        self.is_active && self.role_kind() == Role::Staff
    }
}
