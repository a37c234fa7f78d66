//! Capability gate for management operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Account;

/// Capability a protected operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    /// Restricted to administrator accounts
    AdminOnly,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::AdminOnly => write!(f, "ADMIN_ONLY"),
        }
    }
}

/// Decides whether an identity holds a capability.
///
/// Only reads `is_admin`; provisioning happens elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGate;

impl RoleGate {
    pub fn new() -> Self {
        Self
    }

    /// `false` for a missing identity; never fails.
    pub fn authorize(&self, account: Option<&Account>, required: Capability) -> bool {
        match (account, required) {
            (Some(account), Capability::AdminOnly) => account.is_admin,
            (None, _) => false,
        }
    }
}
