//! User records.
//!
//! A user is both a ledger party (its `balance` is mutated only by the
//! ledger engine) and, when registered through the credential flow, a
//! login identity. Users are never deleted, only deactivated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Money;

/// Domain suffix appended to generated user identifiers.
pub const USER_ID_SUFFIX: &str = "@wirepay";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub balance: Money,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl User {
    /// Creates a profile user (no credential), id derived from the first
    /// name: `alice` becomes `alice@wirepay`.
    #[must_use]
    pub fn new_profile(first_name: &str, last_name: &str, balance: Money) -> Self {
        Self {
            id: format!("{}{USER_ID_SUFFIX}", first_name.to_lowercase()),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: None,
            password: None,
            balance,
            created_at: Utc::now(),
            active: true,
        }
    }

    /// Creates a registered user carrying a login credential. Registered
    /// users start with a zero balance.
    #[must_use]
    pub fn new_registered(name: &str, email: &str, password: &str) -> Self {
        Self {
            id: format!("{}{USER_ID_SUFFIX}", name.to_lowercase().replace(' ', ".")),
            first_name: name.to_string(),
            last_name: String::new(),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            balance: Money::ZERO,
            created_at: Utc::now(),
            active: true,
        }
    }

    /// Composed display name, as shown in the contacts view.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}
