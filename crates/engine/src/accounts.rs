//! Bank account records.
//!
//! An account balance and its owning user's balance are separate
//! ledgers; only account creation couples them (the owner's user
//! balance is overwritten with the account's opening balance).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub account_number: String,
    pub bank_name: String,
    pub balance: Money,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl Account {
    /// Creates an account with a generated identifier.
    #[must_use]
    pub fn new(user_id: &str, account_number: &str, bank_name: &str, balance: Money) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_number: account_number.to_string(),
            bank_name: bank_name.to_string(),
            balance,
            account_type: "savings".to_string(),
            created_at: Utc::now(),
            active: true,
        }
    }
}
