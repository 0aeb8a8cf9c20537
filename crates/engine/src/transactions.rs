//! Transaction records.
//!
//! A `Transaction` is the immutable, append-only trace of a transfer.
//! It is created at the moment balances are mutated, with a terminal
//! status; records are never updated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    /// `Success` and `Failed` never re-transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Transfer,
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "transfer" => Ok(Self::Transfer),
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Sender identifier: a user id on the user ledger, an account id on
    /// the account ledger.
    pub from_id: String,
    pub to_id: String,
    /// Owning user ids; on the user ledger these repeat `from_id`/`to_id`.
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    pub description: String,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Builds a completed transfer record with a fresh identifier.
    ///
    /// Application and confirmation are a single atomic step, so the
    /// status is `Success` from creation; no `pending` state is ever
    /// observable.
    pub fn transfer(
        from_id: &str,
        to_id: &str,
        from_user_id: &str,
        to_user_id: &str,
        amount: Money,
        description: String,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            amount,
            timestamp: Utc::now(),
            status: TransactionStatus::Success,
            description,
            kind: TransactionKind::Transfer,
        })
    }
}
