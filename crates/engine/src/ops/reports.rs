//! Per-user transaction report.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, Transaction};

use super::Engine;

/// Folded totals over every transaction involving one user, plus the
/// balance read fresh from the user record. The balance is not derived
/// from the folded sums, so the two can diverge when money entered or
/// left outside the scanned window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub user_id: String,
    pub total_transactions: usize,
    pub total_sent: Money,
    pub total_received: Money,
    pub current_balance: Money,
    pub transactions: Vec<Transaction>,
}

impl Engine {
    /// Scans the full transaction collection and folds the entries where
    /// the user is sender or receiver.
    ///
    /// O(total transactions): there is no secondary participant index.
    /// The transaction list follows collection-iteration order, with no
    /// chronological guarantee.
    pub async fn report(&self, user_id: &str) -> ResultEngine<Report> {
        let user = self
            .repository
            .user(user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

        let overflow = || EngineError::InvalidAmount("report total overflow".to_string());

        let mut retained = Vec::new();
        let mut total_sent = Money::ZERO;
        let mut total_received = Money::ZERO;
        for tx in self.repository.transactions().await? {
            if tx.from_user_id == user_id {
                total_sent = total_sent.checked_add(tx.amount).ok_or_else(overflow)?;
            } else if tx.to_user_id == user_id {
                total_received = total_received.checked_add(tx.amount).ok_or_else(overflow)?;
            } else {
                continue;
            }
            retained.push(tx);
        }

        Ok(Report {
            user_id: user_id.to_string(),
            total_transactions: retained.len(),
            total_sent,
            total_received,
            current_balance: user.balance,
            transactions: retained,
        })
    }
}
