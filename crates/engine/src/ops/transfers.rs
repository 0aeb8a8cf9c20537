//! The two transfer paths: user-level and account-level ledgers.
//!
//! Both follow the same discipline: validate before touching anything,
//! take both per-key locks in sort order, re-read fresh balances under
//! the locks, then persist balances, the transaction record and both
//! notifications as one atomic store batch.

use crate::{
    EngineError, Money, Notification, ResultEngine, Transaction, repository::Repository,
    store::WriteOp,
};

use super::Engine;

fn validate_transfer(from: &str, to: &str, amount: Money) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount("amount must be > 0".to_string()));
    }
    if from == to {
        return Err(EngineError::InvalidTransfer(
            "source and destination must differ".to_string(),
        ));
    }
    Ok(())
}

fn debit(balance: Money, amount: Money) -> ResultEngine<Money> {
    if balance < amount {
        return Err(EngineError::InsufficientFunds(format!(
            "balance {balance} is below {amount}"
        )));
    }
    balance
        .checked_sub(amount)
        .ok_or_else(|| EngineError::InvalidAmount("balance overflow".to_string()))
}

fn credit(balance: Money, amount: Money) -> ResultEngine<Money> {
    balance
        .checked_add(amount)
        .ok_or_else(|| EngineError::InvalidAmount("balance overflow".to_string()))
}

impl Engine {
    /// Moves `amount` between two user balances.
    ///
    /// Returns the completed transaction record. Fails without mutating
    /// anything when a party is missing, the amount is invalid, or the
    /// source balance is insufficient.
    pub async fn transfer(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        amount: Money,
    ) -> ResultEngine<Transaction> {
        validate_transfer(from_user_id, to_user_id, amount)?;

        let _guards = self.locks.lock_pair(from_user_id, to_user_id).await;

        let mut sender = self
            .repository
            .user(from_user_id)
            .await?
            .ok_or_else(|| EngineError::SenderNotFound(from_user_id.to_string()))?;
        let mut receiver = self
            .repository
            .user(to_user_id)
            .await?
            .ok_or_else(|| EngineError::ReceiverNotFound(to_user_id.to_string()))?;

        sender.balance = debit(sender.balance, amount)?;
        receiver.balance = credit(receiver.balance, amount)?;

        let tx = Transaction::transfer(
            from_user_id,
            to_user_id,
            from_user_id,
            to_user_id,
            amount,
            format!("{from_user_id} sent {amount} to {to_user_id}"),
        )?;

        let sender_note = Notification::now(format!("{from_user_id} sent {amount} to {to_user_id}"));
        let receiver_note = Notification::now(format!("Received {amount} from {from_user_id}"));

        let batch = vec![
            Repository::user_write(&sender)?,
            Repository::user_write(&receiver)?,
            Repository::transaction_write(&tx)?,
            Repository::notification_write(from_user_id, &sender_note)?,
            Repository::notification_write(to_user_id, &receiver_note)?,
        ];
        self.persist_transfer(&tx.id, batch).await?;

        tracing::info!(
            transaction = %tx.id,
            from = from_user_id,
            to = to_user_id,
            amount = %amount,
            "user transfer applied"
        );
        Ok(tx)
    }

    /// Moves `amount` between two account balances.
    ///
    /// The account ledger is independent from the user ledger; only the
    /// notifications go to the owning users.
    pub async fn transfer_accounts(
        &self,
        from_account_id: &str,
        to_account_id: &str,
        amount: Money,
    ) -> ResultEngine<Transaction> {
        validate_transfer(from_account_id, to_account_id, amount)?;

        let _guards = self.locks.lock_pair(from_account_id, to_account_id).await;

        let mut source = self
            .repository
            .account(from_account_id)
            .await?
            .ok_or_else(|| EngineError::SenderNotFound(from_account_id.to_string()))?;
        let mut destination = self
            .repository
            .account(to_account_id)
            .await?
            .ok_or_else(|| EngineError::ReceiverNotFound(to_account_id.to_string()))?;

        source.balance = debit(source.balance, amount)?;
        destination.balance = credit(destination.balance, amount)?;

        let tx = Transaction::transfer(
            from_account_id,
            to_account_id,
            &source.user_id,
            &destination.user_id,
            amount,
            format!(
                "Transfer from {} to {}",
                source.account_number, destination.account_number
            ),
        )?;

        let sender_note = Notification::now(format!(
            "Transfer: Sent {amount} from {} to account {}",
            source.account_number, destination.account_number
        ));
        let receiver_note = Notification::now(format!(
            "Transfer: Received {amount} to {} from account {}",
            destination.account_number, source.account_number
        ));

        let batch = vec![
            Repository::account_write(&source)?,
            Repository::account_write(&destination)?,
            Repository::transaction_write(&tx)?,
            Repository::notification_write(&source.user_id, &sender_note)?,
            Repository::notification_write(&destination.user_id, &receiver_note)?,
        ];
        self.persist_transfer(&tx.id, batch).await?;

        tracing::info!(
            transaction = %tx.id,
            from = from_account_id,
            to = to_account_id,
            amount = %amount,
            "account transfer applied"
        );
        Ok(tx)
    }

    /// Applies the staged writes of a transfer in one batch.
    ///
    /// A failed batch leaves the outcome unknown from this side of the
    /// store; it is surfaced as `PartialApplication` and logged for the
    /// operator rather than swallowed.
    async fn persist_transfer(&self, tx_id: &str, batch: Vec<WriteOp>) -> ResultEngine<()> {
        if let Err(err) = self.repository.apply(batch).await {
            tracing::error!(transaction = tx_id, "transfer persistence failed: {err}");
            return Err(EngineError::PartialApplication(format!(
                "transaction {tx_id}: {err}"
            )));
        }
        Ok(())
    }
}
