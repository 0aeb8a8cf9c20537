//! Account operations.

use crate::{Account, EngineError, Money, ResultEngine, repository::Repository};

use super::{Engine, require_field};

impl Engine {
    /// Opens an account for `user_id`.
    ///
    /// The owner reference is a lookup relation, not an ownership
    /// pointer: the account is created even when no such user exists.
    /// When the owner does exist, its user balance is overwritten with
    /// the account's opening balance (preserved coupling between the two
    /// ledgers).
    pub async fn create_account(
        &self,
        user_id: &str,
        account_number: &str,
        bank_name: &str,
        balance: Money,
    ) -> ResultEngine<Account> {
        let user_id = require_field(user_id, "userId")?;
        let account_number = require_field(account_number, "accountNumber")?;
        let bank_name = require_field(bank_name, "bankName")?;
        if balance.is_negative() {
            return Err(EngineError::InvalidAmount(
                "starting balance must not be negative".to_string(),
            ));
        }

        // The coupling writes the owner's balance; take its lock so a
        // concurrent transfer cannot interleave.
        let _guard = self.locks.lock(&user_id).await;

        let account = Account::new(&user_id, &account_number, &bank_name, balance);

        let mut batch = vec![Repository::account_write(&account)?];
        if let Some(mut owner) = self.repository.user(&user_id).await? {
            owner.balance = balance;
            batch.push(Repository::user_write(&owner)?);
        }
        self.repository.apply(batch).await?;

        Ok(account)
    }

    pub async fn accounts(&self) -> ResultEngine<Vec<Account>> {
        self.repository.accounts().await
    }

    pub async fn accounts_for_user(&self, user_id: &str) -> ResultEngine<Vec<Account>> {
        Ok(self
            .repository
            .accounts()
            .await?
            .into_iter()
            .filter(|account| account.user_id == user_id)
            .collect())
    }
}
