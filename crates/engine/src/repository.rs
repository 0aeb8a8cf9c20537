//! Typed entity repository on top of the store adapter.
//!
//! One hash collection per entity type (`users`, `accounts`,
//! `transactions`), an email-to-id index hash for credential lookups,
//! and one list per notification recipient. Records are stored per key;
//! the repository never loads a whole collection to mutate one entry.
//!
//! The repository does not interpret business fields and never retries:
//! an unreachable backend surfaces as `StoreUnavailable` on every call.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Account, Bank, Notification, ResultEngine, Transaction, User,
    store::{Store, StoreError, WriteOp},
};

pub const USERS: &str = "users";
pub const ACCOUNTS: &str = "accounts";
pub const TRANSACTIONS: &str = "transactions";
pub const BANKS: &str = "banks";
pub const USER_EMAILS: &str = "user_emails";
const NOTIFICATIONS_PREFIX: &str = "notifications";

pub struct Repository {
    store: Arc<dyn Store>,
}

impl Repository {
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
        serde_json::to_string(value).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    fn decode<T: DeserializeOwned>(collection: &str, id: &str, raw: &str) -> Result<T, StoreError> {
        serde_json::from_str(raw)
            .map_err(|err| StoreError::Corrupt(format!("{collection}/{id}: {err}")))
    }

    async fn record<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> ResultEngine<Option<T>> {
        match self.store.hash_get(collection, id).await? {
            Some(raw) => Ok(Some(Self::decode(collection, id, &raw)?)),
            None => Ok(None),
        }
    }

    async fn records<T: DeserializeOwned>(&self, collection: &str) -> ResultEngine<Vec<T>> {
        let mut out = Vec::new();
        for (id, raw) in self.store.hash_get_all(collection).await? {
            out.push(Self::decode(collection, &id, &raw)?);
        }
        Ok(out)
    }

    async fn put_record<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        value: &T,
    ) -> ResultEngine<()> {
        let raw = Self::encode(value)?;
        self.store.hash_set(collection, id, &raw).await?;
        Ok(())
    }

    pub async fn user(&self, id: &str) -> ResultEngine<Option<User>> {
        self.record(USERS, id).await
    }

    pub async fn users(&self) -> ResultEngine<Vec<User>> {
        self.records(USERS).await
    }

    pub async fn put_user(&self, user: &User) -> ResultEngine<()> {
        self.put_record(USERS, &user.id, user).await
    }

    pub async fn account(&self, id: &str) -> ResultEngine<Option<Account>> {
        self.record(ACCOUNTS, id).await
    }

    pub async fn accounts(&self) -> ResultEngine<Vec<Account>> {
        self.records(ACCOUNTS).await
    }

    pub async fn put_account(&self, account: &Account) -> ResultEngine<()> {
        self.put_record(ACCOUNTS, &account.id, account).await
    }

    pub async fn transactions(&self) -> ResultEngine<Vec<Transaction>> {
        self.records(TRANSACTIONS).await
    }

    pub async fn bank(&self, routing_code: &str) -> ResultEngine<Option<Bank>> {
        self.record(BANKS, routing_code).await
    }

    pub async fn banks(&self) -> ResultEngine<Vec<Bank>> {
        self.records(BANKS).await
    }

    pub async fn put_bank(&self, bank: &Bank) -> ResultEngine<()> {
        self.put_record(BANKS, &bank.routing_code, bank).await
    }

    /// Resolves a registered email through the index hash; no collection
    /// scan involved.
    pub async fn user_id_for_email(&self, email: &str) -> ResultEngine<Option<String>> {
        Ok(self.store.hash_get(USER_EMAILS, email).await?)
    }

    pub async fn index_email(&self, email: &str, user_id: &str) -> ResultEngine<()> {
        self.store.hash_set(USER_EMAILS, email, user_id).await?;
        Ok(())
    }

    fn notifications_key(recipient: &str) -> String {
        format!("{NOTIFICATIONS_PREFIX}:{recipient}")
    }

    pub async fn append_notification(
        &self,
        recipient: &str,
        note: &Notification,
    ) -> ResultEngine<()> {
        let raw = Self::encode(note)?;
        self.store
            .list_push_front(&Self::notifications_key(recipient), &raw)
            .await?;
        Ok(())
    }

    /// Returns the recipient's notifications, most recent first.
    pub async fn notifications(&self, recipient: &str) -> ResultEngine<Vec<Notification>> {
        let key = Self::notifications_key(recipient);
        let mut out = Vec::new();
        for raw in self.store.list_range(&key).await? {
            out.push(Self::decode(NOTIFICATIONS_PREFIX, recipient, &raw)?);
        }
        Ok(out)
    }

    // Batched writes: staged as ops, applied atomically by the store.

    pub fn user_write(user: &User) -> ResultEngine<WriteOp> {
        Ok(WriteOp::HashSet {
            collection: USERS.to_string(),
            id: user.id.clone(),
            value: Self::encode(user)?,
        })
    }

    pub fn account_write(account: &Account) -> ResultEngine<WriteOp> {
        Ok(WriteOp::HashSet {
            collection: ACCOUNTS.to_string(),
            id: account.id.clone(),
            value: Self::encode(account)?,
        })
    }

    pub fn transaction_write(tx: &Transaction) -> ResultEngine<WriteOp> {
        Ok(WriteOp::HashSet {
            collection: TRANSACTIONS.to_string(),
            id: tx.id.clone(),
            value: Self::encode(tx)?,
        })
    }

    pub fn notification_write(recipient: &str, note: &Notification) -> ResultEngine<WriteOp> {
        Ok(WriteOp::ListPushFront {
            key: Self::notifications_key(recipient),
            value: Self::encode(note)?,
        })
    }

    pub async fn apply(&self, batch: Vec<WriteOp>) -> ResultEngine<()> {
        self.store.apply(batch).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, store::MemoryStore};

    fn repository() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn user_roundtrip() {
        let repo = repository();
        let user = User::new_profile("Alice", "Doe", Money::new(100_00));
        repo.put_user(&user).await.unwrap();

        let loaded = repo.user(&user.id).await.unwrap().unwrap();
        assert_eq!(loaded, user);
        assert!(repo.user("nobody@wirepay").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_record_is_an_error_not_an_empty_result() {
        let store = Arc::new(MemoryStore::new());
        store.hash_set(USERS, "bad", "not json").await.unwrap();
        let repo = Repository::new(store);

        assert!(repo.user("bad").await.is_err());
        assert!(repo.users().await.is_err());
    }

    #[tokio::test]
    async fn notifications_are_most_recent_first() {
        let repo = repository();
        repo.append_notification("alice@wirepay", &Notification::now("one".to_string()))
            .await
            .unwrap();
        repo.append_notification("alice@wirepay", &Notification::now("two".to_string()))
            .await
            .unwrap();

        let notes = repo.notifications("alice@wirepay").await.unwrap();
        assert_eq!(notes[0].message, "two");
        assert_eq!(notes[1].message, "one");
    }
}
