//! User store: registration and credential checks.
//!
//! Credential comparison is exact-match on the stored plaintext secret,
//! preserved from the system this replaces; hashing is out of scope
//! here. Email lookups go through the `user_emails` index hash instead
//! of scanning the collection.

use crate::{ResultEngine, User};

use super::Engine;

impl Engine {
    /// Registers a user keyed by email. Fails closed: returns `false`
    /// when any field is blank or the email is already registered.
    ///
    /// Registration runs under a per-email lock, so two concurrent calls
    /// with the same email cannot both pass the existence check.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<bool> {
        if name.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
            return Ok(false);
        }

        let _guard = self.locks.lock(&format!("email:{email}")).await;

        if self.repository.user_id_for_email(email).await?.is_some() {
            return Ok(false);
        }

        let user = User::new_registered(name.trim(), email.trim(), password);
        self.repository.put_user(&user).await?;
        self.repository.index_email(email.trim(), &user.id).await?;
        Ok(true)
    }

    /// Exact-match credential check; `None` on any mismatch.
    pub async fn check_authentication(
        &self,
        email: &str,
        password: &str,
    ) -> ResultEngine<Option<User>> {
        let Some(user) = self.user_by_email(email).await? else {
            return Ok(None);
        };
        if user.password.as_deref() == Some(password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn user_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        let Some(id) = self.repository.user_id_for_email(email).await? else {
            return Ok(None);
        };
        self.repository.user(&id).await
    }

    pub async fn user_exists(&self, email: &str) -> ResultEngine<bool> {
        Ok(self.repository.user_id_for_email(email).await?.is_some())
    }
}
