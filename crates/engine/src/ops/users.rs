//! User profile operations and the derived contacts view.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, User};

use super::{Engine, require_field};

/// Derived view over users for the contacts listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub payment_id: String,
}

impl Engine {
    /// Creates a profile user with a server-generated identifier.
    pub async fn create_user_profile(
        &self,
        first_name: &str,
        last_name: &str,
        balance: Money,
    ) -> ResultEngine<User> {
        let first_name = require_field(first_name, "firstName")?;
        if balance.is_negative() {
            return Err(EngineError::InvalidAmount(
                "starting balance must not be negative".to_string(),
            ));
        }

        let user = User::new_profile(&first_name, last_name.trim(), balance);
        self.repository.put_user(&user).await?;
        Ok(user)
    }

    pub async fn users(&self) -> ResultEngine<Vec<User>> {
        self.repository.users().await
    }

    pub async fn user(&self, id: &str) -> ResultEngine<User> {
        self.repository
            .user(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    pub async fn contacts(&self) -> ResultEngine<Vec<Contact>> {
        Ok(self
            .repository
            .users()
            .await?
            .into_iter()
            .map(|user| Contact {
                name: user.display_name(),
                payment_id: user.id.clone(),
                id: user.id,
            })
            .collect())
    }
}
