//! Bank reference data operations.

use crate::{Bank, EngineError, ResultEngine};

use super::Engine;

impl Engine {
    /// Registers a bank keyed by routing code; duplicates are rejected.
    pub async fn register_bank(
        &self,
        name: &str,
        routing_code: &str,
        branch: &str,
        address: &str,
    ) -> ResultEngine<Bank> {
        let bank = Bank::new(name, routing_code, branch, address)?;

        let _guard = self.locks.lock(&format!("bank:{}", bank.routing_code)).await;

        if self.repository.bank(&bank.routing_code).await?.is_some() {
            return Err(EngineError::ExistingKey(bank.routing_code));
        }
        self.repository.put_bank(&bank).await?;
        Ok(bank)
    }

    pub async fn banks(&self) -> ResultEngine<Vec<Bank>> {
        self.repository.banks().await
    }
}
