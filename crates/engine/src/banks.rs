//! Bank reference data.
//!
//! Banks are immutable after registration; the only business mutation
//! is toggling the active flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Minimum accepted routing code length.
pub const MIN_ROUTING_CODE_LEN: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub routing_code: String,
    pub branch: String,
    pub address: String,
    pub established_at: DateTime<Utc>,
    pub active: bool,
}

impl Bank {
    pub fn new(name: &str, routing_code: &str, branch: &str, address: &str) -> ResultEngine<Self> {
        if name.trim().is_empty() {
            return Err(EngineError::InvalidAmount(
                "bank name must not be empty".to_string(),
            ));
        }
        if routing_code.trim().len() < MIN_ROUTING_CODE_LEN {
            return Err(EngineError::InvalidAmount(format!(
                "routing code must be at least {MIN_ROUTING_CODE_LEN} characters"
            )));
        }

        Ok(Self {
            name: name.to_string(),
            routing_code: routing_code.trim().to_string(),
            branch: branch.to_string(),
            address: address.to_string(),
            established_at: Utc::now(),
            active: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_routing_code() {
        assert!(Bank::new("First Bank", "AB1", "Main", "1 High St").is_err());
        assert!(Bank::new("First Bank", "AB12", "Main", "1 High St").is_ok());
    }
}
