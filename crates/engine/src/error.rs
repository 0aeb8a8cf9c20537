//! The module contains the errors the engine can throw.
//!
//! Validation errors ([`InvalidAmount`], [`InvalidTransfer`],
//! [`InsufficientFunds`]) are detected before any mutation. Store errors
//! ([`StoreUnavailable`]) are surfaced, never swallowed into empty results.
//!
//! [`InvalidAmount`]: EngineError::InvalidAmount
//! [`InvalidTransfer`]: EngineError::InvalidTransfer
//! [`InsufficientFunds`]: EngineError::InsufficientFunds
//! [`StoreUnavailable`]: EngineError::StoreUnavailable
use thiserror::Error;

use crate::store::StoreError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Sender not found: {0}")]
    SenderNotFound(String),
    #[error("Receiver not found: {0}")]
    ReceiverNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("transfer partially applied: {0}")]
    PartialApplication(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            StoreError::Corrupt(msg) => {
                tracing::error!("corrupt record in backing store: {msg}");
                Self::StoreUnavailable(msg)
            }
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::SenderNotFound(a), Self::SenderNotFound(b)) => a == b,
            (Self::ReceiverNotFound(a), Self::ReceiverNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidTransfer(a), Self::InvalidTransfer(b)) => a == b,
            (Self::StoreUnavailable(a), Self::StoreUnavailable(b)) => a == b,
            (Self::PartialApplication(a), Self::PartialApplication(b)) => a == b,
            _ => false,
        }
    }
}
