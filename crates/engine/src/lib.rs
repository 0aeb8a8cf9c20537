pub use accounts::Account;
pub use banks::Bank;
pub use error::EngineError;
pub use money::Money;
pub use notifications::Notification;
pub use ops::{Contact, Engine, EngineBuilder, Report};
pub use repository::Repository;
pub use transactions::{Transaction, TransactionKind, TransactionStatus};
pub use users::User;

mod accounts;
mod banks;
mod error;
mod locks;
mod money;
mod notifications;
mod ops;
mod repository;
pub mod store;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
