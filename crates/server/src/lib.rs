use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod accounts;
mod auth;
mod banks;
mod notifications;
mod reports;
mod server;
mod transfers;
mod users;


pub mod types {
    pub mod user {
        pub use api_types::user::{ContactView, UserNew, UserView};
    }

    pub mod account {
        pub use api_types::account::{AccountNew, AccountView};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionKind, TransactionStatus, TransactionView, TransferAccountNew, TransferNew,
        };
    }

    pub mod notification {
        pub use api_types::notification::NotificationView;
    }

    pub mod report {
        pub use api_types::report::ReportView;
    }

    pub mod bank {
        pub use api_types::bank::{BankNew, BankView};
    }

    pub mod auth {
        pub use api_types::auth::{LoginNew, LoginResult, RegisterNew, RegisterResult, UserLookup};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_)
        | EngineError::SenderNotFound(_)
        | EngineError::ReceiverNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InsufficientFunds(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidTransfer(_) => StatusCode::BAD_REQUEST,
        EngineError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        EngineError::PartialApplication(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::StoreUnavailable(msg) => {
            tracing::error!("backing store unavailable: {msg}");
            "service temporarily unavailable".to_string()
        }
        EngineError::PartialApplication(msg) => {
            tracing::error!("partially applied transfer needs reconciliation: {msg}");
            "transfer could not be confirmed".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

pub(crate) fn to_money(amount: api_types::Amount) -> engine::Money {
    engine::Money::new(amount.minor_units())
}

pub(crate) fn to_amount(money: engine::Money) -> api_types::Amount {
    api_types::Amount::from_minor_units(money.minor_units())
}
