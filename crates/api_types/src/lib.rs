//! Wire DTOs shared by the server and its clients.
//!
//! Field names follow the JSON contract (`camelCase`). Monetary values
//! travel as [`Amount`]: decimal strings in responses, decimal strings
//! or JSON numbers in requests, with minor-unit integers inside.

use std::fmt;

use serde::{Deserialize, Serialize, de};

/// Monetary amount in integer minor units, with an exact decimal wire
/// representation.
///
/// Deserialization accepts `40`, `40.5`, `"40.50"`; parsing goes through
/// the textual form only, never floating-point arithmetic. More than two
/// decimals are rejected. Serialization always emits a decimal string
/// (`"40.50"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    #[must_use]
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

fn parse_decimal(s: &str) -> Result<Amount, String> {
    let trimmed = s.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(stripped) => (-1i64, stripped),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if rest.is_empty() {
        return Err("empty amount".to_string());
    }

    let rest = rest.replace(',', ".");
    let mut parts = rest.split('.');
    let units_str = parts.next().unwrap_or_default();
    let frac = parts.next().unwrap_or_default();
    if parts.next().is_some() || units_str.is_empty() {
        return Err(format!("invalid amount: {s}"));
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(format!("invalid amount: {s}"));
    }

    let units: i64 = units_str.parse().map_err(|_| format!("invalid amount: {s}"))?;
    let cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| format!("invalid amount: {s}"))? * 10,
        2 => frac.parse::<i64>().map_err(|_| format!("invalid amount: {s}"))?,
        _ => return Err(format!("too many decimals: {s}")),
    };

    let overflow = || format!("amount too large: {s}");
    let total = units
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(overflow)?;
    let signed = if sign < 0 {
        total.checked_neg().ok_or_else(overflow)?
    } else {
        total
    };
    Ok(Amount(signed))
}

impl Serialize for Amount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> de::Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal amount as a number or string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                v.checked_mul(100)
                    .map(Amount)
                    .ok_or_else(|| E::custom("amount too large"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Amount)
                    .ok_or_else(|| E::custom("amount too large"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                // Shortest round-trip formatting, then the exact decimal
                // parser; rejects anything finer than two decimals.
                parse_decimal(&v.to_string()).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                parse_decimal(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

pub mod user {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserNew {
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
        pub balance: Option<Amount>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: String,
        pub first_name: String,
        pub last_name: String,
        pub balance: Amount,
        pub created_at: DateTime<Utc>,
        pub active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ContactView {
        pub id: String,
        pub name: String,
        pub payment_id: String,
    }
}

pub mod account {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountNew {
        pub user_id: String,
        pub account_number: String,
        pub bank_name: String,
        pub balance: Option<Amount>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountView {
        pub id: String,
        pub user_id: String,
        pub account_number: String,
        pub bank_name: String,
        pub balance: Amount,
        pub account_type: String,
        pub created_at: DateTime<Utc>,
        pub active: bool,
    }
}

pub mod transaction {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionStatus {
        Pending,
        Success,
        Failed,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Transfer,
        Deposit,
        Withdrawal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferNew {
        pub from_user_id: String,
        pub to_user_id: String,
        pub amount: Amount,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferAccountNew {
        pub from_account_id: String,
        pub to_account_id: String,
        pub amount: Amount,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: String,
        pub from_id: String,
        pub to_id: String,
        pub from_user_id: String,
        pub to_user_id: String,
        pub amount: Amount,
        pub timestamp: DateTime<Utc>,
        pub status: TransactionStatus,
        pub kind: TransactionKind,
        pub description: String,
    }
}

pub mod notification {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct NotificationView {
        pub message: String,
        pub timestamp: DateTime<Utc>,
    }
}

pub mod report {
    use super::*;
    use crate::transaction::TransactionView;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReportView {
        pub user_id: String,
        pub total_transactions: usize,
        pub total_sent: Amount,
        pub total_received: Amount,
        pub current_balance: Amount,
        pub transactions: Vec<TransactionView>,
    }
}

pub mod bank {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BankNew {
        pub name: String,
        pub routing_code: String,
        #[serde(default)]
        pub branch: String,
        #[serde(default)]
        pub address: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BankView {
        pub name: String,
        pub routing_code: String,
        pub branch: String,
        pub address: String,
        pub established_at: DateTime<Utc>,
        pub active: bool,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterResult {
        pub success: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginNew {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResult {
        pub success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserLookup {
        pub name: String,
        pub email: String,
    }
}
