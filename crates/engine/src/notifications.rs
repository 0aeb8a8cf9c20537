//! Per-recipient notification entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    #[must_use]
    pub fn now(message: String) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
        }
    }
}
