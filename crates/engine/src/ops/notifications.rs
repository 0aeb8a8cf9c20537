//! Notification reads.

use crate::{Notification, ResultEngine};

use super::Engine;

impl Engine {
    /// Returns the user's notifications, most recent first. Unknown
    /// recipients simply have an empty list.
    pub async fn notifications(&self, user_id: &str) -> ResultEngine<Vec<Notification>> {
        self.repository.notifications(user_id).await
    }
}
