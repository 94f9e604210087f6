//! Database models for notifications.

use crate::api::models::notifications::NotificationCreate;
use crate::types::{NotificationId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a notification
#[derive(Debug, Clone)]
pub struct NotificationCreateDBRequest {
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

impl From<NotificationCreate> for NotificationCreateDBRequest {
    fn from(api: NotificationCreate) -> Self {
        Self {
            user_id: api.user_id,
            title: api.title,
            body: api.body,
        }
    }
}

/// Database response for a notification row
#[derive(Debug, Clone, FromRow)]
pub struct NotificationDBResponse {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
