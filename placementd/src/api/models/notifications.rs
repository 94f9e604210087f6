//! API request/response models for notifications.

use super::pagination::Pagination;
use crate::db::models::notifications::NotificationDBResponse;
use crate::types::{NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for listing a user's notifications
#[derive(Debug, Default, Deserialize)]
pub struct ListNotificationsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: Pagination,

    /// When true, return only unread notifications
    #[serde(default)]
    pub unread: bool,
}

/// Request body for sending a notification to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreate {
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// Full notification details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationDBResponse> for NotificationResponse {
    fn from(db: NotificationDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            body: db.body,
            read: db.read,
            created_at: db.created_at,
        }
    }
}
