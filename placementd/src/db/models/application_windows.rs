//! Database models for application windows.

use crate::api::models::application_windows::{WindowCreate, WindowUpdate};
use crate::types::{CompanyId, WindowId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for opening a new application window
#[derive(Debug, Clone)]
pub struct WindowCreateDBRequest {
    pub company_id: CompanyId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl From<WindowCreate> for WindowCreateDBRequest {
    fn from(api: WindowCreate) -> Self {
        Self {
            company_id: api.company_id,
            starts_at: api.starts_at,
            ends_at: api.ends_at,
            note: api.note,
        }
    }
}

/// Database request for updating a window
#[derive(Debug, Clone, Default)]
pub struct WindowUpdateDBRequest {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl From<WindowUpdate> for WindowUpdateDBRequest {
    fn from(api: WindowUpdate) -> Self {
        Self {
            starts_at: api.starts_at,
            ends_at: api.ends_at,
            note: api.note,
        }
    }
}

/// Database response for a window row
#[derive(Debug, Clone, FromRow)]
pub struct WindowDBResponse {
    pub id: WindowId,
    pub company_id: CompanyId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
