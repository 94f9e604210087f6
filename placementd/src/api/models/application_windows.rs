//! API request/response models for application windows.

use super::pagination::Pagination;
use crate::db::models::application_windows::WindowDBResponse;
use crate::types::{CompanyId, WindowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for listing application windows
#[derive(Debug, Default, Deserialize)]
pub struct ListWindowsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: Pagination,

    /// Filter by company
    pub company_id: Option<CompanyId>,
}

/// Query parameters for the currently-open windows endpoint
#[derive(Debug, Default, Deserialize)]
pub struct OpenWindowsQuery {
    pub company_id: Option<CompanyId>,
}

/// Request body for opening a new application window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowCreate {
    pub company_id: CompanyId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Request body for updating a window. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowUpdate {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// Full window details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowResponse {
    pub id: WindowId,
    pub company_id: CompanyId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<WindowDBResponse> for WindowResponse {
    fn from(db: WindowDBResponse) -> Self {
        Self {
            id: db.id,
            company_id: db.company_id,
            starts_at: db.starts_at,
            ends_at: db.ends_at,
            note: db.note,
            created_at: db.created_at,
        }
    }
}
