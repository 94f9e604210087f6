//! API request/response models for off-campus opportunities.

use super::pagination::Pagination;
use crate::db::models::off_campus::OpportunityDBResponse;
use crate::types::OpportunityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for listing off-campus opportunities
#[derive(Debug, Default, Deserialize)]
pub struct ListOpportunitiesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: Pagination,

    /// Search query matched against title and company name (case-insensitive substring)
    pub q: Option<String>,
}

/// Request body for posting an off-campus opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityCreate {
    pub title: String,
    pub company_name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Request body for updating an opportunity. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpportunityUpdate {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Full opportunity details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityResponse {
    pub id: OpportunityId,
    pub title: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OpportunityDBResponse> for OpportunityResponse {
    fn from(db: OpportunityDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            company_name: db.company_name,
            url: db.url,
            description: db.description,
            deadline: db.deadline,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
