//! Database models for off-campus opportunities.

use crate::api::models::off_campus::{OpportunityCreate, OpportunityUpdate};
use crate::types::OpportunityId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for posting an opportunity
#[derive(Debug, Clone)]
pub struct OpportunityCreateDBRequest {
    pub title: String,
    pub company_name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<OpportunityCreate> for OpportunityCreateDBRequest {
    fn from(api: OpportunityCreate) -> Self {
        Self {
            title: api.title,
            company_name: api.company_name,
            url: api.url,
            description: api.description,
            deadline: api.deadline,
        }
    }
}

/// Database request for updating an opportunity
#[derive(Debug, Clone, Default)]
pub struct OpportunityUpdateDBRequest {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl From<OpportunityUpdate> for OpportunityUpdateDBRequest {
    fn from(api: OpportunityUpdate) -> Self {
        Self {
            title: api.title,
            company_name: api.company_name,
            url: api.url,
            description: api.description,
            deadline: api.deadline,
        }
    }
}

/// Database response for an opportunity row
#[derive(Debug, Clone, FromRow)]
pub struct OpportunityDBResponse {
    pub id: OpportunityId,
    pub title: String,
    pub company_name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
