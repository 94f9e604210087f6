//! Database models for recruitment rounds.

use crate::api::models::rounds::{RoundCreate, RoundStatus, RoundType, RoundUpdate};
use crate::types::{CompanyId, RoundId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for adding a round to a company's process
#[derive(Debug, Clone)]
pub struct RoundCreateDBRequest {
    pub company_id: CompanyId,
    pub round_number: i32,
    pub name: String,
    pub round_type: RoundType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl RoundCreateDBRequest {
    pub fn from_api(company_id: CompanyId, api: RoundCreate) -> Self {
        Self {
            company_id,
            round_number: api.round_number,
            name: api.name,
            round_type: api.round_type,
            scheduled_at: api.scheduled_at,
        }
    }
}

/// Database request for updating a round
#[derive(Debug, Clone, Default)]
pub struct RoundUpdateDBRequest {
    pub name: Option<String>,
    pub round_type: Option<RoundType>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<RoundStatus>,
}

impl From<RoundUpdate> for RoundUpdateDBRequest {
    fn from(api: RoundUpdate) -> Self {
        Self {
            name: api.name,
            round_type: api.round_type,
            scheduled_at: api.scheduled_at,
            status: None,
        }
    }
}

/// Database response for a round row
#[derive(Debug, Clone, FromRow)]
pub struct RoundDBResponse {
    pub id: RoundId,
    pub company_id: CompanyId,
    pub round_number: i32,
    pub name: String,
    pub round_type: RoundType,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: RoundStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
