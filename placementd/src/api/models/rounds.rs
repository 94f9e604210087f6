//! API request/response models for recruitment rounds.

use crate::db::models::rounds::RoundDBResponse;
use crate::types::{CompanyId, RoundId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of assessment a round represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "round_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoundType {
    Aptitude,
    Coding,
    Technical,
    Hr,
}

/// Scheduling status of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "round_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

/// Request body for adding a round to a company's recruitment process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCreate {
    pub round_number: i32,
    pub name: String,
    pub round_type: RoundType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Request body for updating a round. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundUpdate {
    pub name: Option<String>,
    pub round_type: Option<RoundType>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Request body for a round status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundStatusUpdate {
    pub status: RoundStatus,
}

/// Full round details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundResponse {
    pub id: RoundId,
    pub company_id: CompanyId,
    pub round_number: i32,
    pub name: String,
    pub round_type: RoundType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: RoundStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoundDBResponse> for RoundResponse {
    fn from(db: RoundDBResponse) -> Self {
        Self {
            id: db.id,
            company_id: db.company_id,
            round_number: db.round_number,
            name: db.name,
            round_type: db.round_type,
            scheduled_at: db.scheduled_at,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
