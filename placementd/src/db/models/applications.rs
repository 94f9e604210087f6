//! Database models for applications and their review history.

use crate::api::models::applications::{ApplicationCreate, ApplicationStatus};
use crate::types::{ApplicationId, CompanyId, StudentId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database request for submitting a new application
#[derive(Debug, Clone)]
pub struct ApplicationCreateDBRequest {
    pub student_id: StudentId,
    pub company_id: CompanyId,
    pub resume_url: Option<String>,
}

impl From<ApplicationCreate> for ApplicationCreateDBRequest {
    fn from(api: ApplicationCreate) -> Self {
        Self {
            student_id: api.student_id,
            company_id: api.company_id,
            resume_url: api.resume_url,
        }
    }
}

/// Database request for a status transition.
///
/// Applied to the application row and appended to `application_reviews` in
/// the same transaction.
#[derive(Debug, Clone)]
pub struct StatusUpdateDBRequest {
    pub status: ApplicationStatus,
    pub score: Option<i32>,
    pub note: Option<String>,
}

/// Database response for an application row
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationDBResponse {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub company_id: CompanyId,
    pub status: ApplicationStatus,
    pub score: Option<i32>,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database response for a review history row
#[derive(Debug, Clone, FromRow)]
pub struct ReviewDBResponse {
    pub id: Uuid,
    pub application_id: ApplicationId,
    pub previous_status: ApplicationStatus,
    pub new_status: ApplicationStatus,
    pub score: Option<i32>,
    pub note: Option<String>,
    pub changed_at: DateTime<Utc>,
}
