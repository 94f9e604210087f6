//! API request/response models for applications and their review history.

use super::pagination::Pagination;
use crate::db::models::applications::{ApplicationDBResponse, ReviewDBResponse};
use crate::types::{ApplicationId, CompanyId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an application.
///
/// Transitions are unconstrained: any authorized caller can set any status at
/// any time via `PUT /api/applications/{id}/status`; concurrent updates are
/// last-write-wins. Every change is appended to the review history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Shortlisted,
    Rejected,
    Selected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under-review",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Selected => "selected",
        };
        write!(f, "{s}")
    }
}

/// Query parameters for listing applications
#[derive(Debug, Default, Deserialize)]
pub struct ListApplicationsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: Pagination,

    /// Filter by applicant
    pub student_id: Option<StudentId>,

    /// Filter by company
    pub company_id: Option<CompanyId>,

    /// Filter by status
    pub status: Option<ApplicationStatus>,
}

/// Request body for submitting a new application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCreate {
    pub student_id: StudentId,
    pub company_id: CompanyId,
    pub resume_url: Option<String>,
}

/// Request body for a status update issued by a reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    /// Optional review score in [0, 100]
    pub score: Option<i32>,
    /// Optional free-form reviewer note, recorded in the history
    pub note: Option<String>,
}

/// Full application details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: ApplicationId,
    pub student_id: StudentId,
    pub company_id: CompanyId,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationDBResponse> for ApplicationResponse {
    fn from(db: ApplicationDBResponse) -> Self {
        Self {
            id: db.id,
            student_id: db.student_id,
            company_id: db.company_id,
            status: db.status,
            score: db.score,
            resume_url: db.resume_url,
            applied_at: db.applied_at,
            updated_at: db.updated_at,
        }
    }
}

/// A single entry in an application's review history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: uuid::Uuid,
    pub application_id: ApplicationId,
    pub previous_status: ApplicationStatus,
    pub new_status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl From<ReviewDBResponse> for ReviewResponse {
    fn from(db: ReviewDBResponse) -> Self {
        Self {
            id: db.id,
            application_id: db.application_id,
            previous_status: db.previous_status,
            new_status: db.new_status,
            score: db.score,
            note: db.note,
            changed_at: db.changed_at,
        }
    }
}
