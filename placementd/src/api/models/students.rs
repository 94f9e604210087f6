//! API request/response models for students.

use super::pagination::Pagination;
use crate::db::models::students::StudentDBResponse;
use crate::types::{CompanyId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for listing students
#[derive(Debug, Default, Deserialize)]
pub struct ListStudentsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: Pagination,

    /// Filter by branch (exact match, e.g. "CSE")
    pub branch: Option<String>,

    /// Filter by graduating batch year
    pub batch: Option<i32>,

    /// Filter by placement status
    pub placed: Option<bool>,

    /// Only return students with at least this CGPA
    pub min_cgpa: Option<f64>,

    /// Search query matched against name and roll number (case-insensitive substring)
    pub q: Option<String>,
}

/// Request body for registering a new student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreate {
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub branch: String,
    /// Graduating year, e.g. 2026
    pub batch: i32,
    pub cgpa: f64,
    #[serde(default)]
    pub backlogs: i32,
}

/// Request body for updating a student. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub branch: Option<String>,
    pub batch: Option<i32>,
    pub cgpa: Option<f64>,
    pub backlogs: Option<i32>,
    pub placed: Option<bool>,
    pub placed_company_id: Option<CompanyId>,
}

/// Full student details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: StudentId,
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub branch: String,
    pub batch: i32,
    pub cgpa: f64,
    pub backlogs: i32,
    pub placed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placed_company_id: Option<CompanyId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentDBResponse> for StudentResponse {
    fn from(db: StudentDBResponse) -> Self {
        Self {
            id: db.id,
            roll_number: db.roll_number,
            name: db.name,
            email: db.email,
            branch: db.branch,
            batch: db.batch,
            cgpa: db.cgpa,
            backlogs: db.backlogs,
            placed: db.placed,
            placed_company_id: db.placed_company_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
