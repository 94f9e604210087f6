//! Database models for students.

use crate::api::models::students::{StudentCreate, StudentUpdate};
use crate::types::{CompanyId, StudentId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new student
#[derive(Debug, Clone)]
pub struct StudentCreateDBRequest {
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub branch: String,
    pub batch: i32,
    pub cgpa: f64,
    pub backlogs: i32,
}

impl From<StudentCreate> for StudentCreateDBRequest {
    fn from(api: StudentCreate) -> Self {
        Self {
            roll_number: api.roll_number,
            name: api.name,
            email: api.email,
            branch: api.branch,
            batch: api.batch,
            cgpa: api.cgpa,
            backlogs: api.backlogs,
        }
    }
}

/// Database request for updating a student
#[derive(Debug, Clone, Default)]
pub struct StudentUpdateDBRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub branch: Option<String>,
    pub batch: Option<i32>,
    pub cgpa: Option<f64>,
    pub backlogs: Option<i32>,
    pub placed: Option<bool>,
    pub placed_company_id: Option<CompanyId>,
}

impl From<StudentUpdate> for StudentUpdateDBRequest {
    fn from(api: StudentUpdate) -> Self {
        Self {
            name: api.name,
            email: api.email,
            branch: api.branch,
            batch: api.batch,
            cgpa: api.cgpa,
            backlogs: api.backlogs,
            placed: api.placed,
            placed_company_id: api.placed_company_id,
        }
    }
}

/// Database response for a student row
#[derive(Debug, Clone, FromRow)]
pub struct StudentDBResponse {
    pub id: StudentId,
    pub roll_number: String,
    pub name: String,
    pub email: String,
    pub branch: String,
    pub batch: i32,
    pub cgpa: f64,
    pub backlogs: i32,
    pub placed: bool,
    pub placed_company_id: Option<CompanyId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
