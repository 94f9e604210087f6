//! Database models for companies.
//!
//! Eligibility criteria are stored inline on the company row; the API layer
//! folds them into an `eligibility` object.

use crate::api::models::companies::{CompanyCreate, CompanyUpdate, EligibilityCriteria};
use crate::types::CompanyId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new company
#[derive(Debug, Clone)]
pub struct CompanyCreateDBRequest {
    pub name: String,
    pub description: Option<String>,
    pub package_lpa: Option<f64>,
    pub min_cgpa: f64,
    pub max_backlogs: i32,
    pub allowed_branches: Vec<String>,
    pub allowed_batches: Vec<i32>,
}

impl From<CompanyCreate> for CompanyCreateDBRequest {
    fn from(api: CompanyCreate) -> Self {
        Self {
            name: api.name,
            description: api.description,
            package_lpa: api.package_lpa,
            min_cgpa: api.eligibility.min_cgpa,
            max_backlogs: api.eligibility.max_backlogs,
            allowed_branches: api.eligibility.allowed_branches,
            allowed_batches: api.eligibility.allowed_batches,
        }
    }
}

/// Database request for updating a company
#[derive(Debug, Clone, Default)]
pub struct CompanyUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub package_lpa: Option<f64>,
    pub min_cgpa: Option<f64>,
    pub max_backlogs: Option<i32>,
    pub allowed_branches: Option<Vec<String>>,
    pub allowed_batches: Option<Vec<i32>>,
}

impl From<CompanyUpdate> for CompanyUpdateDBRequest {
    fn from(api: CompanyUpdate) -> Self {
        let (min_cgpa, max_backlogs, allowed_branches, allowed_batches) = match api.eligibility {
            Some(e) => (Some(e.min_cgpa), Some(e.max_backlogs), Some(e.allowed_branches), Some(e.allowed_batches)),
            None => (None, None, None, None),
        };
        Self {
            name: api.name,
            description: api.description,
            package_lpa: api.package_lpa,
            min_cgpa,
            max_backlogs,
            allowed_branches,
            allowed_batches,
        }
    }
}

/// Database response for a company row
#[derive(Debug, Clone, FromRow)]
pub struct CompanyDBResponse {
    pub id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    pub package_lpa: Option<f64>,
    pub min_cgpa: f64,
    pub max_backlogs: i32,
    pub allowed_branches: Vec<String>,
    pub allowed_batches: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyDBResponse {
    /// Criteria view over the inline eligibility columns.
    pub fn criteria(&self) -> EligibilityCriteria {
        EligibilityCriteria {
            min_cgpa: self.min_cgpa,
            max_backlogs: self.max_backlogs,
            allowed_branches: self.allowed_branches.clone(),
            allowed_batches: self.allowed_batches.clone(),
        }
    }
}
