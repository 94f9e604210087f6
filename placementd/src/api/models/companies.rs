//! API request/response models for recruiting companies.

use super::pagination::Pagination;
use crate::db::models::companies::CompanyDBResponse;
use crate::types::CompanyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters for listing companies
#[derive(Debug, Default, Deserialize)]
pub struct ListCompaniesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    pub pagination: Pagination,

    /// Search query matched against the company name (case-insensitive substring)
    pub q: Option<String>,
}

/// Company-defined eligibility thresholds a student must satisfy to apply.
///
/// Each criterion is evaluated independently. Empty `allowed_branches` or
/// `allowed_batches` means no restriction on that axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    #[serde(default)]
    pub min_cgpa: f64,
    #[serde(default)]
    pub max_backlogs: i32,
    #[serde(default)]
    pub allowed_branches: Vec<String>,
    #[serde(default)]
    pub allowed_batches: Vec<i32>,
}

/// Request body for creating a new company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub description: Option<String>,
    /// Offered package in lakhs per annum
    pub package_lpa: Option<f64>,
    #[serde(default)]
    pub eligibility: EligibilityCriteria,
}

/// Request body for updating a company. All fields are optional;
/// only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub package_lpa: Option<f64>,
    pub eligibility: Option<EligibilityCriteria>,
}

/// Full company details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    pub package_lpa: Option<f64>,
    pub eligibility: EligibilityCriteria,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompanyDBResponse> for CompanyResponse {
    fn from(db: CompanyDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            package_lpa: db.package_lpa,
            eligibility: EligibilityCriteria {
                min_cgpa: db.min_cgpa,
                max_backlogs: db.max_backlogs,
                allowed_branches: db.allowed_branches,
                allowed_batches: db.allowed_batches,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
