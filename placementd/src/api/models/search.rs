//! Request/response models for the global search endpoint.

use super::{companies::CompanyResponse, students::StudentResponse};
use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against student names, roll numbers
    /// and company names
    pub q: Option<String>,
}

/// Combined search results across entity types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub students: Vec<StudentResponse>,
    pub companies: Vec<CompanyResponse>,
}
