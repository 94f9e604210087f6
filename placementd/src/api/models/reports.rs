//! Response models for the dashboard and report endpoints.
//!
//! These are shaped directly from aggregation query rows in
//! [`crate::db::handlers::analytics`].

use crate::types::CompanyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level counters for the placement cell dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_students: i64,
    pub placed_students: i64,
    pub total_companies: i64,
    pub total_applications: i64,
    pub open_windows: i64,
    /// Application counts keyed by status wire name ("submitted", ...)
    pub applications_by_status: BTreeMap<String, i64>,
}

/// Per-branch placement statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchReport {
    pub branch: String,
    pub total_students: i64,
    pub placed_students: i64,
    pub average_cgpa: f64,
}

/// Per-company application statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReport {
    pub company_id: CompanyId,
    pub company_name: String,
    pub total_applications: i64,
    pub shortlisted: i64,
    pub selected: i64,
    pub rejected: i64,
}
