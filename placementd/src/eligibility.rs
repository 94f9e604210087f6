//! Eligibility rule evaluation.
//!
//! Companies define a set of independent thresholds (minimum CGPA, maximum
//! backlog count, allowed branches, allowed batches). A student must satisfy
//! every criterion to be eligible; each criterion is reported separately so
//! the caller can show exactly which checks failed.

use crate::api::models::companies::EligibilityCriteria;
use crate::db::models::students::StudentDBResponse;
use serde::{Deserialize, Serialize};

/// Outcome of a single eligibility criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: String,
    pub passed: bool,
    pub detail: String,
}

/// Full eligibility evaluation for one student against one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub criteria: Vec<CriterionResult>,
}

impl EligibilityReport {
    /// Criteria that failed, for building validation error responses.
    pub fn failures(&self) -> impl Iterator<Item = &CriterionResult> {
        self.criteria.iter().filter(|c| !c.passed)
    }
}

/// Evaluate a company's criteria against a student.
///
/// Criteria do not interact: each comparison stands alone. An empty
/// `allowed_branches` or `allowed_batches` list means that axis is
/// unrestricted.
pub fn evaluate(criteria: &EligibilityCriteria, student: &StudentDBResponse) -> EligibilityReport {
    let mut results = Vec::with_capacity(4);

    let cgpa_ok = student.cgpa >= criteria.min_cgpa;
    results.push(CriterionResult {
        criterion: "cgpa".to_string(),
        passed: cgpa_ok,
        detail: format!("requires CGPA >= {:.2}, student has {:.2}", criteria.min_cgpa, student.cgpa),
    });

    let backlogs_ok = student.backlogs <= criteria.max_backlogs;
    results.push(CriterionResult {
        criterion: "backlogs".to_string(),
        passed: backlogs_ok,
        detail: format!(
            "allows at most {} active backlogs, student has {}",
            criteria.max_backlogs, student.backlogs
        ),
    });

    let branch_ok = criteria.allowed_branches.is_empty() || criteria.allowed_branches.contains(&student.branch);
    results.push(CriterionResult {
        criterion: "branch".to_string(),
        passed: branch_ok,
        detail: if criteria.allowed_branches.is_empty() {
            "all branches are eligible".to_string()
        } else {
            format!(
                "allowed branches: {}, student branch: {}",
                criteria.allowed_branches.join(", "),
                student.branch
            )
        },
    });

    let batch_ok = criteria.allowed_batches.is_empty() || criteria.allowed_batches.contains(&student.batch);
    results.push(CriterionResult {
        criterion: "batch".to_string(),
        passed: batch_ok,
        detail: if criteria.allowed_batches.is_empty() {
            "all batches are eligible".to_string()
        } else {
            format!(
                "allowed batches: {}, student batch: {}",
                criteria
                    .allowed_batches
                    .iter()
                    .map(|b| b.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                student.batch
            )
        },
    });

    EligibilityReport {
        eligible: results.iter().all(|r| r.passed),
        criteria: results,
    }
}
