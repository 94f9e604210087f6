//! Aggregation queries for the dashboard and report endpoints.
//!
//! Read-only; no repository trait. Counters are computed per request rather
//! than maintained incrementally.

use crate::api::models::applications::ApplicationStatus;
use crate::db::errors::Result;
use crate::types::CompanyId;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

/// Dashboard counters, one row-less aggregate per field.
#[derive(Debug, Clone)]
pub struct DashboardCounts {
    pub total_students: i64,
    pub placed_students: i64,
    pub total_companies: i64,
    pub total_applications: i64,
    pub open_windows: i64,
    pub applications_by_status: Vec<(ApplicationStatus, i64)>,
}

/// Aggregate row for one branch.
#[derive(Debug, Clone, FromRow)]
pub struct BranchReportRow {
    pub branch: String,
    pub total_students: i64,
    pub placed_students: i64,
    pub average_cgpa: f64,
}

/// Aggregate row for one company's applications.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyReportRow {
    pub company_id: CompanyId,
    pub company_name: String,
    pub total_applications: i64,
    pub shortlisted: i64,
    pub selected: i64,
    pub rejected: i64,
}

pub struct Analytics<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Analytics<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn dashboard(&mut self, now: DateTime<Utc>) -> Result<DashboardCounts> {
        let (total_students, placed_students): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE placed) FROM students",
        )
        .fetch_one(&mut *self.db)
        .await?;

        let total_companies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&mut *self.db)
            .await?;

        let total_applications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&mut *self.db)
            .await?;

        let open_windows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM application_windows WHERE starts_at <= $1 AND ends_at > $1",
        )
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;

        let applications_by_status: Vec<(ApplicationStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM applications GROUP BY status",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(DashboardCounts {
            total_students,
            placed_students,
            total_companies,
            total_applications,
            open_windows,
            applications_by_status,
        })
    }

    /// Placement statistics grouped by branch, alphabetical.
    #[instrument(skip(self), err)]
    pub async fn branch_report(&mut self) -> Result<Vec<BranchReportRow>> {
        let rows = sqlx::query_as::<_, BranchReportRow>(
            r#"
            SELECT
                branch,
                COUNT(*) AS total_students,
                COUNT(*) FILTER (WHERE placed) AS placed_students,
                AVG(cgpa) AS average_cgpa
            FROM students
            GROUP BY branch
            ORDER BY branch
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;
        Ok(rows)
    }

    /// Application statistics per company. Companies with no applications
    /// still appear, with zero counts.
    #[instrument(skip(self), err)]
    pub async fn company_report(&mut self) -> Result<Vec<CompanyReportRow>> {
        let rows = sqlx::query_as::<_, CompanyReportRow>(
            r#"
            SELECT
                c.id AS company_id,
                c.name AS company_name,
                COUNT(a.id) AS total_applications,
                COUNT(a.id) FILTER (WHERE a.status = 'shortlisted') AS shortlisted,
                COUNT(a.id) FILTER (WHERE a.status = 'selected') AS selected,
                COUNT(a.id) FILTER (WHERE a.status = 'rejected') AS rejected
            FROM companies c
            LEFT JOIN applications a ON a.company_id = c.id
            GROUP BY c.id, c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;
        Ok(rows)
    }
}
