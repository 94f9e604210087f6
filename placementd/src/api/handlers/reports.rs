//! Handlers for the dashboard and report endpoints.

use crate::AppState;
use crate::api::models::{
    envelope::ApiResponse,
    reports::{BranchReport, CompanyReport, DashboardOverview},
};
use crate::db::handlers::analytics::Analytics;
use crate::errors::{Error, Result};
use crate::api::extractors::Json;
use axum::extract::State;
use chrono::Utc;

/// Placement cell overview counters.
///
/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<ApiResponse<DashboardOverview>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut analytics = Analytics::new(&mut conn);

    let counts = analytics.dashboard(Utc::now()).await?;
    let overview = DashboardOverview {
        total_students: counts.total_students,
        placed_students: counts.placed_students,
        total_companies: counts.total_companies,
        total_applications: counts.total_applications,
        open_windows: counts.open_windows,
        applications_by_status: counts
            .applications_by_status
            .into_iter()
            .map(|(status, count)| (status.to_string(), count))
            .collect(),
    };

    Ok(Json(ApiResponse::new("Dashboard retrieved", overview)))
}

/// Per-branch placement statistics.
///
/// GET /api/reports/branches
pub async fn get_branch_report(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<BranchReport>>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut analytics = Analytics::new(&mut conn);

    let rows = analytics.branch_report().await?;
    let report = rows
        .into_iter()
        .map(|row| BranchReport {
            branch: row.branch,
            total_students: row.total_students,
            placed_students: row.placed_students,
            average_cgpa: row.average_cgpa,
        })
        .collect();

    Ok(Json(ApiResponse::new("Branch report retrieved", report)))
}

/// Per-company application statistics.
///
/// GET /api/reports/companies
pub async fn get_company_report(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<CompanyReport>>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut analytics = Analytics::new(&mut conn);

    let rows = analytics.company_report().await?;
    let report = rows
        .into_iter()
        .map(|row| CompanyReport {
            company_id: row.company_id,
            company_name: row.company_name,
            total_applications: row.total_applications,
            shortlisted: row.shortlisted,
            selected: row.selected,
            rejected: row.rejected,
        })
        .collect();

    Ok(Json(ApiResponse::new("Company report retrieved", report)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{
        create_test_app, create_test_application, create_test_company, create_test_student, open_window_for,
    };
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_dashboard_on_empty_database(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.get("/api/dashboard").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["total_students"], 0);
        assert_eq!(body["data"]["total_applications"], 0);
        assert_eq!(body["data"]["applications_by_status"], json!({}));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_dashboard_counts(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let application = create_test_application(&pool).await;
        app.put(&format!("/api/applications/{}/status", application.id))
            .json(&json!({"status": "under-review"}))
            .await
            .assert_status_ok();

        let response = app.get("/api/dashboard").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["total_students"], 1);
        assert_eq!(body["data"]["total_companies"], 1);
        assert_eq!(body["data"]["total_applications"], 1);
        assert_eq!(body["data"]["open_windows"], 1);
        assert_eq!(body["data"]["applications_by_status"]["under-review"], 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_branch_report_aggregates(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        create_test_student(&pool, "21CS001", "CSE", 2026, 8.0, 0).await;
        create_test_student(&pool, "21CS002", "CSE", 2026, 6.0, 1).await;
        create_test_student(&pool, "21ME001", "MECH", 2026, 7.5, 0).await;

        let response = app.get("/api/reports/branches").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let branches = body["data"].as_array().unwrap();
        assert_eq!(branches.len(), 2);
        // Alphabetical: CSE before MECH
        assert_eq!(branches[0]["branch"], "CSE");
        assert_eq!(branches[0]["total_students"], 2);
        assert_eq!(branches[0]["average_cgpa"], 7.0);
        assert_eq!(branches[1]["branch"], "MECH");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_company_report_includes_companies_without_applications(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let idle = create_test_company(&pool, "Idle Corp", 0.0, 10, &[], &[]).await;
        let busy = create_test_company(&pool, "Busy Corp", 0.0, 10, &[], &[]).await;
        open_window_for(&pool, busy.id).await;
        let student = create_test_student(&pool, "21CS001", "CSE", 2026, 8.0, 0).await;
        app.post("/api/applications")
            .json(&json!({"student_id": student.id, "company_id": busy.id}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = app.get("/api/reports/companies").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let companies = body["data"].as_array().unwrap();
        assert_eq!(companies.len(), 2);
        let idle_row = companies.iter().find(|c| c["company_id"] == idle.id.to_string()).unwrap();
        assert_eq!(idle_row["total_applications"], 0);
        let busy_row = companies.iter().find(|c| c["company_id"] == busy.id.to_string()).unwrap();
        assert_eq!(busy_row["total_applications"], 1);
    }
}
