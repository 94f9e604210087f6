//! Handlers for the applications API.
//!
//! Submitting an application enforces three gates in order: both parties must
//! exist, the company must have an open application window, and the student
//! must pass the company's eligibility criteria. Failures report which gate
//! rejected the request.

use crate::AppState;
use crate::api::models::{
    applications::{
        ApplicationCreate, ApplicationResponse, ListApplicationsQuery, ReviewResponse, StatusUpdate,
    },
    envelope::{ApiListResponse, ApiResponse},
    pagination::PageMeta,
};
use crate::db::handlers::{
    Repository,
    application_windows::ApplicationWindows,
    applications::{ApplicationFilter, Applications},
    companies::Companies,
    students::Students,
};
use crate::db::models::applications::{ApplicationCreateDBRequest, StatusUpdateDBRequest};
use crate::eligibility;
use crate::errors::{Error, FieldError, Result};
use crate::types::ApplicationId;
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;

/// Submit an application.
///
/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    Json(data): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationResponse>>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let student = Students::new(&mut conn)
        .get_by_id(data.student_id)
        .await?
        .ok_or_else(|| Error::not_found("Student", data.student_id))?;
    let company = Companies::new(&mut conn)
        .get_by_id(data.company_id)
        .await?
        .ok_or_else(|| Error::not_found("Company", data.company_id))?;

    let open = ApplicationWindows::new(&mut conn)
        .is_open_for(company.id, Utc::now())
        .await?;
    if !open {
        return Err(Error::bad_request("The company is not currently accepting applications"));
    }

    let report = eligibility::evaluate(&company.criteria(), &student);
    if !report.eligible {
        return Err(Error::Validation {
            message: "The student does not meet the eligibility criteria".to_string(),
            errors: report
                .failures()
                .map(|c| FieldError::new(c.criterion.clone(), c.detail.clone()))
                .collect(),
        });
    }

    let mut repo = Applications::new(&mut conn);
    let application = repo.create(&ApplicationCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Application submitted",
            ApplicationResponse::from(application),
        )),
    ))
}

/// List applications with filtering and pagination.
///
/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<ApiListResponse<ApplicationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let filter = ApplicationFilter {
        student_id: query.student_id,
        company_id: query.company_id,
        status: query.status,
        skip,
        limit,
    };

    let total = repo.count(&filter).await?;
    let applications = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Applications retrieved",
        applications.into_iter().map(ApplicationResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Get a single application by ID.
///
/// GET /api/applications/{id}
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApiResponse<ApplicationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let application = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Application", id))?;
    Ok(Json(ApiResponse::new(
        "Application retrieved",
        ApplicationResponse::from(application),
    )))
}

/// Change an application's status and record the change in its history.
///
/// PUT /api/applications/{id}/status
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
    Json(data): Json<StatusUpdate>,
) -> Result<Json<ApiResponse<ApplicationResponse>>> {
    if let Some(score) = data.score
        && !(0..=100).contains(&score)
    {
        return Err(Error::Validation {
            message: "Validation failed".to_string(),
            errors: vec![FieldError::new("score", "must be between 0 and 100")],
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let request = StatusUpdateDBRequest {
        status: data.status,
        score: data.score,
        note: data.note,
    };
    let application = repo.update(id, &request).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::not_found("Application", id),
        other => Error::Database(other),
    })?;
    Ok(Json(ApiResponse::new(
        "Application status updated",
        ApplicationResponse::from(application),
    )))
}

/// Review history for an application, newest first.
///
/// GET /api/applications/{id}/history
pub async fn get_application_history(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApiResponse<Vec<ReviewResponse>>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Application", id))?;
    let history = repo.history(id).await?;

    Ok(Json(ApiResponse::new(
        "History retrieved",
        history.into_iter().map(ReviewResponse::from).collect(),
    )))
}

/// Withdraw an application.
///
/// DELETE /api/applications/{id}
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Application", id));
    }
    Ok(Json(ApiResponse::new("Application withdrawn", ())))
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
    async fn test_submit_application(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let student = create_test_student(&pool, "21CS001", "CSE", 2026, 8.5, 0).await;
        let company = create_test_company(&pool, "Acme", 7.0, 1, &["CSE"], &[2026]).await;
        open_window_for(&pool, company.id).await;

        let response = app
            .post("/api/applications")
            .json(&json!({"student_id": student.id, "company_id": company.id}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "submitted");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_no_open_window_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let student = create_test_student(&pool, "21CS001", "CSE", 2026, 8.5, 0).await;
        let company = create_test_company(&pool, "Acme", 0.0, 10, &[], &[]).await;

        let response = app
            .post("/api/applications")
            .json(&json!({"student_id": student.id, "company_id": company.id}))
            .await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("not currently accepting"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_ineligible_student_rejected_with_criteria(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let student = create_test_student(&pool, "21CS001", "CSE", 2026, 6.0, 0).await;
        let company = create_test_company(&pool, "Acme", 7.5, 0, &[], &[]).await;
        open_window_for(&pool, company.id).await;

        let response = app
            .post("/api/applications")
            .json(&json!({"student_id": student.id, "company_id": company.id}))
            .await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0]["field"], "cgpa");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_application_conflict(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let student = create_test_student(&pool, "21CS001", "CSE", 2026, 8.5, 0).await;
        let company = create_test_company(&pool, "Acme", 0.0, 10, &[], &[]).await;
        open_window_for(&pool, company.id).await;

        let payload = json!({"student_id": student.id, "company_id": company.id});
        app.post("/api/applications").json(&payload).await.assert_status(axum::http::StatusCode::CREATED);

        let response = app.post("/api/applications").json(&payload).await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "The student has already applied to this company");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_student_is_404(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 10, &[], &[]).await;
        open_window_for(&pool, company.id).await;

        let response = app
            .post("/api/applications")
            .json(&json!({"student_id": uuid::Uuid::new_v4(), "company_id": company.id}))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_status_update_appends_history(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let application = create_test_application(&pool).await;

        let response = app
            .put(&format!("/api/applications/{}/status", application.id))
            .json(&json!({"status": "under-review", "note": "Resume looks good"}))
            .await;
        response.assert_status_ok();

        let response = app
            .put(&format!("/api/applications/{}/status", application.id))
            .json(&json!({"status": "shortlisted", "score": 85}))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "shortlisted");
        assert_eq!(body["data"]["score"], 85);

        let response = app.get(&format!("/api/applications/{}/history", application.id)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let history = body["data"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        // Newest first
        assert_eq!(history[0]["new_status"], "shortlisted");
        assert_eq!(history[0]["score"], 85);
        assert_eq!(history[1]["previous_status"], "submitted");
        assert_eq!(history[1]["new_status"], "under-review");
        assert_eq!(history[1]["note"], "Resume looks good");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_invalid_score_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let application = create_test_application(&pool).await;

        let response = app
            .put(&format!("/api/applications/{}/status", application.id))
            .json(&json!({"status": "shortlisted", "score": 150}))
            .await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["errors"][0]["field"], "score");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_applications_by_status(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let application = create_test_application(&pool).await;
        app.put(&format!("/api/applications/{}/status", application.id))
            .json(&json!({"status": "selected"}))
            .await
            .assert_status_ok();

        let response = app.get("/api/applications?status=selected").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["pagination"]["total"], 1);

        let response = app.get("/api/applications?status=rejected").await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["pagination"]["total"], 0);
    }
}
