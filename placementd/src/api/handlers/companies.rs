//! Handlers for the companies API, including the eligibility check endpoint.

use crate::AppState;
use crate::api::models::{
    companies::{CompanyCreate, CompanyResponse, CompanyUpdate, ListCompaniesQuery},
    envelope::{ApiListResponse, ApiResponse},
    pagination::PageMeta,
};
use crate::db::handlers::{
    Repository,
    companies::{Companies, CompanyFilter},
    students::Students,
};
use crate::db::models::companies::{CompanyCreateDBRequest, CompanyUpdateDBRequest};
use crate::eligibility::{self, EligibilityReport};
use crate::errors::{Error, Result};
use crate::types::{CompanyId, StudentId};
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};

/// Register a recruiting company.
///
/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    Json(data): Json<CompanyCreate>,
) -> Result<(StatusCode, Json<ApiResponse<CompanyResponse>>)> {
    if data.name.trim().is_empty() {
        return Err(Error::bad_request("Company name cannot be empty"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Companies::new(&mut conn);

    let company = repo.create(&CompanyCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Company created", CompanyResponse::from(company))),
    ))
}

/// List companies with optional name search.
///
/// GET /api/companies
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<ApiListResponse<CompanyResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Companies::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let filter = CompanyFilter { q: query.q, skip, limit };

    let total = repo.count(&filter).await?;
    let companies = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Companies retrieved",
        companies.into_iter().map(CompanyResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Get a single company by ID.
///
/// GET /api/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<ApiResponse<CompanyResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Companies::new(&mut conn);

    let company = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Company", id))?;
    Ok(Json(ApiResponse::new("Company retrieved", CompanyResponse::from(company))))
}

/// Update a company. Supplying `eligibility` replaces the criteria wholesale.
///
/// PUT /api/companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<CompanyId>,
    Json(data): Json<CompanyUpdate>,
) -> Result<Json<ApiResponse<CompanyResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Companies::new(&mut conn);

    let company = repo
        .update(id, &CompanyUpdateDBRequest::from(data))
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::not_found("Company", id),
            other => Error::Database(other),
        })?;
    Ok(Json(ApiResponse::new("Company updated", CompanyResponse::from(company))))
}

/// Delete a company. Its applications, windows, and rounds are removed too.
///
/// DELETE /api/companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Companies::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Company", id));
    }
    Ok(Json(ApiResponse::new("Company deleted", ())))
}

/// Evaluate whether a student meets a company's eligibility criteria.
///
/// Returns the per-criterion breakdown without creating anything.
///
/// GET /api/companies/{id}/eligibility/{student_id}
pub async fn check_eligibility(
    State(state): State<AppState>,
    Path((company_id, student_id)): Path<(CompanyId, StudentId)>,
) -> Result<Json<ApiResponse<EligibilityReport>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let company = Companies::new(&mut conn)
        .get_by_id(company_id)
        .await?
        .ok_or_else(|| Error::not_found("Company", company_id))?;
    let student = Students::new(&mut conn)
        .get_by_id(student_id)
        .await?
        .ok_or_else(|| Error::not_found("Student", student_id))?;

    let report = eligibility::evaluate(&company.criteria(), &student);
    Ok(Json(ApiResponse::new("Eligibility evaluated", report)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_company, create_test_student};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_company_with_criteria(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/api/companies")
            .json(&json!({
                "name": "Acme Corp",
                "package_lpa": 12.5,
                "eligibility": {
                    "min_cgpa": 7.0,
                    "max_backlogs": 1,
                    "allowed_branches": ["CSE", "ECE"],
                    "allowed_batches": [2026]
                }
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["eligibility"]["min_cgpa"], 7.0);
        assert_eq!(body["data"]["eligibility"]["allowed_branches"][0], "CSE");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_criteria_default_to_unrestricted(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.post("/api/companies").json(&json!({"name": "Open Hiring Inc"})).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["eligibility"]["min_cgpa"], 0.0);
        assert_eq!(body["data"]["eligibility"]["allowed_branches"].as_array().unwrap().len(), 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_companies_by_name(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        create_test_company(&pool, "Globex", 7.0, 0, &[], &[]).await;
        create_test_company(&pool, "Initech", 6.0, 2, &[], &[]).await;

        let response = app.get("/api/companies?q=glo").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["name"], "Globex");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_eligibility_endpoint_reports_failures(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 8.0, 0, &["CSE"], &[]).await;
        let student = create_test_student(&pool, "21ME001", "MECH", 2026, 7.0, 1).await;

        let response = app
            .get(&format!("/api/companies/{}/eligibility/{}", company.id, student.id))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["eligible"], false);
        let failed: Vec<_> = body["data"]["criteria"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|c| c["passed"] == false)
            .map(|c| c["criterion"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(failed, vec!["cgpa", "backlogs", "branch"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_eligibility_missing_student_is_404(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        let response = app
            .get(&format!("/api/companies/{}/eligibility/{}", company.id, uuid::Uuid::new_v4()))
            .await;
        response.assert_status_not_found();
    }
}
