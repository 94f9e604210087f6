//! Handlers for the recruitment rounds API.
//!
//! Rounds are nested under their company for creation and listing; individual
//! rounds are addressed directly.

use crate::AppState;
use crate::api::models::{
    envelope::ApiResponse,
    rounds::{RoundCreate, RoundResponse, RoundStatusUpdate, RoundUpdate},
};
use crate::db::handlers::{
    Repository,
    companies::Companies,
    rounds::{RecruitmentRounds, RoundFilter},
};
use crate::db::models::rounds::{RoundCreateDBRequest, RoundUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::{CompanyId, RoundId};
use crate::api::extractors::{Json, Path};
use axum::{extract::State, http::StatusCode};

/// Add a round to a company's recruitment process.
///
/// POST /api/companies/{company_id}/rounds
pub async fn create_round(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
    Json(data): Json<RoundCreate>,
) -> Result<(StatusCode, Json<ApiResponse<RoundResponse>>)> {
    if data.round_number < 1 {
        return Err(Error::bad_request("Round number must be positive"));
    }
    if data.name.trim().is_empty() {
        return Err(Error::bad_request("Round name cannot be empty"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Companies::new(&mut conn)
        .get_by_id(company_id)
        .await?
        .ok_or_else(|| Error::not_found("Company", company_id))?;

    let mut repo = RecruitmentRounds::new(&mut conn);
    let round = repo.create(&RoundCreateDBRequest::from_api(company_id, data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Round created", RoundResponse::from(round))),
    ))
}

/// A company's rounds in process order.
///
/// GET /api/companies/{company_id}/rounds
pub async fn list_company_rounds(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
) -> Result<Json<ApiResponse<Vec<RoundResponse>>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Companies::new(&mut conn)
        .get_by_id(company_id)
        .await?
        .ok_or_else(|| Error::not_found("Company", company_id))?;

    let mut repo = RecruitmentRounds::new(&mut conn);
    let rounds = repo
        .list(&RoundFilter {
            company_id: Some(company_id),
        })
        .await?;

    Ok(Json(ApiResponse::new(
        "Rounds retrieved",
        rounds.into_iter().map(RoundResponse::from).collect(),
    )))
}

/// Get a single round by ID.
///
/// GET /api/rounds/{id}
pub async fn get_round(
    State(state): State<AppState>,
    Path(id): Path<RoundId>,
) -> Result<Json<ApiResponse<RoundResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = RecruitmentRounds::new(&mut conn);

    let round = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Round", id))?;
    Ok(Json(ApiResponse::new("Round retrieved", RoundResponse::from(round))))
}

/// Update a round's details.
///
/// PUT /api/rounds/{id}
pub async fn update_round(
    State(state): State<AppState>,
    Path(id): Path<RoundId>,
    Json(data): Json<RoundUpdate>,
) -> Result<Json<ApiResponse<RoundResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = RecruitmentRounds::new(&mut conn);

    let round = repo.update(id, &RoundUpdateDBRequest::from(data)).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::not_found("Round", id),
        other => Error::Database(other),
    })?;
    Ok(Json(ApiResponse::new("Round updated", RoundResponse::from(round))))
}

/// Move a round through its schedule.
///
/// PUT /api/rounds/{id}/status
pub async fn update_round_status(
    State(state): State<AppState>,
    Path(id): Path<RoundId>,
    Json(data): Json<RoundStatusUpdate>,
) -> Result<Json<ApiResponse<RoundResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = RecruitmentRounds::new(&mut conn);

    let request = RoundUpdateDBRequest {
        status: Some(data.status),
        ..Default::default()
    };
    let round = repo.update(id, &request).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::not_found("Round", id),
        other => Error::Database(other),
    })?;
    Ok(Json(ApiResponse::new("Round status updated", RoundResponse::from(round))))
}

/// Remove a round.
///
/// DELETE /api/rounds/{id}
pub async fn delete_round(
    State(state): State<AppState>,
    Path(id): Path<RoundId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = RecruitmentRounds::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Round", id));
    }
    Ok(Json(ApiResponse::new("Round deleted", ())))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_company};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_rounds_listed_in_process_order(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        for (number, name, kind) in [(2, "Technical Interview", "technical"), (1, "Online Test", "aptitude"), (3, "HR Round", "hr")] {
            app.post(&format!("/api/companies/{}/rounds", company.id))
                .json(&json!({"round_number": number, "name": name, "round_type": kind}))
                .await
                .assert_status(axum::http::StatusCode::CREATED);
        }

        let response = app.get(&format!("/api/companies/{}/rounds", company.id)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let names: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Online Test", "Technical Interview", "HR Round"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_round_number_conflict(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        let payload = json!({"round_number": 1, "name": "Online Test", "round_type": "aptitude"});
        app.post(&format!("/api/companies/{}/rounds", company.id))
            .json(&payload)
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = app.post(&format!("/api/companies/{}/rounds", company.id)).json(&payload).await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_round_status_lifecycle(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        let response = app
            .post(&format!("/api/companies/{}/rounds", company.id))
            .json(&json!({"round_number": 1, "name": "Coding Round", "round_type": "coding"}))
            .await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["status"], "scheduled");
        let round_id = body["data"]["id"].as_str().unwrap().to_string();

        for status in ["ongoing", "completed"] {
            let response = app
                .put(&format!("/api/rounds/{round_id}/status"))
                .json(&json!({"status": status}))
                .await;
            response.assert_status_ok();
            let body: serde_json::Value = response.json();
            assert_eq!(body["data"]["status"], status);
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_invalid_round_number_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        let response = app
            .post(&format!("/api/companies/{}/rounds", company.id))
            .json(&json!({"round_number": 0, "name": "Bad", "round_type": "hr"}))
            .await;
        response.assert_status_bad_request();
    }
}
