//! Handlers for the off-campus opportunities board.

use crate::AppState;
use crate::api::models::{
    envelope::{ApiListResponse, ApiResponse},
    off_campus::{ListOpportunitiesQuery, OpportunityCreate, OpportunityResponse, OpportunityUpdate},
    pagination::PageMeta,
};
use crate::db::handlers::{
    Repository,
    off_campus::{OffCampusOpportunities, OpportunityFilter},
};
use crate::db::models::off_campus::{OpportunityCreateDBRequest, OpportunityUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::OpportunityId;
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};

/// Post an off-campus opportunity.
///
/// POST /api/off-campus
pub async fn create_opportunity(
    State(state): State<AppState>,
    Json(data): Json<OpportunityCreate>,
) -> Result<(StatusCode, Json<ApiResponse<OpportunityResponse>>)> {
    if data.title.trim().is_empty() {
        return Err(Error::bad_request("Title cannot be empty"));
    }
    if data.company_name.trim().is_empty() {
        return Err(Error::bad_request("Company name cannot be empty"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = OffCampusOpportunities::new(&mut conn);

    let opportunity = repo.create(&OpportunityCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Opportunity posted", OpportunityResponse::from(opportunity))),
    ))
}

/// List opportunities, newest first.
///
/// GET /api/off-campus
pub async fn list_opportunities(
    State(state): State<AppState>,
    Query(query): Query<ListOpportunitiesQuery>,
) -> Result<Json<ApiListResponse<OpportunityResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = OffCampusOpportunities::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let filter = OpportunityFilter { q: query.q, skip, limit };

    let total = repo.count(&filter).await?;
    let opportunities = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Opportunities retrieved",
        opportunities.into_iter().map(OpportunityResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Get a single opportunity by ID.
///
/// GET /api/off-campus/{id}
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<OpportunityId>,
) -> Result<Json<ApiResponse<OpportunityResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = OffCampusOpportunities::new(&mut conn);

    let opportunity = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Opportunity", id))?;
    Ok(Json(ApiResponse::new(
        "Opportunity retrieved",
        OpportunityResponse::from(opportunity),
    )))
}

/// Update an opportunity.
///
/// PUT /api/off-campus/{id}
pub async fn update_opportunity(
    State(state): State<AppState>,
    Path(id): Path<OpportunityId>,
    Json(data): Json<OpportunityUpdate>,
) -> Result<Json<ApiResponse<OpportunityResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = OffCampusOpportunities::new(&mut conn);

    let opportunity = repo
        .update(id, &OpportunityUpdateDBRequest::from(data))
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::not_found("Opportunity", id),
            other => Error::Database(other),
        })?;
    Ok(Json(ApiResponse::new("Opportunity updated", OpportunityResponse::from(opportunity))))
}

/// Take an opportunity down.
///
/// DELETE /api/off-campus/{id}
pub async fn delete_opportunity(
    State(state): State<AppState>,
    Path(id): Path<OpportunityId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = OffCampusOpportunities::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Opportunity", id));
    }
    Ok(Json(ApiResponse::new("Opportunity deleted", ())))
}
