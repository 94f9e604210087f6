//! Handlers for the application windows API.

use crate::AppState;
use crate::api::models::{
    application_windows::{ListWindowsQuery, OpenWindowsQuery, WindowCreate, WindowResponse, WindowUpdate},
    envelope::{ApiListResponse, ApiResponse},
    pagination::PageMeta,
};
use crate::db::handlers::{
    Repository,
    application_windows::{ApplicationWindows, WindowFilter},
    companies::Companies,
};
use crate::db::models::application_windows::{WindowCreateDBRequest, WindowUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::WindowId;
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;

/// Open an application window for a company.
///
/// POST /api/application-windows
pub async fn create_window(
    State(state): State<AppState>,
    Json(data): Json<WindowCreate>,
) -> Result<(StatusCode, Json<ApiResponse<WindowResponse>>)> {
    if data.ends_at <= data.starts_at {
        return Err(Error::bad_request("Window must end after it starts"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Companies::new(&mut conn)
        .get_by_id(data.company_id)
        .await?
        .ok_or_else(|| Error::not_found("Company", data.company_id))?;

    let mut repo = ApplicationWindows::new(&mut conn);
    let window = repo.create(&WindowCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Application window created", WindowResponse::from(window))),
    ))
}

/// List application windows.
///
/// GET /api/application-windows
pub async fn list_windows(
    State(state): State<AppState>,
    Query(query): Query<ListWindowsQuery>,
) -> Result<Json<ApiListResponse<WindowResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ApplicationWindows::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let filter = WindowFilter {
        company_id: query.company_id,
        skip,
        limit,
    };

    let total = repo.count(&filter).await?;
    let windows = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Application windows retrieved",
        windows.into_iter().map(WindowResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Windows that are open right now.
///
/// GET /api/application-windows/open
pub async fn list_open_windows(
    State(state): State<AppState>,
    Query(query): Query<OpenWindowsQuery>,
) -> Result<Json<ApiResponse<Vec<WindowResponse>>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ApplicationWindows::new(&mut conn);

    let windows = repo.open_at(Utc::now(), query.company_id).await?;
    Ok(Json(ApiResponse::new(
        "Open windows retrieved",
        windows.into_iter().map(WindowResponse::from).collect(),
    )))
}

/// Get a single window by ID.
///
/// GET /api/application-windows/{id}
pub async fn get_window(
    State(state): State<AppState>,
    Path(id): Path<WindowId>,
) -> Result<Json<ApiResponse<WindowResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ApplicationWindows::new(&mut conn);

    let window = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found("Application window", id))?;
    Ok(Json(ApiResponse::new("Application window retrieved", WindowResponse::from(window))))
}

/// Update a window's bounds or note.
///
/// PUT /api/application-windows/{id}
pub async fn update_window(
    State(state): State<AppState>,
    Path(id): Path<WindowId>,
    Json(data): Json<WindowUpdate>,
) -> Result<Json<ApiResponse<WindowResponse>>> {
    if let (Some(starts_at), Some(ends_at)) = (data.starts_at, data.ends_at)
        && ends_at <= starts_at
    {
        return Err(Error::bad_request("Window must end after it starts"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ApplicationWindows::new(&mut conn);

    let window = repo
        .update(id, &WindowUpdateDBRequest::from(data))
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::not_found("Application window", id),
            other => Error::Database(other),
        })?;
    Ok(Json(ApiResponse::new("Application window updated", WindowResponse::from(window))))
}

/// Close and remove a window.
///
/// DELETE /api/application-windows/{id}
pub async fn delete_window(
    State(state): State<AppState>,
    Path(id): Path<WindowId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = ApplicationWindows::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Application window", id));
    }
    Ok(Json(ApiResponse::new("Application window deleted", ())))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_company, open_window_for};
    use chrono::{Duration, Utc};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_window(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        let response = app
            .post("/api/application-windows")
            .json(&json!({
                "company_id": company.id,
                "starts_at": Utc::now() - Duration::hours(1),
                "ends_at": Utc::now() + Duration::hours(1),
                "note": "On-campus drive"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["note"], "On-campus drive");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_inverted_range_rejected(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let company = create_test_company(&pool, "Acme", 0.0, 0, &[], &[]).await;
        let response = app
            .post("/api/application-windows")
            .json(&json!({
                "company_id": company.id,
                "starts_at": Utc::now() + Duration::hours(1),
                "ends_at": Utc::now() - Duration::hours(1)
            }))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_window_for_missing_company_is_404(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/api/application-windows")
            .json(&json!({
                "company_id": uuid::Uuid::new_v4(),
                "starts_at": Utc::now(),
                "ends_at": Utc::now() + Duration::hours(1)
            }))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_open_windows_excludes_past_and_future(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let current = create_test_company(&pool, "Current", 0.0, 0, &[], &[]).await;
        let past = create_test_company(&pool, "Past", 0.0, 0, &[], &[]).await;
        let future = create_test_company(&pool, "Future", 0.0, 0, &[], &[]).await;

        open_window_for(&pool, current.id).await;
        app.post("/api/application-windows")
            .json(&json!({
                "company_id": past.id,
                "starts_at": Utc::now() - Duration::days(7),
                "ends_at": Utc::now() - Duration::days(1)
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        app.post("/api/application-windows")
            .json(&json!({
                "company_id": future.id,
                "starts_at": Utc::now() + Duration::days(1),
                "ends_at": Utc::now() + Duration::days(7)
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = app.get("/api/application-windows/open").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let open = body["data"].as_array().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0]["company_id"], current.id.to_string());

        // But all three are in the full list
        let response = app.get("/api/application-windows").await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["pagination"]["total"], 3);
    }
}
