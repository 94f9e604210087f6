//! Handlers for the notifications API.

use crate::AppState;
use crate::api::models::{
    envelope::{ApiListResponse, ApiResponse},
    notifications::{ListNotificationsQuery, NotificationCreate, NotificationResponse},
    pagination::PageMeta,
};
use crate::db::handlers::{
    Repository,
    notifications::{NotificationFilter, Notifications},
    users::Users,
};
use crate::db::models::notifications::NotificationCreateDBRequest;
use crate::errors::{Error, Result};
use crate::types::{NotificationId, UserId};
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};
use serde_json::{Value, json};

/// Send a notification to a user.
///
/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    Json(data): Json<NotificationCreate>,
) -> Result<(StatusCode, Json<ApiResponse<NotificationResponse>>)> {
    if data.title.trim().is_empty() {
        return Err(Error::bad_request("Title cannot be empty"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Users::new(&mut conn)
        .get_by_id(data.user_id)
        .await?
        .ok_or_else(|| Error::not_found("User", data.user_id))?;

    let mut repo = Notifications::new(&mut conn);
    let notification = repo.create(&NotificationCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Notification sent",
            NotificationResponse::from(notification),
        )),
    ))
}

/// A user's notifications, newest first.
///
/// GET /api/users/{user_id}/notifications
pub async fn list_user_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ApiListResponse<NotificationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Users::new(&mut conn)
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::not_found("User", user_id))?;

    let mut repo = Notifications::new(&mut conn);
    let (skip, limit) = query.pagination.params();
    let filter = NotificationFilter {
        user_id,
        unread_only: query.unread,
        skip,
        limit,
    };

    let total = repo.count(&filter).await?;
    let notifications = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Notifications retrieved",
        notifications.into_iter().map(NotificationResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Mark one notification read.
///
/// PUT /api/notifications/{id}/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<Json<ApiResponse<NotificationResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Notifications::new(&mut conn);

    let notification = repo
        .mark_read(id)
        .await?
        .ok_or_else(|| Error::not_found("Notification", id))?;
    Ok(Json(ApiResponse::new(
        "Notification marked read",
        NotificationResponse::from(notification),
    )))
}

/// Mark all of a user's notifications read.
///
/// PUT /api/users/{user_id}/notifications/read-all
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<Value>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    Users::new(&mut conn)
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::not_found("User", user_id))?;

    let mut repo = Notifications::new(&mut conn);
    let updated = repo.mark_all_read(user_id).await?;
    Ok(Json(ApiResponse::new(
        "Notifications marked read",
        json!({"updated": updated}),
    )))
}

/// Delete a notification.
///
/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<NotificationId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Notifications::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Notification", id));
    }
    Ok(Json(ApiResponse::new("Notification deleted", ())))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_user, notify};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_send_and_list_notifications(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let user = create_test_user(&pool, "student").await;
        let response = app
            .post("/api/notifications")
            .json(&json!({
                "user_id": user.id,
                "title": "Shortlisted",
                "body": "You were shortlisted by Acme"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["read"], false);

        let response = app.get(&format!("/api/users/{}/notifications", user.id)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unread_filter_and_mark_read(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let user = create_test_user(&pool, "student").await;
        let first = notify(&pool, user.id, "First").await;
        notify(&pool, user.id, "Second").await;

        let response = app
            .put(&format!("/api/notifications/{}/read", first.id))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["read"], true);

        let response = app.get(&format!("/api/users/{}/notifications?unread=true", user.id)).await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["title"], "Second");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_mark_all_read_reports_count(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        let user = create_test_user(&pool, "student").await;
        for title in ["A", "B", "C"] {
            notify(&pool, user.id, title).await;
        }

        let response = app.put(&format!("/api/users/{}/notifications/read-all", user.id)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["updated"], 3);

        // Second call is a no-op
        let response = app.put(&format!("/api/users/{}/notifications/read-all", user.id)).await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["updated"], 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_notification_for_missing_user_is_404(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/api/notifications")
            .json(&json!({"user_id": uuid::Uuid::new_v4(), "title": "Hi", "body": "There"}))
            .await;
        response.assert_status_not_found();
    }
}
