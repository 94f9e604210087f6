//! Handlers for the users API.

use crate::AppState;
use crate::api::models::{
    envelope::{ApiListResponse, ApiResponse},
    pagination::PageMeta,
    users::{ListUsersQuery, UserCreate, UserResponse, UserUpdate},
};
use crate::db::handlers::{
    Repository,
    users::{UserFilter, Users},
};
use crate::db::models::users::{UserCreateDBRequest, UserUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::UserId;
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};

/// Create a user account.
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<UserCreate>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    if data.email.trim().is_empty() {
        return Err(Error::bad_request("Email cannot be empty"));
    }
    if data.name.trim().is_empty() {
        return Err(Error::bad_request("Name cannot be empty"));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.create(&UserCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User created", UserResponse::from(user))),
    ))
}

/// List user accounts with optional role filtering.
///
/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiListResponse<UserResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let filter = UserFilter {
        role: query.role,
        skip,
        limit,
    };

    let total = repo.count(&filter).await?;
    let users = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Users retrieved",
        users.into_iter().map(UserResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Get a single user by ID.
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("User", id))?;
    Ok(Json(ApiResponse::new("User retrieved", UserResponse::from(user))))
}

/// Update a user.
///
/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(data): Json<UserUpdate>,
) -> Result<Json<ApiResponse<UserResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.update(id, &UserUpdateDBRequest::from(data)).await.map_err(|e| match e {
        crate::db::errors::DbError::NotFound => Error::not_found("User", id),
        other => Error::Database(other),
    })?;
    Ok(Json(ApiResponse::new("User updated", UserResponse::from(user))))
}

/// Delete a user.
///
/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("User", id));
    }
    Ok(Json(ApiResponse::new("User deleted", ())))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_user(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/api/users")
            .json(&json!({"email": "tpo@college.edu", "name": "Placement Officer", "role": "admin"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["role"], "admin");

        let id = body["data"]["id"].as_str().unwrap().to_string();
        let response = app.get(&format!("/api/users/{id}")).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["email"], "tpo@college.edu");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_role_defaults_to_student(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/api/users")
            .json(&json!({"email": "s1@college.edu", "name": "Student One"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["role"], "student");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_email_conflict(pool: PgPool) {
        let app = create_test_app(pool).await;

        let payload = json!({"email": "dup@college.edu", "name": "First"});
        app.post("/api/users").json(&payload).await.assert_status(axum::http::StatusCode::CREATED);

        let response = app.post("/api/users").json(&payload).await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_users_filtered_by_role(pool: PgPool) {
        let app = create_test_app(pool).await;

        for (email, role) in [("a@x.edu", "student"), ("b@x.edu", "recruiter"), ("c@x.edu", "student")] {
            app.post("/api/users")
                .json(&json!({"email": email, "name": "U", "role": role}))
                .await
                .assert_status(axum::http::StatusCode::CREATED);
        }

        let response = app.get("/api/users?role=student").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["total"], 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_missing_user_is_404(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.delete(&format!("/api/users/{}", uuid::Uuid::new_v4())).await;
        response.assert_status_not_found();
    }
}
