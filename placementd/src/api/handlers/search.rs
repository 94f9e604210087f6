//! Handler for the global search endpoint.

use crate::AppState;
use crate::api::models::{
    envelope::ApiResponse,
    search::{SearchQuery, SearchResults},
};
use crate::db::handlers::{companies::Companies, students::Students};
use crate::errors::{Error, Result};
use crate::api::extractors::{Json, Query};
use axum::extract::State;

/// Max hits per entity type for a single search.
const SEARCH_LIMIT: i64 = 20;

/// Search students and companies by a single query string.
///
/// GET /api/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResults>>> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::bad_request("Query parameter 'q' is required"))?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let students = Students::new(&mut conn).search(q, SEARCH_LIMIT).await?;
    let companies = Companies::new(&mut conn).search(q, SEARCH_LIMIT).await?;

    Ok(Json(ApiResponse::new(
        "Search results retrieved",
        SearchResults {
            students: students.into_iter().map(Into::into).collect(),
            companies: companies.into_iter().map(Into::into).collect(),
        },
    )))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_test_app, create_test_company, create_test_student};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_spans_students_and_companies(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        create_test_student(&pool, "21CS001", "CSE", 2026, 8.0, 0).await;
        create_test_company(&pool, "Student First Bank", 0.0, 0, &[], &[]).await;

        // Factory names students "Student <roll>", so "student" hits both sides
        let response = app.get("/api/search?q=student").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["students"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["companies"].as_array().unwrap().len(), 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_matches_roll_numbers(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        create_test_student(&pool, "21CS001", "CSE", 2026, 8.0, 0).await;
        create_test_student(&pool, "21ME001", "MECH", 2026, 7.0, 0).await;

        let response = app.get("/api/search?q=21cs").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["students"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["students"][0]["roll_number"], "21CS001");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_caps_results_per_entity_type(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        for i in 1..=25 {
            create_test_student(&pool, &format!("21CS{i:03}"), "CSE", 2026, 8.0, 0).await;
        }

        let response = app.get("/api/search?q=21cs").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["students"].as_array().unwrap().len(), 20);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_treats_wildcards_literally(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;

        create_test_student(&pool, "21CS001", "CSE", 2026, 8.0, 0).await;
        create_test_company(&pool, "100% Placements Ltd", 0.0, 0, &[], &[]).await;

        // "%" is a LIKE wildcard; it must only match the literal character
        let response = app.get("/api/search?q=100%25").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["students"].as_array().unwrap().len(), 0);
        assert_eq!(body["data"]["companies"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["companies"][0]["name"], "100% Placements Ltd");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_query_rejected(pool: PgPool) {
        let app = create_test_app(pool).await;

        app.get("/api/search").await.assert_status_bad_request();
        app.get("/api/search?q=%20").await.assert_status_bad_request();
    }
}
