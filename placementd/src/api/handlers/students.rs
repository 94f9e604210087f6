//! Handlers for the students API.

use crate::AppState;
use crate::api::models::{
    envelope::{ApiListResponse, ApiResponse},
    pagination::PageMeta,
    students::{ListStudentsQuery, StudentCreate, StudentResponse, StudentUpdate},
};
use crate::db::handlers::{
    Repository,
    students::{StudentFilter, Students},
};
use crate::db::models::students::{StudentCreateDBRequest, StudentUpdateDBRequest};
use crate::errors::{Error, FieldError, Result};
use crate::types::StudentId;
use crate::api::extractors::{Json, Path, Query};
use axum::{extract::State, http::StatusCode};

fn validate_student_create(data: &StudentCreate) -> Result<()> {
    let mut errors = Vec::new();
    if data.roll_number.trim().is_empty() {
        errors.push(FieldError::new("roll_number", "cannot be empty"));
    }
    if data.name.trim().is_empty() {
        errors.push(FieldError::new("name", "cannot be empty"));
    }
    if data.email.trim().is_empty() {
        errors.push(FieldError::new("email", "cannot be empty"));
    }
    if !(0.0..=10.0).contains(&data.cgpa) {
        errors.push(FieldError::new("cgpa", "must be between 0 and 10"));
    }
    if data.backlogs < 0 {
        errors.push(FieldError::new("backlogs", "cannot be negative"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation {
            message: "Validation failed".to_string(),
            errors,
        })
    }
}

/// Register a student.
///
/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    Json(data): Json<StudentCreate>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>)> {
    validate_student_create(&data)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let student = repo.create(&StudentCreateDBRequest::from(data)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Student registered", StudentResponse::from(student))),
    ))
}

/// List students with filtering and pagination.
///
/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Json<ApiListResponse<StudentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let filter = StudentFilter {
        branch: query.branch,
        batch: query.batch,
        placed: query.placed,
        min_cgpa: query.min_cgpa,
        q: query.q,
        skip,
        limit,
    };

    let total = repo.count(&filter).await?;
    let students = repo.list(&filter).await?;

    Ok(Json(ApiListResponse::new(
        "Students retrieved",
        students.into_iter().map(StudentResponse::from).collect(),
        PageMeta::new(&query.pagination, total),
    )))
}

/// Get a single student by ID.
///
/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<ApiResponse<StudentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let student = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Student", id))?;
    Ok(Json(ApiResponse::new("Student retrieved", StudentResponse::from(student))))
}

/// Update a student.
///
/// PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    Json(data): Json<StudentUpdate>,
) -> Result<Json<ApiResponse<StudentResponse>>> {
    if let Some(cgpa) = data.cgpa
        && !(0.0..=10.0).contains(&cgpa)
    {
        return Err(Error::Validation {
            message: "Validation failed".to_string(),
            errors: vec![FieldError::new("cgpa", "must be between 0 and 10")],
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    let student = repo
        .update(id, &StudentUpdateDBRequest::from(data))
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::not_found("Student", id),
            other => Error::Database(other),
        })?;
    Ok(Json(ApiResponse::new("Student updated", StudentResponse::from(student))))
}

/// Delete a student. Their applications are removed with them.
///
/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<ApiResponse<()>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Students::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::not_found("Student", id));
    }
    Ok(Json(ApiResponse::new("Student deleted", ())))
}
