//! Database repository for students.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, like_pattern},
    models::students::{StudentCreateDBRequest, StudentDBResponse, StudentUpdateDBRequest},
};
use crate::types::{StudentId, abbrev_uuid};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing students
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub branch: Option<String>,
    pub batch: Option<i32>,
    pub placed: Option<bool>,
    pub min_cgpa: Option<f64>,
    /// Case-insensitive substring match on name and roll number
    pub q: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

pub struct Students<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Students<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &StudentFilter) {
        if let Some(branch) = &filter.branch {
            qb.push(" AND branch = ").push_bind(branch.clone());
        }
        if let Some(batch) = filter.batch {
            qb.push(" AND batch = ").push_bind(batch);
        }
        if let Some(placed) = filter.placed {
            qb.push(" AND placed = ").push_bind(placed);
        }
        if let Some(min_cgpa) = filter.min_cgpa {
            qb.push(" AND cgpa >= ").push_bind(min_cgpa);
        }
        if let Some(q) = &filter.q {
            let pattern = like_pattern(q);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR roll_number ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    /// Case-insensitive substring search over names and roll numbers.
    #[instrument(skip(self), err)]
    pub async fn search(&mut self, q: &str, limit: i64) -> Result<Vec<StudentDBResponse>> {
        let pattern = like_pattern(q);
        let students = sqlx::query_as::<_, StudentDBResponse>(
            r#"
            SELECT * FROM students
            WHERE name ILIKE $1 OR roll_number ILIKE $1
            ORDER BY roll_number
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;
        Ok(students)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Students<'c> {
    type CreateRequest = StudentCreateDBRequest;
    type UpdateRequest = StudentUpdateDBRequest;
    type Response = StudentDBResponse;
    type Id = StudentId;
    type Filter = StudentFilter;

    #[instrument(skip(self, request), fields(roll_number = %request.roll_number), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let student = sqlx::query_as::<_, StudentDBResponse>(
            r#"
            INSERT INTO students (id, roll_number, name, email, branch, batch, cgpa, backlogs)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.roll_number)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.branch)
        .bind(request.batch)
        .bind(request.cgpa)
        .bind(request.backlogs)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(self), fields(student_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let student = sqlx::query_as::<_, StudentDBResponse>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(student)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb = QueryBuilder::new("SELECT * FROM students WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY roll_number LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let students = qb.build_query_as::<StudentDBResponse>().fetch_all(&mut *self.db).await?;
        Ok(students)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM students WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        let total: i64 = qb.build_query_scalar().fetch_one(&mut *self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self), fields(student_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(student_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let student = sqlx::query_as::<_, StudentDBResponse>(
            r#"
            UPDATE students SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                branch = COALESCE($4, branch),
                batch = COALESCE($5, batch),
                cgpa = COALESCE($6, cgpa),
                backlogs = COALESCE($7, backlogs),
                placed = COALESCE($8, placed),
                placed_company_id = COALESCE($9, placed_company_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.branch)
        .bind(request.batch)
        .bind(request.cgpa)
        .bind(request.backlogs)
        .bind(request.placed)
        .bind(request.placed_company_id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(student)
    }
}
