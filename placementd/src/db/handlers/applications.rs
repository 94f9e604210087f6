//! Database repository for applications and their review history.
//!
//! Status changes are applied to the application row and appended to the
//! `application_reviews` table in a single transaction, so the history always
//! matches the row even under concurrent updates.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::applications::{
        ApplicationCreateDBRequest, ApplicationDBResponse, ReviewDBResponse, StatusUpdateDBRequest,
    },
};
use crate::api::models::applications::ApplicationStatus;
use crate::types::{ApplicationId, CompanyId, StudentId, abbrev_uuid};
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing applications
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub student_id: Option<StudentId>,
    pub company_id: Option<CompanyId>,
    pub status: Option<ApplicationStatus>,
    pub skip: i64,
    pub limit: i64,
}

pub struct Applications<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Applications<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ApplicationFilter) {
        if let Some(student_id) = filter.student_id {
            qb.push(" AND student_id = ").push_bind(student_id);
        }
        if let Some(company_id) = filter.company_id {
            qb.push(" AND company_id = ").push_bind(company_id);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
    }

    /// Review history for an application, newest first.
    #[instrument(skip(self), fields(application_id = %abbrev_uuid(&id)), err)]
    pub async fn history(&mut self, id: ApplicationId) -> Result<Vec<ReviewDBResponse>> {
        let reviews = sqlx::query_as::<_, ReviewDBResponse>(
            "SELECT * FROM application_reviews WHERE application_id = $1 ORDER BY changed_at DESC, id DESC",
        )
        .bind(id)
        .fetch_all(&mut *self.db)
        .await?;
        Ok(reviews)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Applications<'c> {
    type CreateRequest = ApplicationCreateDBRequest;
    type UpdateRequest = StatusUpdateDBRequest;
    type Response = ApplicationDBResponse;
    type Id = ApplicationId;
    type Filter = ApplicationFilter;

    #[instrument(
        skip(self, request),
        fields(student_id = %abbrev_uuid(&request.student_id), company_id = %abbrev_uuid(&request.company_id)),
        err
    )]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            INSERT INTO applications (id, student_id, company_id, resume_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.student_id)
        .bind(request.company_id)
        .bind(&request.resume_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self), fields(application_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(application)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb = QueryBuilder::new("SELECT * FROM applications WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY applied_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let applications = qb
            .build_query_as::<ApplicationDBResponse>()
            .fetch_all(&mut *self.db)
            .await?;
        Ok(applications)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM applications WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        let total: i64 = qb.build_query_scalar().fetch_one(&mut *self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self), fields(application_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a status change and append it to the review history.
    ///
    /// The row is locked for the duration of the transaction; concurrent
    /// updates serialize, and the last one to commit wins.
    #[instrument(skip(self, request), fields(application_id = %abbrev_uuid(&id), status = %request.status), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let mut tx = self.db.begin().await?;

        let previous = sqlx::query_scalar::<_, ApplicationStatus>(
            "SELECT status FROM applications WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound)?;

        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            UPDATE applications SET
                status = $2,
                score = COALESCE($3, score),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.status)
        .bind(request.score)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO application_reviews (id, application_id, previous_status, new_status, score, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(id)
        .bind(previous)
        .bind(request.status)
        .bind(request.score)
        .bind(&request.note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(application)
    }
}
