//! Database repository for application windows.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::application_windows::{WindowCreateDBRequest, WindowDBResponse, WindowUpdateDBRequest},
};
use crate::types::{CompanyId, WindowId, abbrev_uuid};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing application windows
#[derive(Debug, Clone, Default)]
pub struct WindowFilter {
    pub company_id: Option<CompanyId>,
    pub skip: i64,
    pub limit: i64,
}

pub struct ApplicationWindows<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ApplicationWindows<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &WindowFilter) {
        if let Some(company_id) = filter.company_id {
            qb.push(" AND company_id = ").push_bind(company_id);
        }
    }

    /// Windows open at the given instant, optionally restricted to one company.
    ///
    /// A window is open when `starts_at <= now < ends_at`.
    #[instrument(skip(self), err)]
    pub async fn open_at(
        &mut self,
        now: DateTime<Utc>,
        company_id: Option<CompanyId>,
    ) -> Result<Vec<WindowDBResponse>> {
        let mut qb = QueryBuilder::new("SELECT * FROM application_windows WHERE starts_at <= ");
        qb.push_bind(now).push(" AND ends_at > ").push_bind(now);
        if let Some(company_id) = company_id {
            qb.push(" AND company_id = ").push_bind(company_id);
        }
        qb.push(" ORDER BY ends_at");

        let windows = qb.build_query_as::<WindowDBResponse>().fetch_all(&mut *self.db).await?;
        Ok(windows)
    }

    /// Whether the company is currently accepting applications.
    #[instrument(skip(self), fields(company_id = %abbrev_uuid(&company_id)), err)]
    pub async fn is_open_for(&mut self, company_id: CompanyId, now: DateTime<Utc>) -> Result<bool> {
        let open: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM application_windows
                WHERE company_id = $1 AND starts_at <= $2 AND ends_at > $2
            )
            "#,
        )
        .bind(company_id)
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;
        Ok(open)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for ApplicationWindows<'c> {
    type CreateRequest = WindowCreateDBRequest;
    type UpdateRequest = WindowUpdateDBRequest;
    type Response = WindowDBResponse;
    type Id = WindowId;
    type Filter = WindowFilter;

    #[instrument(skip(self, request), fields(company_id = %abbrev_uuid(&request.company_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let window = sqlx::query_as::<_, WindowDBResponse>(
            r#"
            INSERT INTO application_windows (id, company_id, starts_at, ends_at, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.company_id)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(&request.note)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(window)
    }

    #[instrument(skip(self), fields(window_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let window = sqlx::query_as::<_, WindowDBResponse>("SELECT * FROM application_windows WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(window)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb = QueryBuilder::new("SELECT * FROM application_windows WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY starts_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let windows = qb.build_query_as::<WindowDBResponse>().fetch_all(&mut *self.db).await?;
        Ok(windows)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM application_windows WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        let total: i64 = qb.build_query_scalar().fetch_one(&mut *self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self), fields(window_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM application_windows WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(window_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let window = sqlx::query_as::<_, WindowDBResponse>(
            r#"
            UPDATE application_windows SET
                starts_at = COALESCE($2, starts_at),
                ends_at = COALESCE($3, ends_at),
                note = COALESCE($4, note)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(&request.note)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(window)
    }
}
