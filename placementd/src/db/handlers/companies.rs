//! Database repository for companies.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, like_pattern},
    models::companies::{CompanyCreateDBRequest, CompanyDBResponse, CompanyUpdateDBRequest},
};
use crate::types::{CompanyId, abbrev_uuid};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing companies
#[derive(Debug, Clone, Default)]
pub struct CompanyFilter {
    /// Case-insensitive substring match on name
    pub q: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

pub struct Companies<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Companies<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &CompanyFilter) {
        if let Some(q) = &filter.q {
            qb.push(" AND name ILIKE ").push_bind(like_pattern(q));
        }
    }

    /// Case-insensitive substring search over company names.
    #[instrument(skip(self), err)]
    pub async fn search(&mut self, q: &str, limit: i64) -> Result<Vec<CompanyDBResponse>> {
        let companies = sqlx::query_as::<_, CompanyDBResponse>(
            "SELECT * FROM companies WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(like_pattern(q))
        .bind(limit)
        .fetch_all(&mut *self.db)
        .await?;
        Ok(companies)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Companies<'c> {
    type CreateRequest = CompanyCreateDBRequest;
    type UpdateRequest = CompanyUpdateDBRequest;
    type Response = CompanyDBResponse;
    type Id = CompanyId;
    type Filter = CompanyFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let company = sqlx::query_as::<_, CompanyDBResponse>(
            r#"
            INSERT INTO companies (id, name, description, package_lpa, min_cgpa, max_backlogs, allowed_branches, allowed_batches)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.package_lpa)
        .bind(request.min_cgpa)
        .bind(request.max_backlogs)
        .bind(&request.allowed_branches)
        .bind(&request.allowed_batches)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(company)
    }

    #[instrument(skip(self), fields(company_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let company = sqlx::query_as::<_, CompanyDBResponse>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(company)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb = QueryBuilder::new("SELECT * FROM companies WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY name LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let companies = qb.build_query_as::<CompanyDBResponse>().fetch_all(&mut *self.db).await?;
        Ok(companies)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM companies WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        let total: i64 = qb.build_query_scalar().fetch_one(&mut *self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self), fields(company_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(company_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let company = sqlx::query_as::<_, CompanyDBResponse>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                package_lpa = COALESCE($4, package_lpa),
                min_cgpa = COALESCE($5, min_cgpa),
                max_backlogs = COALESCE($6, max_backlogs),
                allowed_branches = COALESCE($7, allowed_branches),
                allowed_batches = COALESCE($8, allowed_batches),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.package_lpa)
        .bind(request.min_cgpa)
        .bind(request.max_backlogs)
        .bind(&request.allowed_branches)
        .bind(&request.allowed_batches)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(company)
    }
}
