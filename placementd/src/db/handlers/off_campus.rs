//! Database repository for off-campus opportunities.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{Repository, like_pattern},
    models::off_campus::{OpportunityCreateDBRequest, OpportunityDBResponse, OpportunityUpdateDBRequest},
};
use crate::types::{OpportunityId, abbrev_uuid};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing opportunities
#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    /// Case-insensitive substring match on title and company name
    pub q: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

pub struct OffCampusOpportunities<'c> {
    db: &'c mut PgConnection,
}

impl<'c> OffCampusOpportunities<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &OpportunityFilter) {
        if let Some(q) = &filter.q {
            let pattern = like_pattern(q);
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR company_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for OffCampusOpportunities<'c> {
    type CreateRequest = OpportunityCreateDBRequest;
    type UpdateRequest = OpportunityUpdateDBRequest;
    type Response = OpportunityDBResponse;
    type Id = OpportunityId;
    type Filter = OpportunityFilter;

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let opportunity = sqlx::query_as::<_, OpportunityDBResponse>(
            r#"
            INSERT INTO off_campus_opportunities (id, title, company_name, url, description, deadline)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title)
        .bind(&request.company_name)
        .bind(&request.url)
        .bind(&request.description)
        .bind(request.deadline)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(opportunity)
    }

    #[instrument(skip(self), fields(opportunity_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let opportunity =
            sqlx::query_as::<_, OpportunityDBResponse>("SELECT * FROM off_campus_opportunities WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;
        Ok(opportunity)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb = QueryBuilder::new("SELECT * FROM off_campus_opportunities WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let opportunities = qb
            .build_query_as::<OpportunityDBResponse>()
            .fetch_all(&mut *self.db)
            .await?;
        Ok(opportunities)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM off_campus_opportunities WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        let total: i64 = qb.build_query_scalar().fetch_one(&mut *self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self), fields(opportunity_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM off_campus_opportunities WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(opportunity_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let opportunity = sqlx::query_as::<_, OpportunityDBResponse>(
            r#"
            UPDATE off_campus_opportunities SET
                title = COALESCE($2, title),
                company_name = COALESCE($3, company_name),
                url = COALESCE($4, url),
                description = COALESCE($5, description),
                deadline = COALESCE($6, deadline),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.company_name)
        .bind(&request.url)
        .bind(&request.description)
        .bind(request.deadline)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(opportunity)
    }
}
