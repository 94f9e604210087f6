//! Database repository for recruitment rounds.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::rounds::{RoundCreateDBRequest, RoundDBResponse, RoundUpdateDBRequest},
};
use crate::types::{CompanyId, RoundId, abbrev_uuid};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing rounds
#[derive(Debug, Clone, Default)]
pub struct RoundFilter {
    pub company_id: Option<CompanyId>,
}

pub struct RecruitmentRounds<'c> {
    db: &'c mut PgConnection,
}

impl<'c> RecruitmentRounds<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &RoundFilter) {
        if let Some(company_id) = filter.company_id {
            qb.push(" AND company_id = ").push_bind(company_id);
        }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for RecruitmentRounds<'c> {
    type CreateRequest = RoundCreateDBRequest;
    type UpdateRequest = RoundUpdateDBRequest;
    type Response = RoundDBResponse;
    type Id = RoundId;
    type Filter = RoundFilter;

    #[instrument(
        skip(self, request),
        fields(company_id = %abbrev_uuid(&request.company_id), round_number = request.round_number),
        err
    )]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let round = sqlx::query_as::<_, RoundDBResponse>(
            r#"
            INSERT INTO recruitment_rounds (id, company_id, round_number, name, round_type, scheduled_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.company_id)
        .bind(request.round_number)
        .bind(&request.name)
        .bind(request.round_type)
        .bind(request.scheduled_at)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(round)
    }

    #[instrument(skip(self), fields(round_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let round = sqlx::query_as::<_, RoundDBResponse>("SELECT * FROM recruitment_rounds WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(round)
    }

    /// Rounds are listed in process order (by round number), unpaginated.
    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut qb = QueryBuilder::new("SELECT * FROM recruitment_rounds WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        qb.push(" ORDER BY round_number");

        let rounds = qb.build_query_as::<RoundDBResponse>().fetch_all(&mut *self.db).await?;
        Ok(rounds)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM recruitment_rounds WHERE TRUE");
        Self::push_filters(&mut qb, filter);
        let total: i64 = qb.build_query_scalar().fetch_one(&mut *self.db).await?;
        Ok(total)
    }

    #[instrument(skip(self), fields(round_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recruitment_rounds WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(round_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let round = sqlx::query_as::<_, RoundDBResponse>(
            r#"
            UPDATE recruitment_rounds SET
                name = COALESCE($2, name),
                round_type = COALESCE($3, round_type),
                scheduled_at = COALESCE($4, scheduled_at),
                status = COALESCE($5, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.round_type)
        .bind(request.scheduled_at)
        .bind(request.status)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(round)
    }
}
