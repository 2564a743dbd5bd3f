//! Usage ledger repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::usage::TrackUsageRequest;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct UsageRepository {
    pool: PgPool,
}

impl UsageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a usage record
    pub async fn record(&self, request: &TrackUsageRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO usage_tracking (user_id, session_id, minutes_used, service_type)
            VALUES ($1, $2, $3, $4)
            "#
        )
        .bind(request.user_id)
        .bind(&request.session_id)
        .bind(request.minutes_used)
        .bind(&request.service_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sum minutes used since a point in time
    pub async fn minutes_since(&self, user_id: Uuid, since: DateTime<Utc>) -> Result<i64> {
        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(minutes_used), 0)::BIGINT
            FROM usage_tracking
            WHERE user_id = $1 AND timestamp >= $2
            "#
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }
}
