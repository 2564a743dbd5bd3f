//! Group repository implementation

use std::time::Instant;

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::store::FIND_LIMIT;
use crate::models::group::{CreateGroupRequest, GroupQuery, PersistedGroup};
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_group_type;
use crate::utils::logging::log_database_operation;

use super::push_within_distance;

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group
    pub async fn create(&self, request: &CreateGroupRequest) -> Result<PersistedGroup> {
        let group = sqlx::query_as::<_, PersistedGroup>(
            r#"
            INSERT INTO groups (name, description, group_type, location_name, location_lat, location_lng, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, group_type, location_name, location_lat, location_lng,
                      created_by, created_at, 0::BIGINT AS member_count
            "#
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(normalize_group_type(&request.group_type))
        .bind(&request.location_name)
        .bind(request.location_lat)
        .bind(request.location_lng)
        .bind(request.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    /// Find groups by type and proximity with their member counts
    pub async fn find(&self, query: &GroupQuery) -> Result<Vec<PersistedGroup>> {
        let started = Instant::now();
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT g.id, g.name, g.description, g.group_type, g.location_name, g.location_lat,
                   g.location_lng, g.created_by, g.created_at, COUNT(gm.user_id) AS member_count
            FROM groups g
            LEFT JOIN group_members gm ON gm.group_id = g.id
            WHERE TRUE
            "#,
        );

        if let Some(group_type) = &query.group_type {
            builder
                .push(" AND g.group_type = ")
                .push_bind(normalize_group_type(group_type));
        }
        if let Some(filter) = &query.near {
            push_within_distance(&mut builder, "g", filter);
        }

        builder
            .push(" GROUP BY g.id ORDER BY g.created_at DESC LIMIT ")
            .push_bind(FIND_LIMIT);

        let result = builder
            .build_query_as::<PersistedGroup>()
            .fetch_all(&self.pool)
            .await;

        log_database_operation(
            "find",
            "groups",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        Ok(result?)
    }

    /// Add member to group, ignoring a repeated join; returns the member count
    pub async fn add_member(&self, group_id: Uuid, user_id: Uuid) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, user_id) DO NOTHING
            "#
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let member_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM group_members WHERE group_id = $1")
                .bind(group_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(member_count)
    }
}
