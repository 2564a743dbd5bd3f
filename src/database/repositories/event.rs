//! Event repository implementation

use std::time::Instant;

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::store::FIND_LIMIT;
use crate::models::event::{CreateEventRequest, EventQuery, PersistedEvent, RsvpStatus};
use crate::utils::errors::Result;
use crate::utils::logging::log_database_operation;

use super::push_within_distance;

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: &CreateEventRequest) -> Result<PersistedEvent> {
        let event = sqlx::query_as::<_, PersistedEvent>(
            r#"
            INSERT INTO events (title, description, event_date, location_name, location_lat, location_lng, group_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, event_date, location_name, location_lat, location_lng,
                      group_id, created_by, created_at, 0::BIGINT AS rsvp_count
            "#
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.event_date)
        .bind(&request.location_name)
        .bind(request.location_lat)
        .bind(request.location_lng)
        .bind(request.group_id)
        .bind(request.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find events with their count of "going" RSVPs
    pub async fn find(&self, query: &EventQuery) -> Result<Vec<PersistedEvent>> {
        let started = Instant::now();
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT e.id, e.title, e.description, e.event_date, e.location_name, e.location_lat,
                   e.location_lng, e.group_id, e.created_by, e.created_at,
                   COUNT(er.user_id) AS rsvp_count
            FROM events e
            LEFT JOIN event_rsvps er ON er.event_id = e.id AND er.status = 'going'
            WHERE TRUE
            "#,
        );

        if let Some(group_id) = query.group_id {
            builder.push(" AND e.group_id = ").push_bind(group_id);
        }
        if query.upcoming_only {
            builder.push(" AND e.event_date > NOW()");
        }
        if let Some(filter) = &query.near {
            push_within_distance(&mut builder, "e", filter);
        }

        builder
            .push(" GROUP BY e.id ORDER BY e.event_date ASC LIMIT ")
            .push_bind(FIND_LIMIT);

        let result = builder
            .build_query_as::<PersistedEvent>()
            .fetch_all(&self.pool)
            .await;

        log_database_operation(
            "find",
            "events",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        Ok(result?)
    }

    /// Insert or update the RSVP of a user for an event; returns the `going` count
    pub async fn upsert_rsvp(&self, event_id: Uuid, user_id: Uuid, status: RsvpStatus) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO event_rsvps (event_id, user_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET status = EXCLUDED.status, rsvp_at = CURRENT_TIMESTAMP
            "#
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status.as_str())
        .execute(&mut *tx)
        .await?;

        let going: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_rsvps WHERE event_id = $1 AND status = 'going'",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(going)
    }
}
