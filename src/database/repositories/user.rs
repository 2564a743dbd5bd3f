//! User repository implementation

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CreateUserRequest, User};
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: &CreateUserRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, country)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, country, created_at
            "#
        )
        .bind(&request.email)
        .bind(&request.name)
        .bind(&request.country)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, country, created_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
