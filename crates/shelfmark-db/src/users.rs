//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use shelfmark_core::{CreateUserRequest, Error, Result, User, UserRepository, UserState};

fn state_from_db(state: &str) -> UserState {
    match state {
        "BLOCKED" => UserState::Blocked,
        "DELETED" => UserState::Deleted,
        _ => UserState::Active,
    }
}

fn state_to_db(state: UserState) -> &'static str {
    match state {
        UserState::Active => "ACTIVE",
        UserState::Blocked => "BLOCKED",
        UserState::Deleted => "DELETED",
    }
}

fn row_to_user(row: PgRow) -> User {
    let state: String = row.get("state");
    User {
        id: row.get("id"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        registration_date: row.get("registration_date"),
        state: state_from_db(&state),
    }
}

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, req: CreateUserRequest) -> Result<User> {
        if req.email.trim().is_empty() {
            return Err(Error::InvalidInput("Email cannot be empty".to_string()));
        }

        let user = User {
            id: Uuid::now_v7(),
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            registration_date: Utc::now(),
            state: UserState::Active,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, email, first_name, last_name, registration_date, state)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.registration_date)
        .bind(state_to_db(user.state))
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, email, first_name, last_name, registration_date, state
             FROM users ORDER BY registration_date, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }

    async fn exists(&self, user_id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1) AS found")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get("found"))
    }
}
