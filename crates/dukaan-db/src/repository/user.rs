//! # User Repository
//!
//! Database operations for application logins.
//!
//! There is exactly one mutation: bootstrap of the default admin account.
//! The application never updates or deletes users after that.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use dukaan_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Looks up a user by exact (case-sensitive) username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Creates the user if no row with this username exists yet.
    ///
    /// Called once at startup to seed the default admin credential.
    /// Returns `true` if a row was inserted.
    pub async fn create_if_missing(&self, username: &str, password_hash: &str) -> DbResult<bool> {
        if self.get_by_username(username).await?.is_some() {
            debug!(username = %username, "User already exists, skipping bootstrap");
            return Ok(false);
        }

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .execute(&self.pool)
        .await?;

        info!(username = %username, "Bootstrap user created");
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
