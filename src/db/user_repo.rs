use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::db::models::User;

pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password, role, created_at FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(db)
    .await
    .context("fetching user by username")
}

/// Create a regular account. Returns `None` when the username is taken.
pub async fn create_user(db: &PgPool, username: &str, password_hash: &str) -> Result<Option<i64>> {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO users (username, password, role)
           VALUES ($1, $2, 'user')
           ON CONFLICT (username) DO NOTHING
           RETURNING id"#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_optional(db)
    .await
    .context("creating user")
}
