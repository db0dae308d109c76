//! Bootstrap DDL for the usuarios table
//!
//! Not a versioned migration system; a fresh database becomes usable on
//! first start and the statement is a no-op on every start after.

use sqlx::PgPool;

use crate::db::repos::DbError;

/// Ensure the usuarios table exists.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Ensuring usuarios table exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id SERIAL PRIMARY KEY,
            email TEXT NOT NULL,
            name TEXT NOT NULL,
            age INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
