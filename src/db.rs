//! Database pool construction and schema bootstrap.
//!
//! The store is two collections (users, tasks) addressed by opaque UUIDs; the
//! schema below is created idempotently at startup so a fresh database works
//! without an out-of-band migration step. Ids and timestamps are generated in
//! application code, not by the database.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::AppError;

// `CREATE TYPE` has no `IF NOT EXISTS`, hence the exception guard.
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    DO $$ BEGIN
        CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY,
        email         TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        name          TEXT NOT NULL,
        bio           TEXT NOT NULL DEFAULT '',
        avatar        TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL,
        updated_at    TIMESTAMPTZ NOT NULL
    )
    "#,
    // No foreign key with ON DELETE CASCADE here: account deletion performs
    // the task cascade itself as a second, sequential statement. A crash
    // between the two can orphan tasks; this is an accepted limitation.
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id          UUID PRIMARY KEY,
        user_id     UUID NOT NULL,
        title       TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        due_date    TIMESTAMPTZ,
        priority    task_priority NOT NULL DEFAULT 'medium',
        completed   BOOLEAN NOT NULL DEFAULT FALSE,
        created_at  TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks (user_id)",
];

/// Connects to Postgres and returns a ready pool.
pub async fn connect(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Applies the schema. Safe to run on every startup.
pub async fn bootstrap_schema(pool: &PgPool) -> Result<(), AppError> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
