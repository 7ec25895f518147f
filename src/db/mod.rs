mod models;

pub use models::*;

use anyhow::Result;
use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

pub type DbPool = SqlitePool;

/// Execute a SQL migration file, properly handling comments
async fn execute_sql(pool: &SqlitePool, sql: &str) -> Result<()> {
    for statement in sql.split(';') {
        // Strip SQL comment lines (lines starting with --)
        let cleaned: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }
    Ok(())
}

pub async fn init(data_dir: &Path) -> Result<DbPool> {
    let db_path = data_dir.join("ticklist.db");
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    info!("Initializing database at {}", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Enable WAL mode for better concurrency
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    info!("Database initialized successfully");
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");
    execute_sql(pool, include_str!("../../migrations/001_initial.sql")).await?;
    info!("Migrations completed");
    Ok(())
}

// -------------------------------------------------------------------------
// User operations
// -------------------------------------------------------------------------

/// Insert a new user. A duplicate username surfaces as a UNIQUE constraint
/// violation from SQLite, which callers map to a conflict response.
pub async fn create_user(
    pool: &DbPool,
    username: &str,
    password_hash: &str,
) -> sqlx::Result<User> {
    let now = Utc::now().to_rfc3339();
    let result = sqlx::query("INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(password_hash)
        .bind(&now)
        .execute(pool)
        .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        created_at: now,
    })
}

pub async fn find_user_by_username(pool: &DbPool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_user_by_id(pool: &DbPool, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

// -------------------------------------------------------------------------
// Todo operations
//
// Every lookup and mutation is filtered by the owning user id, so a task id
// belonging to someone else behaves exactly like a missing id.
// -------------------------------------------------------------------------

pub async fn create_todo(pool: &DbPool, user_id: i64, todo: NewTodo) -> sqlx::Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO todos (title, content, date_tbd, done, filename, file_data, user_id)
        VALUES (?, ?, ?, 0, ?, ?, ?)
        "#,
    )
    .bind(&todo.title)
    .bind(&todo.content)
    .bind(&todo.date_tbd)
    .bind(&todo.filename)
    .bind(&todo.file_data)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_todo(pool: &DbPool, id: i64, user_id: i64) -> sqlx::Result<Option<Todo>> {
    sqlx::query_as("SELECT * FROM todos WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Open tasks for the list view, in insertion order.
pub async fn list_open_todos(pool: &DbPool, user_id: i64) -> sqlx::Result<Vec<Todo>> {
    sqlx::query_as("SELECT * FROM todos WHERE done = 0 AND user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Returns false when no owned row matched, so the handler can answer 404.
pub async fn mark_done(pool: &DbPool, id: i64, user_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE todos SET done = 1 WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_todo(pool: &DbPool, id: i64, user_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> DbPool {
    // A single connection keeps the in-memory database alive and shared
    // across all queries in a test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    run_migrations(&pool).await.expect("migrations failed");
    pool
}
