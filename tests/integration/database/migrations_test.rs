//! Migration tests
//!
//! The embedded migrations create every table the handlers use.

use tokio_test::{assert_err, assert_ok};
use teamhub::backend::server::config::{connect, memory_pool, run_migrations};

#[tokio::test]
async fn test_migrations_create_all_tables() {
    let pool = memory_pool().await.unwrap();

    let mut tables: Vec<String> = sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
        .fetch_all(&pool)
        .await
        .unwrap();
    tables.sort();

    for expected in ["events", "files", "mail_entries", "messages", "project_boards", "user_tasks", "users"] {
        assert!(tables.iter().any(|t| t == expected), "missing table {expected}: {tables:?}");
    }
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = assert_ok!(connect("sqlite::memory:").await);
    assert_ok!(run_migrations(&pool).await);
    assert_ok!(run_migrations(&pool).await);
}

#[tokio::test]
async fn test_user_email_is_unique() {
    let pool = memory_pool().await.unwrap();
    let insert = "INSERT INTO users (id, username, email, password_hash, skills, role, is_faculty, is_available, created_at, updated_at)
                  VALUES (?, 'ada', 'ada@example.com', 'x', '[]', 'student', 0, 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')";

    assert_ok!(sqlx::query(insert).bind(uuid::Uuid::new_v4()).execute(&pool).await);
    assert_err!(sqlx::query(insert).bind(uuid::Uuid::new_v4()).execute(&pool).await);
}
