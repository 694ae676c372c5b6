//! Test application fixture
//!
//! Builds the real router over an in-memory SQLite pool and a temporary
//! public directory, and wraps it in an `axum_test::TestServer`.

use std::path::Path;

use axum_test::TestServer;
use sqlx::SqlitePool;
use tempfile::TempDir;
use teamhub::backend::routes::create_router;
use teamhub::backend::server::config::memory_pool;
use teamhub::backend::server::{AppState, ServerConfig};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Configuration for tests: fast bcrypt, fixed secret, given public root
pub fn test_config(public_dir: &Path) -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|_| None);
    config.public_dir = public_dir.to_path_buf();
    config.jwt_secret = TEST_JWT_SECRET.to_string();
    config.bcrypt_cost = 4;
    config
}

/// A running test application
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    /// Kept alive for the duration of the test
    pub public: TempDir,
}

impl TestApp {
    /// Application with a fresh database
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Application with a fresh database and an adjusted configuration
    pub async fn spawn_with(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let pool = memory_pool().await.expect("Failed to create in-memory database");
        Self::build(Some(pool), adjust)
    }

    /// Application with no database configured
    pub async fn without_store() -> Self {
        Self::build(None, |_| {})
    }

    fn build(pool: Option<SqlitePool>, adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let public = tempfile::tempdir().expect("Failed to create public dir");
        let mut config = test_config(public.path());
        adjust(&mut config);
        std::fs::create_dir_all(config.files_dir()).expect("Failed to create upload dirs");

        let state = AppState::new(config, pool);
        let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

        Self { server, state, public }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.state.db_pool.as_ref().expect("Test app has no database")
    }

    /// Absolute path of a stored public path
    pub fn public_file(&self, public_path: &str) -> std::path::PathBuf {
        self.public.path().join(public_path.trim_start_matches('/'))
    }
}
