/**
 * Server Configuration
 *
 * This module handles loading of server configuration from the environment
 * and the optional SQLite database connection.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * first when present), with sensible defaults for local development.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Invalid values fall back to their defaults, and a database that fails to
 * open leaves the store disabled so store-backed routes answer 503.
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Development fallback for `JWT_SECRET`
const DEV_JWT_SECRET: &str = "teamhub-dev-secret-change-in-production";

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that does not parse
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// SMTP relay used for passcode delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `TeamHub <no-reply@example.com>`
    pub from: String,
}

/// Runtime configuration for the whole server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` disables every store-backed route
    pub database_url: Option<String>,
    /// Root of static files and uploads
    pub public_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub max_file_bytes: u64,
    pub max_image_bytes: u64,
    pub otp_ttl: Duration,
    pub purge_interval: Duration,
    /// `None` disables passcode delivery
    pub smtp: Option<SmtpConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            database_url: None,
            public_dir: PathBuf::from("public"),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_file_bytes: 20 * 1024 * 1024,
            max_image_bytes: 5 * 1024 * 1024,
            otp_ttl: Duration::from_secs(10 * 60),
            purge_interval: Duration::from_secs(5 * 60),
            smtp: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// Never fails: every missing or invalid value is replaced by its default
    /// and reported through `tracing`.
    pub fn from_env() -> Self {
        if dotenv::dotenv().is_err() {
            tracing::debug!("[Config] No .env file found, using process environment");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("[Config] JWT_SECRET not set, using the development secret");
            defaults.jwt_secret.clone()
        });

        let database_url = get("DATABASE_URL");
        if database_url.is_none() {
            tracing::warn!("[Config] DATABASE_URL not set. Database features will be disabled.");
        }

        let smtp = load_smtp(&get);
        if smtp.is_none() {
            tracing::info!("[Config] SMTP not configured, passcode delivery disabled");
        }

        Self {
            port: parsed(&get, "PORT", defaults.port),
            database_url,
            public_dir: get("PUBLIC_DIR").map(PathBuf::from).unwrap_or(defaults.public_dir),
            jwt_secret,
            token_ttl: Duration::from_secs(parsed(&get, "TOKEN_TTL_SECS", defaults.token_ttl.as_secs())),
            bcrypt_cost: parsed(&get, "BCRYPT_COST", defaults.bcrypt_cost),
            max_file_bytes: parsed(&get, "MAX_FILE_BYTES", defaults.max_file_bytes),
            max_image_bytes: parsed(&get, "MAX_IMAGE_BYTES", defaults.max_image_bytes),
            otp_ttl: Duration::from_secs(parsed(&get, "OTP_TTL_SECS", defaults.otp_ttl.as_secs())),
            purge_interval: Duration::from_secs(parsed(
                &get,
                "PURGE_INTERVAL_SECS",
                defaults.purge_interval.as_secs(),
            )),
            smtp,
        }
    }

    /// Directory for event images
    pub fn uploads_dir(&self) -> PathBuf {
        self.public_dir.join("uploads")
    }

    /// Directory for project files
    pub fn files_dir(&self) -> PathBuf {
        self.uploads_dir().join("files")
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parsed<T: FromStr + std::fmt::Display>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> T {
    let Some(raw) = get(key) else {
        return default;
    };
    match parse_var(key, &raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("[Config] {}, falling back to {}", e, default);
            default
        }
    }
}

fn load_smtp(get: &impl Fn(&str) -> Option<String>) -> Option<SmtpConfig> {
    let host = get("SMTP_HOST")?;
    let username = get("SMTP_USERNAME").unwrap_or_default();
    Some(SmtpConfig {
        port: parsed(get, "SMTP_PORT", 587),
        password: get("SMTP_PASSWORD").unwrap_or_default(),
        from: get("SMTP_FROM").unwrap_or_else(|| username.clone()),
        username,
        host,
    })
}

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<SqlitePool>;

/// Open the database and run migrations
///
/// # Returns
///
/// - `Some(SqlitePool)` if the database is successfully configured
/// - `None` if no URL is configured or the connection fails
///
/// # Errors
///
/// Errors are logged but do not prevent server startup.
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        return None;
    };

    tracing::info!("[Database] Connecting to {}", database_url);
    let pool = match connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Database] Failed to create connection pool: {:?}", e);
            tracing::warn!("[Database] Database features will be disabled.");
            return None;
        }
    };
    tracing::info!("[Database] Connection pool created successfully");

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("[Database] Failed to run migrations: {}", e);
        tracing::warn!("[Database] Continuing, schema might not be up to date");
    }

    Some(pool)
}

/// Create a pool for a SQLite URL
///
/// In-memory databases are private to a connection, so they get a pool of
/// exactly one connection that is never recycled.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await
    }
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("[Database] Running migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("[Database] Migrations completed successfully");
    Ok(())
}

/// Fresh in-memory database with the schema applied
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = connect("sqlite::memory:").await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
