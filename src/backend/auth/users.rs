/**
 * User Model and Database Operations
 *
 * This module handles user accounts and their database operations. Emails
 * are stored lower-cased and are unique.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Academic department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Department {
    Eee,
    Cse,
    Aiml,
    Ece,
    Csbs,
    Aids,
    Mech,
    It,
}

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Eee,
        Department::Cse,
        Department::Aiml,
        Department::Ece,
        Department::Csbs,
        Department::Aids,
        Department::Mech,
        Department::It,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Eee => "EEE",
            Department::Cse => "CSE",
            Department::Aiml => "AIML",
            Department::Ece => "ECE",
            Department::Csbs => "CSBS",
            Department::Aids => "AIDS",
            Department::Mech => "MECH",
            Department::It => "IT",
        }
    }

    /// Case-insensitive lookup
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|department| department.as_str().eq_ignore_ascii_case(value))
    }
}

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
    Faculty,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            "faculty" => Some(Role::Faculty),
            _ => None,
        }
    }
}

/// User struct representing a user in the database
///
/// The password hash is never serialized.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID)
    pub id: uuid::Uuid,
    pub username: String,
    /// Lower-cased email address
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip)]
    pub password_hash: String,
    pub department: Option<Department>,
    pub role: Role,
    pub is_faculty: bool,
    #[sqlx(json)]
    pub skills: Vec<String>,
    pub profile_picture: String,
    pub description: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated account ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub department: Option<Department>,
    pub skills: Vec<String>,
    pub role: Role,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, department, role, is_faculty, skills, \
     profile_picture, description, linkedin_url, github_url, is_available, created_at, updated_at";

/// Create a new user
///
/// A duplicate email surfaces as a unique-violation database error.
pub async fn create_user(pool: &SqlitePool, new: NewUser) -> Result<User, sqlx::Error> {
    let id = uuid::Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, department, role, is_faculty, skills, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&new.username)
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(new.department)
    .bind(new.role)
    .bind(new.role == Role::Faculty)
    .bind(sqlx::types::Json(&new.skills))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: uuid::Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Replace a user's password hash; false if no such user
pub async fn update_password(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE email = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(email)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Every registered email, in registration order
pub async fn list_emails(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT email FROM users ORDER BY created_at ASC, rowid ASC")
        .fetch_all(pool)
        .await
}

/// True for a unique-constraint failure, e.g. a duplicate email
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
