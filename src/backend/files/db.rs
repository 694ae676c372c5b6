//! Database operations for project files

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Who uploaded a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub id: String,
    pub name: String,
}

/// A stored file's metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    pub project_id: String,
    /// Original file name as uploaded
    pub name: String,
    pub media_type: String,
    pub size: i64,
    /// Path relative to the public root
    pub path: String,
    pub uploader: Uploader,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    project_id: String,
    name: String,
    media_type: String,
    size: i64,
    path: String,
    uploader_id: String,
    uploader_name: String,
    uploaded_at: DateTime<Utc>,
}

impl From<FileRow> for FileRecord {
    fn from(row: FileRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            media_type: row.media_type,
            size: row.size,
            path: row.path,
            uploader: Uploader {
                id: row.uploader_id,
                name: row.uploader_name,
            },
            uploaded_at: row.uploaded_at,
        }
    }
}

const FILE_COLUMNS: &str =
    "id, project_id, name, media_type, size, path, uploader_id, uploader_name, uploaded_at";

/// Insert a file record
pub async fn create_file(pool: &SqlitePool, file: &FileRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO files (id, project_id, name, media_type, size, path, uploader_id, uploader_name, uploaded_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(file.id)
    .bind(&file.project_id)
    .bind(&file.name)
    .bind(&file.media_type)
    .bind(file.size)
    .bind(&file.path)
    .bind(&file.uploader.id)
    .bind(&file.uploader.name)
    .bind(file.uploaded_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Files of a project, newest first
pub async fn get_files_for_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<FileRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FileRow>(&format!(
        "SELECT {FILE_COLUMNS} FROM files WHERE project_id = ? ORDER BY uploaded_at DESC, rowid DESC"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(FileRecord::from).collect())
}

/// Get a file record by ID
pub async fn get_file_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<FileRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, FileRow>(&format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(FileRecord::from))
}

/// Delete a file record, returning it if it existed
pub async fn delete_file(pool: &SqlitePool, id: Uuid) -> Result<Option<FileRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, FileRow>(&format!(
        "DELETE FROM files WHERE id = ? RETURNING {FILE_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(FileRecord::from))
}
