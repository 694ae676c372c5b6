//! Database operations for internal mail
//!
//! Every send writes two independent rows: one in the sender's outbox and one
//! in the recipient's inbox. Each row has its own id and read flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Which side of a mailbox an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MailFolder {
    Inbox,
    Outbox,
}

impl MailFolder {
    pub fn as_str(self) -> &'static str {
        match self {
            MailFolder::Inbox => "inbox",
            MailFolder::Outbox => "outbox",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inbox" => Some(MailFolder::Inbox),
            "outbox" => Some(MailFolder::Outbox),
            _ => None,
        }
    }
}

/// One entry in a user's inbox or outbox
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MailEntry {
    pub id: Uuid,
    #[serde(skip)]
    pub owner_email: String,
    #[serde(skip)]
    pub folder: MailFolder,
    #[serde(rename = "from")]
    pub from_email: String,
    #[serde(rename = "to")]
    pub to_email: String,
    pub subject: String,
    pub message: String,
    /// Read flag
    pub status: bool,
    pub sent_at: DateTime<Utc>,
}

/// A validated mail ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub message: String,
}

const MAIL_COLUMNS: &str =
    "id, owner_email, folder, from_email, to_email, subject, message, status, sent_at";

/// Write the outbox and inbox copies of a mail in one transaction
///
/// Returns `(outbox, inbox)`.
pub async fn deliver_mail(
    pool: &SqlitePool,
    mail: NewMail,
) -> Result<(MailEntry, MailEntry), sqlx::Error> {
    let sent_at = Utc::now();
    let copy = |owner: &str, folder| MailEntry {
        id: Uuid::new_v4(),
        owner_email: owner.to_string(),
        folder,
        from_email: mail.from.clone(),
        to_email: mail.to.clone(),
        subject: mail.subject.clone(),
        message: mail.message.clone(),
        status: false,
        sent_at,
    };
    let outbox = copy(&mail.from, MailFolder::Outbox);
    let inbox = copy(&mail.to, MailFolder::Inbox);

    let mut tx = pool.begin().await?;
    for entry in [&outbox, &inbox] {
        sqlx::query(&format!(
            "INSERT INTO mail_entries ({MAIL_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(entry.id)
        .bind(&entry.owner_email)
        .bind(entry.folder)
        .bind(&entry.from_email)
        .bind(&entry.to_email)
        .bind(&entry.subject)
        .bind(&entry.message)
        .bind(entry.status)
        .bind(entry.sent_at)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok((outbox, inbox))
}

/// A user's folder, newest first
pub async fn get_folder(
    pool: &SqlitePool,
    owner_email: &str,
    folder: MailFolder,
) -> Result<Vec<MailEntry>, sqlx::Error> {
    sqlx::query_as::<_, MailEntry>(&format!(
        "SELECT {MAIL_COLUMNS} FROM mail_entries
         WHERE owner_email = ? AND folder = ?
         ORDER BY sent_at DESC, rowid DESC"
    ))
    .bind(owner_email)
    .bind(folder)
    .fetch_all(pool)
    .await
}

/// Set the read flag on an inbox entry; false if no such entry
pub async fn mark_as_read(pool: &SqlitePool, owner_email: &str, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE mail_entries SET status = 1 WHERE id = ? AND owner_email = ? AND folder = 'inbox'",
    )
    .bind(id)
    .bind(owner_email)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove one entry from a folder; false if nothing matched
pub async fn delete_entry(
    pool: &SqlitePool,
    owner_email: &str,
    folder: MailFolder,
    id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM mail_entries WHERE id = ? AND owner_email = ? AND folder = ?")
            .bind(id)
            .bind(owner_email)
            .bind(folder)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
