//! Internal Mail Module
//!
//! Mail between registered users. A send writes an outbox entry for the
//! sender and an inbox entry for the recipient; each side reads, flags and
//! deletes its own copy.
//!
//! # Endpoints
//!
//! - `POST /mail/send` - `{from, to, subject, message}`
//! - `POST /mail/inbox`, `POST /mail/outbox` - `{email}`, newest first
//! - `PATCH /mail/read` - `{email, id}`, inbox only
//! - `DELETE /mail/delete` - `{email, emailId, view}`

pub mod db;
pub mod handlers;

pub use db::{MailEntry, MailFolder, NewMail};
pub use handlers::{delete_mail, get_inbox, get_outbox, mark_as_read, send_mail};
