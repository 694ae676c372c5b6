//! Project Files Module
//!
//! Uploads are streamed to `<public>/uploads/files/` and recorded per
//! project. Uploads and deletions are announced to the project's room.
//!
//! # Module Structure
//!
//! ```text
//! files/
//! ├── mod.rs      - Module exports
//! ├── db.rs       - File records
//! ├── storage.rs  - Disk writes, drop guard, path mapping
//! └── handlers.rs - HTTP handlers
//! ```

pub mod db;
pub mod handlers;
pub mod storage;

pub use db::{FileRecord, Uploader};
pub use handlers::{delete_file, download_file, get_project_files, upload_file};
