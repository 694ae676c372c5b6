//! Authentication Module
//!
//! This module handles accounts, login tokens and password recovery.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`otp`** - One-time passcodes and reset grants
//! - **`mailer`** - SMTP delivery of passcodes
//! - **`handlers`** - HTTP handlers for `/auth`
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── otp.rs          - Passcode store
//! ├── mailer.rs       - Passcode mail delivery
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Create account**: username, email and password → user stored (201)
//! 2. **Login**: email and password → credentials verified → JWT returned
//! 3. **Me**: JWT → token verified by the middleware → user returned
//! 4. **Recovery**: generateotp → verifyotp → resetpassword
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are signed with the configured secret and expire after one day
//! - Passcodes allow five wrong guesses and expire after ten minutes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{routing::post, Router};
//! use teamhub::backend::auth::{create_account, login};
//! use teamhub::backend::server::state::AppState;
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/auth/createaccount", post(create_account))
//!     .route("/auth/login", post(login));
//! ```

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// One-time passcodes
pub mod otp;

/// Passcode mail delivery
pub mod mailer;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{
    check_account, create_account, generate_otp, get_all_user_emails, get_me, login, resend_otp,
    reset_password, verify_otp,
};
pub use mailer::Mailer;
pub use otp::OtpStore;
pub use users::{Department, Role, User};
