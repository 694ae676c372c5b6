//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers under `/auth`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - Account creation
//! ├── login.rs    - Credential check and token issue
//! ├── recovery.rs - Passcode-based password reset
//! └── me.rs       - Current user and email directory
//! ```
//!
//! # Handlers
//!
//! - **`create_account`** - POST /auth/createaccount
//! - **`login`** - POST /auth/login
//! - **`check_account`** - POST /auth/checkaccount
//! - **`generate_otp`** / **`resend_otp`** - POST /auth/generateotp, /auth/resendotp
//! - **`verify_otp`** - POST /auth/verifyotp
//! - **`reset_password`** - POST /auth/resetpassword
//! - **`get_all_user_emails`** - GET /auth/emails
//! - **`get_me`** - GET /auth/me (bearer token)

/// Request and response types
pub mod types;

/// Account creation handler
pub mod signup;

/// Login handler
pub mod login;

/// Password recovery handlers
pub mod recovery;

/// Current user handler
pub mod me;

pub use types::{CreateAccountResponse, LoginResponse};

pub use login::login;
pub use me::{get_all_user_emails, get_me};
pub use recovery::{check_account, generate_otp, resend_otp, reset_password, verify_otp};
pub use signup::create_account;
