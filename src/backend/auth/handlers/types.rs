/**
 * Authentication Handler Types
 *
 * Request bodies arrive with every field optional and are validated into
 * the typed requests below. Response bodies are shared by the handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{Department, Role, User};
use crate::shared::validation::{FieldErrors, Validate, Validated};

/// Shortest accepted password
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Passcode length
pub const OTP_DIGITS: usize = 6;

/// Body of `POST /auth/createaccount`
#[derive(Debug, Default, Deserialize)]
pub struct CreateAccountRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub department: Option<String>,
    pub skills: Option<Vec<String>>,
    pub role: Option<String>,
}

/// A validated registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub department: Option<Department>,
    pub skills: Vec<String>,
    pub role: Role,
}

impl Validate for CreateAccountRequest {
    type Output = NewAccount;

    fn validate(self) -> Validated<NewAccount> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", self.username.as_deref(), "Username is required");
        let email = errors.email("email", self.email.as_deref());
        let password = errors.password("password", self.password.as_deref(), MIN_PASSWORD_CHARS);

        let department = match self.department.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => {
                let parsed = Department::parse(value);
                if parsed.is_none() {
                    errors.push("department", "Invalid department");
                }
                parsed
            }
        };

        let role = match self.role.as_deref() {
            None => Role::default(),
            Some(value) => Role::parse(value).unwrap_or_else(|| {
                errors.push("role", "Role must be student, admin or faculty");
                Role::default()
            }),
        };

        let skills: Vec<String> = self
            .skills
            .unwrap_or_default()
            .into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect();

        errors.finish(|| NewAccount {
            username: username.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
            department,
            skills,
            role,
        })
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated login credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    type Output = Credentials;

    fn validate(self) -> Validated<Credentials> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        let password = match self.password {
            Some(password) if !password.is_empty() => Some(password),
            _ => {
                errors.push("password", "Password is required");
                None
            }
        };
        errors.finish(|| Credentials {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

/// Body carrying only an email: checkaccount, generateotp, resendotp
#[derive(Debug, Default, Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

impl Validate for EmailRequest {
    type Output = String;

    fn validate(self) -> Validated<String> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        errors.finish(|| email.unwrap_or_default())
    }
}

/// Body of `POST /auth/verifyotp`
///
/// The code may arrive as a JSON string or number.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSubmission {
    pub email: String,
    pub otp: String,
}

impl Validate for VerifyOtpRequest {
    type Output = OtpSubmission;

    fn validate(self) -> Validated<OtpSubmission> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        let otp = match self.otp {
            Some(serde_json::Value::String(code)) => Some(code.trim().to_string()),
            Some(serde_json::Value::Number(code)) => Some(code.to_string()),
            _ => None,
        }
        .filter(|code| code.len() == OTP_DIGITS && code.chars().all(|c| c.is_ascii_digit()));
        if otp.is_none() {
            errors.push("otp", "OTP must be 6 digits");
        }
        errors.finish(|| OtpSubmission {
            email: email.unwrap_or_default(),
            otp: otp.unwrap_or_default(),
        })
    }
}

/// Body of `POST /auth/resetpassword`
#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for ResetPasswordRequest {
    type Output = Credentials;

    fn validate(self) -> Validated<Credentials> {
        let mut errors = FieldErrors::new();
        let email = errors.email("email", self.email.as_deref());
        let password = errors.password("password", self.password.as_deref(), MIN_PASSWORD_CHARS);
        errors.finish(|| Credentials {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

/// Returned by createaccount
#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub message: String,
    pub user: User,
}

/// Returned by login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
