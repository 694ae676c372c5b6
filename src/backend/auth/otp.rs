/**
 * One-Time Passcodes
 *
 * Process-local store of password-reset passcodes, keyed by email.
 *
 * # Lifecycle
 *
 * 1. `issue` creates a fresh 6-digit code, replacing any earlier one
 * 2. `verify` checks it; a wrong guess costs one of five attempts
 * 3. A successful verify consumes the code and leaves a reset grant
 * 4. `take_reset_grant` consumes the grant when the password is changed
 *
 * Codes and grants expire after the configured TTL. They do not survive a
 * restart.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;

/// Wrong guesses allowed before a code is invalidated
pub const MAX_ATTEMPTS: u32 = 5;

/// Passcode errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP expired or not generated")]
    Missing,

    #[error("OTP has expired")]
    Expired,

    #[error("Invalid OTP")]
    Mismatch { remaining: u32 },

    #[error("Too many invalid attempts, request a new OTP")]
    Exhausted,

    #[error("Passcode store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone)]
struct OtpEntry {
    code: String,
    expires_at: Instant,
    attempts: u32,
}

#[derive(Debug, Default)]
struct Inner {
    codes: HashMap<String, OtpEntry>,
    grants: HashMap<String, Instant>,
}

/// Shared passcode store
#[derive(Debug, Clone)]
pub struct OtpStore {
    inner: Arc<Mutex<Inner>>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, OtpError> {
        self.inner.lock().map_err(|_| OtpError::Poisoned)
    }

    /// Generate and store a new code for `email`
    pub fn issue(&self, email: &str) -> Result<String, OtpError> {
        let code = rand::thread_rng().gen_range(100_000..1_000_000).to_string();
        let entry = OtpEntry {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
            attempts: 0,
        };
        let mut inner = self.lock()?;
        inner.codes.insert(email.to_string(), entry);
        inner.grants.remove(email);
        Ok(code)
    }

    /// Check a submitted code
    ///
    /// On success the code is consumed and a reset grant is recorded.
    pub fn verify(&self, email: &str, code: &str) -> Result<(), OtpError> {
        let now = Instant::now();
        let mut inner = self.lock()?;
        let entry = inner.codes.get_mut(email).ok_or(OtpError::Missing)?;

        if now >= entry.expires_at {
            inner.codes.remove(email);
            return Err(OtpError::Expired);
        }
        if entry.code != code.trim() {
            entry.attempts += 1;
            if entry.attempts >= MAX_ATTEMPTS {
                inner.codes.remove(email);
                return Err(OtpError::Exhausted);
            }
            return Err(OtpError::Mismatch {
                remaining: MAX_ATTEMPTS - entry.attempts,
            });
        }

        inner.codes.remove(email);
        inner.grants.insert(email.to_string(), now + self.ttl);
        Ok(())
    }

    /// Consume the reset grant left by a successful verification
    pub fn take_reset_grant(&self, email: &str) -> Result<bool, OtpError> {
        let grant = self.lock()?.grants.remove(email);
        Ok(grant.is_some_and(|expires_at| Instant::now() < expires_at))
    }

    /// Drop expired codes and grants, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let Ok(mut inner) = self.lock() else {
            return 0;
        };
        let before = inner.codes.len() + inner.grants.len();
        inner.codes.retain(|_, entry| now < entry.expires_at);
        inner.grants.retain(|_, expires_at| now < *expires_at);
        before - (inner.codes.len() + inner.grants.len())
    }

    /// The outstanding code for `email`, if any
    pub fn current_code(&self, email: &str) -> Option<String> {
        self.lock()
            .ok()?
            .codes
            .get(email)
            .map(|entry| entry.code.clone())
    }
}
