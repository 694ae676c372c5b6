/**
 * Outbound Mail Delivery
 *
 * Sends passcode emails through an SMTP relay with `lettre`. When no relay
 * is configured the mailer is disabled and deliveries are only logged, so a
 * development server still completes the recovery flow.
 */

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::backend::server::config::SmtpConfig;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Outcome of a delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// SMTP is not configured; the message was dropped
    Skipped,
}

/// Passcode mailer
#[derive(Clone)]
pub enum Mailer {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    Disabled,
}

impl Mailer {
    /// Build the mailer from configuration
    ///
    /// An invalid relay or sender address disables delivery instead of
    /// failing startup.
    pub fn from_config(smtp: Option<&SmtpConfig>) -> Self {
        let Some(smtp) = smtp else {
            return Self::Disabled;
        };
        match Self::smtp(smtp) {
            Ok(mailer) => {
                tracing::info!("[Mail] SMTP relay {}:{} configured", smtp.host, smtp.port);
                mailer
            }
            Err(e) => {
                tracing::error!("[Mail] Invalid SMTP configuration: {}", e);
                tracing::warn!("[Mail] Passcode delivery disabled");
                Self::Disabled
            }
        }
    }

    fn smtp(smtp: &SmtpConfig) -> Result<Self, MailerError> {
        let from: Mailbox = smtp.from.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.username.clone(), smtp.password.clone()))
            .build();
        Ok(Self::Smtp { transport, from })
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Smtp { .. })
    }

    /// Send a plain-text email
    pub async fn send(&self, to: &str, subject: &str, body: String) -> Result<Delivery, MailerError> {
        match self {
            Self::Disabled => {
                tracing::info!("[Mail] Delivery disabled, dropping \"{}\" for {}", subject, to);
                Ok(Delivery::Skipped)
            }
            Self::Smtp { transport, from } => {
                let message = Message::builder()
                    .from(from.clone())
                    .to(to.parse()?)
                    .subject(subject)
                    .header(ContentType::TEXT_PLAIN)
                    .body(body)?;
                transport.send(message).await?;
                tracing::info!("[Mail] Sent \"{}\" to {}", subject, to);
                Ok(Delivery::Sent)
            }
        }
    }

    /// Send a passcode email
    pub async fn send_passcode(&self, to: &str, code: &str, resend: bool) -> Result<Delivery, MailerError> {
        let (subject, body) = if resend {
            (
                "Resend OTP - Verification Code",
                format!("Your new OTP code is: {code}. It is valid for 10 minutes."),
            )
        } else {
            (
                "Password Reset OTP",
                format!("Your OTP code is: {code}. It is valid for 10 minutes."),
            )
        };
        self.send(to, subject, body).await
    }
}
