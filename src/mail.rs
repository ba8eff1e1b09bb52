//! Digest delivery over SMTP.
//!
//! Messages are submitted to a fixed relay with STARTTLS. Delivery is
//! attempted once; callers log the failure and carry on.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, instrument};

pub const SMTP_RELAY: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("missing email configuration: {0}")]
    MissingConfig(String),
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sender, receiver and credential for the relay.
#[derive(Clone)]
pub struct MailSettings {
    pub sender: String,
    pub receiver: String,
    password: String,
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl MailSettings {
    /// Build settings from optional values, naming every missing variable.
    pub fn from_parts(
        sender: Option<String>,
        receiver: Option<String>,
        password: Option<String>,
    ) -> Result<Self, MailError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let missing: Vec<&str> = [
            ("EMAIL_SENDER", present(&sender)),
            ("EMAIL_RECEIVER", present(&receiver)),
            ("EMAIL_PASSWORD", present(&password)),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect();

        match (sender, receiver, password) {
            (Some(sender), Some(receiver), Some(password)) if missing.is_empty() => Ok(Self {
                sender,
                receiver,
                password,
            }),
            _ => Err(MailError::MissingConfig(missing.join(", "))),
        }
    }
}

/// Build the HTML message without sending it.
pub fn build_message(subject: &str, html: &str, settings: &MailSettings) -> Result<Message, MailError> {
    Ok(Message::builder()
        .from(settings.sender.parse()?)
        .to(settings.receiver.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html.to_string())?)
}

/// Send the digest through the relay.
///
/// Connects to [`SMTP_RELAY`] on [`SMTP_PORT`], upgrades with STARTTLS and
/// authenticates as the sender.
///
/// # Arguments
///
/// * `subject` - Subject line, see [`crate::outputs::html::subject`]
/// * `html` - Rendered HTML body
/// * `settings` - Sender, receiver and app password
///
/// # Returns
///
/// `Ok(())` once the relay accepts the message, or a [`MailError`] if the
/// message cannot be built or the relay rejects it.
#[instrument(level = "info", skip(html, settings), fields(receiver = %settings.receiver))]
pub async fn send_digest(subject: &str, html: &str, settings: &MailSettings) -> Result<(), MailError> {
    let t0 = Instant::now();
    let message = build_message(subject, html, settings)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_RELAY)?
        .port(SMTP_PORT)
        .credentials(Credentials::new(
            settings.sender.clone(),
            settings.password.clone(),
        ))
        .build();

    mailer.send(message).await?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "Email sent");
    Ok(())
}
