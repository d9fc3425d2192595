use std::fmt::Write as _;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use super::domain::StoredSubmission;
use crate::config::MailConfig;

pub const NOTIFICATION_SUBJECT: &str = "New Contact Form Submission";
const IMPLICIT_TLS_PORT: u16 = 465;

/// Outbound hook fired after a submission is stored. Implementations must
/// swallow their own failures and report them through [`NotifyOutcome`].
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &StoredSubmission) -> NotifyOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Skipped,
    Failed(String),
}

impl NotifyOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            NotifyOutcome::Sent => "sent",
            NotifyOutcome::Skipped => "skipped",
            NotifyOutcome::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("unable to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("mail relay error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Plain-text body describing a stored submission.
pub fn compose_body(submission: &StoredSubmission) -> String {
    let mut body = String::new();
    writeln!(body, "{NOTIFICATION_SUBJECT}").expect("write heading");
    writeln!(body).expect("write spacer");
    writeln!(body, "Name: {}", submission.name).expect("write name");
    writeln!(body, "Email: {}", submission.email).expect("write email");
    writeln!(body, "Phone: {}", submission.phone).expect("write phone");
    writeln!(body, "Reason: {}", submission.reason).expect("write reason");
    writeln!(
        body,
        "Date: {}",
        submission.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
    .expect("write date");
    body
}

struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

/// Sends submission notices through an SMTP relay. Inert when no mail
/// configuration is present.
pub struct SmtpNotifier {
    relay: Option<SmtpRelay>,
}

impl SmtpNotifier {
    pub fn disabled() -> Self {
        Self { relay: None }
    }

    pub fn from_config(config: Option<&MailConfig>) -> Result<Self, NotifyError> {
        let Some(config) = config else {
            return Ok(Self::disabled());
        };

        let sender: Mailbox = config.default_sender.parse()?;
        let recipient: Mailbox = config.recipient.parse()?;

        let builder = if !config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
        } else if config.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            relay: Some(SmtpRelay {
                transport,
                sender,
                recipient,
            }),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.relay.is_some()
    }

    async fn dispatch(
        relay: &SmtpRelay,
        submission: &StoredSubmission,
    ) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(relay.sender.clone())
            .to(relay.recipient.clone())
            .subject(NOTIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(compose_body(submission))?;

        relay.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, submission: &StoredSubmission) -> NotifyOutcome {
        let Some(relay) = &self.relay else {
            debug!(id = submission.id.0, "mail not configured; skipping notification");
            return NotifyOutcome::Skipped;
        };

        match Self::dispatch(relay, submission).await {
            Ok(()) => {
                debug!(id = submission.id.0, "submission notice sent");
                NotifyOutcome::Sent
            }
            Err(err) => {
                warn!(id = submission.id.0, error = %err, "submission notice failed");
                NotifyOutcome::Failed(err.to_string())
            }
        }
    }
}
