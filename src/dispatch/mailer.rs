use std::env;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment as MimeAttachment, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "HRM System <noreply@hrm.local>";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("email address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("email build error: {0}")]
    Build(String),
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// `None` when `SMTP_HOST` is unset, meaning emails are only logged
    pub fn from_env() -> Option<Self> {
        let smtp_host = env::var("SMTP_HOST").ok()?;

        Some(Self {
            smtp_host,
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_owned()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachment: Option<Attachment>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: Mail) -> Result<(), MailError>;
}

/// Delivers over SMTP with STARTTLS
pub struct SmtpMailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(password)) = (config.smtp_user, config.smtp_password) {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Ok(Self {
            from_address: config.from_address,
            transport: builder.build(),
        })
    }

    fn build(&self, mail: Mail) -> Result<Message, MailError> {
        let builder = Message::builder()
            .from(self.from_address.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject);

        let message = match mail.attachment {
            Some(attachment) => {
                let content_type = ContentType::parse(attachment.content_type)
                    .map_err(|err| MailError::Build(err.to_string()))?;

                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::html(mail.html))
                        .singlepart(MimeAttachment::new(attachment.filename).body(attachment.bytes, content_type))
                )
            }
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(mail.html),
        };

        message.map_err(|err| MailError::Build(err.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        let to = mail.to.clone();
        let message = self.build(mail)?;

        self.transport.send(message).await?;
        tracing::info!(to = %to, "email sent");

        Ok(())
    }
}

/// Used when no SMTP server is configured
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            attachment = ?mail.attachment.as_ref().map(|a| &a.filename),
            "email delivery disabled, not sending"
        );

        Ok(())
    }
}

pub async fn deliver_best_effort(mailer: &dyn Mailer, mail: Mail) {
    let to = mail.to.clone();

    if let Err(err) = mailer.send(mail).await {
        tracing::warn!(to = %to, error = %err, "unable to deliver email");
    }
}

pub mod templates {
    pub fn payroll_generated(name: &str, month: i32, year: i32) -> String {
        format!(
            "<h2>Payroll Generated</h2>\
             <p>Hello {name},</p>\
             <p>Your payroll for {month}/{year} has been generated.</p>\
             <p>Your payslip is attached to this email.</p>"
        )
    }
}
