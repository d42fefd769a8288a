//! Best-effort side effects of payroll transitions
//!
//! Nothing in here may fail the operation that triggered it: delivery errors
//! are logged and dropped.

pub use mailer::{deliver_best_effort, templates, Attachment, EmailConfig, LogMailer, Mail, MailError, Mailer, SmtpMailer};
pub use notification::{notify, Notice};

mod mailer;
mod notification;
