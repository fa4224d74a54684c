use crate::notify::{DeliveryOutcome, MailError, Mailer, OutgoingMail};
use tracing::debug;

/// Log-only mailer used when no SMTP credentials are configured.
pub struct LogMailer;

#[async_trait::async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryOutcome, MailError> {
        debug!(to = %mail.to, subject = %mail.subject, bytes = mail.html.len(), "skipping smtp delivery");
        Ok(DeliveryOutcome::Mocked)
    }
}
