use crate::notify::{DeliveryOutcome, MailError, Mailer, OutgoingMail};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub const SENDER_NAME: &str = "Sistem Pembayaran Online";

pub struct SmtpMailer {
    pub from: Mailbox,
    pub transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// STARTTLS relay authenticated as `user`, which is also the sender address.
    /// The pooled transport needs a running Tokio runtime to be built or dropped.
    pub fn new(host: &str, port: u16, user: &str, password: &str) -> Result<Self, MailError> {
        let address: Address = user.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(Self {
            from: Mailbox::new(Some(SENDER_NAME.to_string()), address),
            transport,
        })
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryOutcome, MailError> {
        if !self.transport.test_connection().await? {
            return Err(MailError::Unreachable);
        }

        let to: Mailbox = mail.to.parse()?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                mail.text.clone(),
                mail.html.clone(),
            ))?;

        let response = self.transport.send(message).await?;
        Ok(DeliveryOutcome::Sent {
            message_id: response.first_line().map(ToString::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_sender() {
        let err = SmtpMailer::new("smtp.gmail.com", 587, "not-an-address", "secret").err();
        assert!(matches!(err, Some(MailError::Address(_))));
    }

    #[tokio::test]
    async fn builds_with_valid_sender() {
        let mailer = SmtpMailer::new("smtp.gmail.com", 587, "bendahara@example.ac.id", "secret").unwrap();
        assert_eq!(mailer.from.email.to_string(), "bendahara@example.ac.id");
        assert_eq!(mailer.from.name.as_deref(), Some(SENDER_NAME));
    }
}
