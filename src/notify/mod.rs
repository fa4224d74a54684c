use crate::domain::payment::PaymentRecord;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub mod mock;
pub mod smtp;
pub mod templates;

use templates::{render_html, render_text, summary_line, ConfirmationView};

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent { message_id: Option<String> },
    /// No transport configured; the confirmation was only logged.
    Mocked,
    Failed(String),
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("message build failed: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("smtp transport: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("smtp server rejected the connection check")]
    Unreachable,
}

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryOutcome, MailError>;
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    pub mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Renders and sends the confirmation for `record`. Transport errors are
    /// folded into `DeliveryOutcome::Failed`; this never returns an error.
    pub async fn notify(&self, record: &PaymentRecord) -> DeliveryOutcome {
        let view = ConfirmationView::from_record(record);
        let mail = OutgoingMail {
            to: record.email.clone(),
            subject: view.subject(),
            html: render_html(&view),
            text: render_text(&view),
        };

        match self.mailer.deliver(&mail).await {
            Ok(DeliveryOutcome::Mocked) => {
                info!(to = %mail.to, "mock confirmation: {}", summary_line(&view));
                DeliveryOutcome::Mocked
            }
            Ok(outcome) => {
                info!(
                    payment_id = %record.id,
                    to = %mail.to,
                    mailer = self.mailer.name(),
                    ?outcome,
                    "confirmation email delivered"
                );
                outcome
            }
            Err(e) => {
                warn!(payment_id = %record.id, to = %mail.to, error = %e, "confirmation email failed");
                info!(to = %mail.to, "mock confirmation: {}", summary_line(&view));
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }
}
