#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tuition_payments::domain::payment::{PaymentRecord, RawSubmission};
use tuition_payments::notify::mock::LogMailer;
use tuition_payments::notify::{DeliveryOutcome, MailError, Mailer, NotificationDispatcher, OutgoingMail};
use tuition_payments::repo::payments_repo::PaymentsRepo;
use tuition_payments::service::payment_service::PaymentService;
use tuition_payments::sheets::SheetSync;

pub struct UnreachableMailer;

#[async_trait::async_trait]
impl Mailer for UnreachableMailer {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn deliver(&self, _mail: &OutgoingMail) -> Result<DeliveryOutcome, MailError> {
        Err(MailError::Unreachable)
    }
}

#[derive(Default)]
pub struct CapturingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
}

#[async_trait::async_trait]
impl Mailer for CapturingMailer {
    fn name(&self) -> &'static str {
        "capturing"
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<DeliveryOutcome, MailError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(DeliveryOutcome::Sent {
            message_id: Some("250 OK".to_string()),
        })
    }
}

/// Records how many payments the store held while each email was sent.
pub struct StoreWatchingMailer {
    pub repo: PaymentsRepo,
    pub seen: Mutex<Vec<usize>>,
}

impl StoreWatchingMailer {
    pub fn new(repo: PaymentsRepo) -> Self {
        Self {
            repo,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Mailer for StoreWatchingMailer {
    fn name(&self) -> &'static str {
        "store_watching"
    }

    async fn deliver(&self, _mail: &OutgoingMail) -> Result<DeliveryOutcome, MailError> {
        let held = self.repo.len().await;
        self.seen.lock().unwrap().push(held);
        Ok(DeliveryOutcome::Mocked)
    }
}

#[derive(Default)]
pub struct RecordingSheets {
    pub rows: Mutex<Vec<PaymentRecord>>,
}

#[async_trait::async_trait]
impl SheetSync for RecordingSheets {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn append_row(&self, record: &PaymentRecord) -> anyhow::Result<()> {
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub struct BrokenSheets;

#[async_trait::async_trait]
impl SheetSync for BrokenSheets {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn append_row(&self, _record: &PaymentRecord) -> anyhow::Result<()> {
        anyhow::bail!("quota exceeded")
    }
}

pub fn service(mailer: Arc<dyn Mailer>, sheets: Arc<dyn SheetSync>, fail_open: bool) -> PaymentService {
    service_with_repo(PaymentsRepo::new(), mailer, sheets, fail_open)
}

pub fn service_with_repo(
    repo: PaymentsRepo,
    mailer: Arc<dyn Mailer>,
    sheets: Arc<dyn SheetSync>,
    fail_open: bool,
) -> PaymentService {
    PaymentService {
        payments_repo: repo,
        notifier: NotificationDispatcher::new(mailer),
        sheet_sync: sheets,
        notify_fail_open: fail_open,
        success_page: "/success.html".to_string(),
    }
}

pub fn mock_service(sheets: Arc<dyn SheetSync>) -> PaymentService {
    service(Arc::new(LogMailer), sheets, false)
}

pub fn submission(base_amount: &str, code: &str) -> RawSubmission {
    RawSubmission {
        name: Some("Budi Santoso".into()),
        email: Some("budi@example.com".into()),
        student_id: Some("2021001".into()),
        program: Some("Informatika".into()),
        semester: Some("3".into()),
        unique_code: Some(code.into()),
        base_amount: Some(base_amount.into()),
    }
}
