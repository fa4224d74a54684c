use crate::domain::format::format_timestamp;
use crate::domain::payment::{
    ErrorEnvelope, NormalizedInput, NotificationStatus, PaymentRecord, PaymentView, RawSubmission,
};
use crate::domain::validation::validate;
use crate::notify::{DeliveryOutcome, NotificationDispatcher};
use crate::repo::payments_repo::PaymentsRepo;
use crate::sheets::SheetSync;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub type ServiceError = (StatusCode, ErrorEnvelope);

#[derive(Clone)]
pub struct PaymentService {
    pub payments_repo: PaymentsRepo,
    pub notifier: NotificationDispatcher,
    pub sheet_sync: Arc<dyn SheetSync>,
    /// Treat failed email delivery as sent, so the spreadsheet row is still
    /// written.
    pub notify_fail_open: bool,
    pub success_page: String,
}

impl PaymentService {
    pub async fn submit(&self, raw: RawSubmission) -> Result<PaymentView, ServiceError> {
        let input = validate(raw).map_err(|errors| {
            debug!(?errors, "payment submission rejected");
            (StatusCode::BAD_REQUEST, ErrorEnvelope::validation(errors))
        })?;

        let mut record = build_record(input, Uuid::new_v4(), Utc::now());

        let outcome = self.notifier.notify(&record).await;
        let status = self.status_for(&outcome);
        record.notification_status = Some(status);
        self.payments_repo.append(record.clone()).await;

        if status == NotificationStatus::Sent {
            self.sheet_sync.append_row(&record).await.map_err(|e| {
                error!(
                    payment_id = %record.id,
                    sync = self.sheet_sync.name(),
                    error = %e,
                    "spreadsheet sync failed"
                );
                internal()
            })?;
        }

        info!(
            payment_id = %record.id,
            total = record.total_amount,
            notification = ?status,
            "payment recorded"
        );
        let redirect = format!("{}?id={}", self.success_page, record.id);
        Ok(PaymentView::new(record, Some(redirect)))
    }

    fn status_for(&self, outcome: &DeliveryOutcome) -> NotificationStatus {
        match outcome {
            DeliveryOutcome::Sent { .. } | DeliveryOutcome::Mocked => NotificationStatus::Sent,
            DeliveryOutcome::Failed(reason) if self.notify_fail_open => {
                warn!(%reason, "email failed, continuing as sent (fail-open)");
                NotificationStatus::Sent
            }
            DeliveryOutcome::Failed(_) => NotificationStatus::Failed,
        }
    }

    pub async fn get(&self, id: &str) -> Result<PaymentView, ServiceError> {
        let record = match Uuid::parse_str(id) {
            Ok(id) => self.payments_repo.find_by_id(id).await,
            Err(_) => None,
        };
        record
            .map(|r| PaymentView::new(r, None))
            .ok_or_else(not_found)
    }

    pub async fn list(&self) -> Vec<PaymentView> {
        self.payments_repo
            .list_all()
            .await
            .into_iter()
            .map(|r| PaymentView::new(r, None))
            .collect()
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let removed = match Uuid::parse_str(id) {
            Ok(id) => self.payments_repo.delete_by_id(id).await,
            Err(_) => false,
        };
        if removed {
            info!(payment_id = %id, "payment deleted");
            Ok(())
        } else {
            Err(not_found())
        }
    }

    pub async fn clear(&self) -> usize {
        let count = self.payments_repo.clear().await;
        info!(count, "payments cleared");
        count
    }
}

/// Assembles the canonical record. The total is always computed here, never
/// taken from the client.
pub fn build_record(input: NormalizedInput, id: Uuid, now: DateTime<Utc>) -> PaymentRecord {
    PaymentRecord {
        id,
        total_amount: input.total_amount(),
        unique_code: input.unique_code_padded(),
        name: input.name,
        email: input.email,
        student_id: input.student_id,
        program: input.program,
        semester: input.semester,
        base_amount: input.base_amount,
        timestamp: format_timestamp(now),
        notification_status: None,
    }
}

fn not_found() -> ServiceError {
    (
        StatusCode::NOT_FOUND,
        ErrorEnvelope::message("Data pembayaran tidak ditemukan"),
    )
}

fn internal() -> ServiceError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorEnvelope::message("Kesalahan server"),
    )
}
