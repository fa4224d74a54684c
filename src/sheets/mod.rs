use crate::domain::payment::PaymentRecord;
use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

pub mod credentials;
pub mod google;

/// Spreadsheet row for a record: name, student id, semester, email, program,
/// base amount, unique code, timestamp.
pub fn sheet_row(record: &PaymentRecord) -> Vec<Value> {
    vec![
        json!(record.name),
        json!(record.student_id),
        json!(record.semester),
        json!(record.email),
        json!(record.program),
        json!(record.base_amount),
        json!(record.unique_code),
        json!(record.timestamp),
    ]
}

#[async_trait::async_trait]
pub trait SheetSync: Send + Sync {
    fn name(&self) -> &'static str;

    async fn append_row(&self, record: &PaymentRecord) -> Result<()>;
}

/// Used when no spreadsheet is configured.
pub struct DisabledSheetSync;

#[async_trait::async_trait]
impl SheetSync for DisabledSheetSync {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn append_row(&self, record: &PaymentRecord) -> Result<()> {
        debug!(payment_id = %record.id, "spreadsheet sync disabled, row skipped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn row_column_order() {
        let record = PaymentRecord {
            id: Uuid::new_v4(),
            name: "Budi".to_string(),
            email: "budi@example.com".to_string(),
            student_id: "2021001".to_string(),
            program: "Informatika".to_string(),
            semester: 3,
            unique_code: "007".to_string(),
            base_amount: 1_500_000,
            total_amount: 1_500_007,
            timestamp: "19 Okt 2026, 14.05".to_string(),
            notification_status: None,
        };
        assert_eq!(
            Value::Array(sheet_row(&record)),
            json!([
                "Budi",
                "2021001",
                3,
                "budi@example.com",
                "Informatika",
                1500000,
                "007",
                "19 Okt 2026, 14.05"
            ])
        );
    }
}
