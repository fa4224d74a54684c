use crate::domain::format::rupiah;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single loosely-typed form value. Form posts deliver everything as text,
/// JSON clients may send numbers.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(serde_json::Value),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default, rename = "nama", alias = "name")]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub email: Option<FieldValue>,
    #[serde(default, rename = "nim", alias = "studentId")]
    pub student_id: Option<FieldValue>,
    #[serde(default, rename = "prodi", alias = "program")]
    pub program: Option<FieldValue>,
    #[serde(default)]
    pub semester: Option<FieldValue>,
    #[serde(default, rename = "kode_unik", alias = "uniqueCode")]
    pub unique_code: Option<FieldValue>,
    #[serde(default, rename = "jumlah_pembayaran", alias = "baseAmount")]
    pub base_amount: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub program: String,
    pub semester: u8,
    pub unique_code: u16,
    pub base_amount: i64,
}

impl NormalizedInput {
    pub fn unique_code_padded(&self) -> String {
        format!("{:03}", self.unique_code)
    }

    pub fn total_amount(&self) -> i64 {
        self.base_amount + i64::from(self.unique_code)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: Uuid,
    #[serde(rename = "nama")]
    pub name: String,
    pub email: String,
    #[serde(rename = "nim")]
    pub student_id: String,
    #[serde(rename = "prodi")]
    pub program: String,
    pub semester: u8,
    #[serde(rename = "kodeUnik")]
    pub unique_code: String,
    #[serde(rename = "jumlah_pembayaran")]
    pub base_amount: i64,
    #[serde(rename = "total_pembayaran")]
    pub total_amount: i64,
    pub timestamp: String,
    pub notification_status: Option<NotificationStatus>,
}

/// Record as returned over HTTP, with the display amounts attached.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub record: PaymentRecord,
    pub jumlah_pembayaran_formatted: String,
    pub total_pembayaran_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl PaymentView {
    pub fn new(record: PaymentRecord, redirect_url: Option<String>) -> Self {
        Self {
            jumlah_pembayaran_formatted: rupiah(record.base_amount),
            total_pembayaran_formatted: rupiah(record.total_amount),
            record,
            redirect_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorEnvelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: "Validasi gagal".to_string(),
            errors: Some(errors),
        }
    }
}
