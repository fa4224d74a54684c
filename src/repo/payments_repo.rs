use crate::domain::payment::PaymentRecord;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-lifetime payment ledger. Starts empty on every boot.
#[derive(Clone, Default)]
pub struct PaymentsRepo {
    inner: Arc<RwLock<Vec<PaymentRecord>>>,
}

impl PaymentsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, record: PaymentRecord) {
        self.inner.write().await.push(record);
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<PaymentRecord> {
        self.inner.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// All records in insertion order.
    pub async fn list_all(&self) -> Vec<PaymentRecord> {
        self.inner.read().await.clone()
    }

    pub async fn delete_by_id(&self, id: Uuid) -> bool {
        let mut write = self.inner.write().await;
        let before = write.len();
        write.retain(|p| p.id != id);
        write.len() != before
    }

    pub async fn clear(&self) -> usize {
        let mut write = self.inner.write().await;
        let count = write.len();
        write.clear();
        count
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
