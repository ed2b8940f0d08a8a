use crate::shared::core::primitives::{new_id, now_millis};
use crate::shared::infrastructure::audit_log::{AuditChange, AuditEntry, AuditLog, AuditLogError};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
    is_offline: bool,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, change: AuditChange) -> Result<AuditEntry, AuditLogError> {
        if self.is_offline {
            return Err(AuditLogError::Backend("Audit log offline".into()));
        }

        let entry = AuditEntry {
            id: new_id(),
            table_name: change.table_name,
            action: change.action,
            record_id: change.record_id,
            old_data: change.old_data,
            new_data: change.new_data,
            created_at: now_millis(),
        };
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditLogError> {
        if self.is_offline {
            return Err(AuditLogError::Backend("Audit log offline".into()));
        }

        // Insertion order is creation order, so reversing gives newest first
        // even when two entries share a millisecond.
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}
