use crate::modules::attendance::use_cases::list_audit_logs::projection::AuditLogView;
use crate::shared::infrastructure::audit_log::{AuditLog, AuditLogError};
use std::sync::Arc;
use tracing::warn;

pub struct ListAuditLogsHandler {
    audit: Arc<dyn AuditLog>,
    default_limit: usize,
}

impl ListAuditLogsHandler {
    pub fn new(audit: Arc<dyn AuditLog>, default_limit: usize) -> Self {
        Self {
            audit,
            default_limit,
        }
    }

    /// Newest first. `None` falls back to the configured page size.
    pub async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<AuditLogView>, AuditLogError> {
        let limit = limit.unwrap_or(self.default_limit);
        let entries = self
            .audit
            .recent(limit)
            .await
            .inspect_err(|e| warn!(error = %e, "failed to read audit log"))?;
        Ok(entries.into_iter().map(AuditLogView::from).collect())
    }
}
