pub mod in_memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditLogError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Insert => "INSERT",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

/// What a write hands to the trail. `old_data` is absent for inserts,
/// `new_data` for deletes.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditChange {
    pub table_name: String,
    pub action: AuditAction,
    pub record_id: String,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub table_name: String,
    pub action: AuditAction,
    pub record_id: String,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub created_at: i64,
}

/// Every write to a tracked table appends exactly one entry.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, change: AuditChange) -> Result<AuditEntry, AuditLogError>;

    /// Newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>, AuditLogError>;
}
