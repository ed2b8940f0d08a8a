// Ports onto the hosted backing store.
//
// Every write returns the full persisted row so callers can keep their
// in-memory views current without a follow-up read. Every write also appends
// one entry to the audit trail; that happens inside the store, not in callers.

use crate::modules::attendance::core::attendance_record::{
    AttendanceRecord, AttendanceStatus, NewAttendanceRecord,
};
use crate::modules::attendance::core::student::{Student, StudentDraft};
use crate::shared::core::primitives::CanonicalDate;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const STUDENTS_TABLE: &str = "students";
pub const ATTENDANCE_TABLE: &str = "attendance_records";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("{table} row {id} not found")]
    NotFound { table: &'static str, id: String },

    #[error("{table} already has a row for {key}")]
    UniqueViolation { table: &'static str, key: String },
}

#[async_trait]
pub trait StudentTable: Send + Sync {
    /// Ordered by creation.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
    async fn insert_student(&self, draft: StudentDraft) -> Result<Student, StoreError>;
    async fn update_student(&self, id: &str, draft: StudentDraft) -> Result<Student, StoreError>;
    async fn delete_student(&self, id: &str) -> Result<Student, StoreError>;
}

#[async_trait]
pub trait AttendanceTable: Send + Sync {
    async fn select_by_date(&self, date: CanonicalDate) -> Result<Vec<AttendanceRecord>, StoreError>;

    async fn find_one(
        &self,
        student_id: &str,
        date: CanonicalDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn insert_one(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError>;

    /// Touches `status` and `marked_at` only.
    async fn update_status(
        &self,
        id: &str,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, StoreError>;

    /// Insert, or update the status of the row already holding
    /// (student_id, date), as one conditional write.
    async fn upsert_on_conflict(
        &self,
        record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError>;

    async fn delete_one(&self, id: &str) -> Result<AttendanceRecord, StoreError>;
}

/// Bounds a single store call. Expiry is reported as [`StoreError::Timeout`].
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(deadline)),
    }
}
