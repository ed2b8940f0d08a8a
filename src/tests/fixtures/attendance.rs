use crate::modules::attendance::adapters::outbound::backing_store_in_memory::InMemoryBackingStore;
use crate::modules::attendance::core::attendance_record::{AttendanceRecord, AttendanceStatus};
use crate::shared::core::primitives::CanonicalDate;
use crate::shared::infrastructure::audit_log::in_memory::InMemoryAuditLog;
use std::sync::Arc;

pub fn day(value: &str) -> CanonicalDate {
    CanonicalDate::parse(value).unwrap()
}

pub fn make_backing_store() -> (Arc<InMemoryAuditLog>, Arc<InMemoryBackingStore>) {
    let audit = Arc::new(InMemoryAuditLog::new());
    let store = Arc::new(InMemoryBackingStore::new(audit.clone()));
    (audit, store)
}

pub fn make_record(
    id: &str,
    student_id: &str,
    date: &str,
    status: AttendanceStatus,
) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        student_id: student_id.to_string(),
        date: day(date),
        status,
        marked_at: 1_700_000_000_000,
        created_at: 1_700_000_000_000,
    }
}
