// In memory stand-in for the hosted backing store.
//
// Keeps `students` and `attendance_records` in insertion order and writes an
// audit entry for each insert, update and delete before committing the row, so
// a failed audit append leaves the table untouched.

use crate::modules::attendance::adapters::outbound::backing_store::{
    ATTENDANCE_TABLE, AttendanceTable, STUDENTS_TABLE, StoreError, StudentTable,
};
use crate::modules::attendance::core::attendance_record::{
    AttendanceRecord, AttendanceStatus, NewAttendanceRecord,
};
use crate::modules::attendance::core::student::{Student, StudentDraft};
use crate::shared::core::primitives::{CanonicalDate, new_id, now_millis};
use crate::shared::infrastructure::audit_log::{AuditAction, AuditChange, AuditLog};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

pub struct InMemoryBackingStore {
    students: RwLock<Vec<Student>>,
    attendance: RwLock<Vec<AttendanceRecord>>,
    audit: Arc<dyn AuditLog>,
    delay_ms: AtomicU64,
    unique_attendance: bool,
    is_offline: bool,
}

impl InMemoryBackingStore {
    pub fn new(audit: Arc<dyn AuditLog>) -> Self {
        Self {
            students: RwLock::new(Vec::new()),
            attendance: RwLock::new(Vec::new()),
            audit,
            delay_ms: AtomicU64::new(0),
            unique_attendance: true,
            is_offline: false,
        }
    }

    /// Drops the (student_id, date) unique constraint, reproducing a schema
    /// that does not enforce it.
    pub fn without_attendance_unique_constraint(mut self) -> Self {
        self.unique_attendance = false;
        self
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Latency added before every call.
    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn attendance_rows(&self) -> Vec<AttendanceRecord> {
        self.attendance.read().await.clone()
    }

    async fn round_trip(&self) -> Result<(), StoreError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.is_offline {
            return Err(StoreError::Backend("Backing store offline".into()));
        }
        Ok(())
    }

    async fn record_audit<T: Serialize>(
        &self,
        table_name: &str,
        action: AuditAction,
        record_id: &str,
        old: Option<&T>,
        new: Option<&T>,
    ) -> Result<(), StoreError> {
        let change = AuditChange {
            table_name: table_name.to_string(),
            action,
            record_id: record_id.to_string(),
            old_data: old.map(to_json).transpose()?,
            new_data: new.map(to_json).transpose()?,
        };
        self.audit
            .append(change)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    fn new_attendance_row(record: NewAttendanceRecord) -> AttendanceRecord {
        let now = now_millis();
        AttendanceRecord {
            id: new_id(),
            student_id: record.student_id,
            date: record.date,
            status: record.status,
            marked_at: now,
            created_at: now,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Backend(e.to_string()))
}

fn attendance_key(student_id: &str, date: CanonicalDate) -> String {
    format!("({student_id}, {date})")
}

#[async_trait::async_trait]
impl StudentTable for InMemoryBackingStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        self.round_trip().await?;
        Ok(self.students.read().await.clone())
    }

    async fn insert_student(&self, draft: StudentDraft) -> Result<Student, StoreError> {
        self.round_trip().await?;
        let mut students = self.students.write().await;
        if students.iter().any(|s| s.roll_number == draft.roll_number) {
            return Err(StoreError::UniqueViolation {
                table: STUDENTS_TABLE,
                key: draft.roll_number,
            });
        }
        let now = now_millis();
        let student = Student {
            id: new_id(),
            roll_number: draft.roll_number,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            created_at: now,
            updated_at: now,
        };
        self.record_audit(STUDENTS_TABLE, AuditAction::Insert, &student.id, None, Some(&student))
            .await?;
        students.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, id: &str, draft: StudentDraft) -> Result<Student, StoreError> {
        self.round_trip().await?;
        let mut students = self.students.write().await;
        if students
            .iter()
            .any(|s| s.id != id && s.roll_number == draft.roll_number)
        {
            return Err(StoreError::UniqueViolation {
                table: STUDENTS_TABLE,
                key: draft.roll_number,
            });
        }
        let index = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound {
                table: STUDENTS_TABLE,
                id: id.to_string(),
            })?;
        let before = students[index].clone();
        let after = Student {
            roll_number: draft.roll_number,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            updated_at: now_millis(),
            ..before.clone()
        };
        self.record_audit(STUDENTS_TABLE, AuditAction::Update, id, Some(&before), Some(&after))
            .await?;
        students[index] = after.clone();
        Ok(after)
    }

    async fn delete_student(&self, id: &str) -> Result<Student, StoreError> {
        self.round_trip().await?;
        let mut students = self.students.write().await;
        let index = students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound {
                table: STUDENTS_TABLE,
                id: id.to_string(),
            })?;
        self.record_audit(STUDENTS_TABLE, AuditAction::Delete, id, Some(&students[index]), None)
            .await?;
        Ok(students.remove(index))
    }
}

#[async_trait::async_trait]
impl AttendanceTable for InMemoryBackingStore {
    async fn select_by_date(&self, date: CanonicalDate) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.round_trip().await?;
        Ok(self
            .attendance
            .read()
            .await
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect())
    }

    async fn find_one(
        &self,
        student_id: &str,
        date: CanonicalDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.round_trip().await?;
        Ok(self
            .attendance
            .read()
            .await
            .iter()
            .find(|r| r.student_id == student_id && r.date == date)
            .cloned())
    }

    async fn insert_one(&self, record: NewAttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        self.round_trip().await?;
        let mut rows = self.attendance.write().await;
        if self.unique_attendance
            && rows
                .iter()
                .any(|r| r.student_id == record.student_id && r.date == record.date)
        {
            return Err(StoreError::UniqueViolation {
                table: ATTENDANCE_TABLE,
                key: attendance_key(&record.student_id, record.date),
            });
        }
        let row = Self::new_attendance_row(record);
        self.record_audit(ATTENDANCE_TABLE, AuditAction::Insert, &row.id, None, Some(&row))
            .await?;
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_status(
        &self,
        id: &str,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord, StoreError> {
        self.round_trip().await?;
        let mut rows = self.attendance.write().await;
        let index = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                table: ATTENDANCE_TABLE,
                id: id.to_string(),
            })?;
        let before = rows[index].clone();
        let after = AttendanceRecord {
            status,
            marked_at: now_millis(),
            ..before.clone()
        };
        self.record_audit(ATTENDANCE_TABLE, AuditAction::Update, id, Some(&before), Some(&after))
            .await?;
        rows[index] = after.clone();
        Ok(after)
    }

    async fn upsert_on_conflict(
        &self,
        record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        self.round_trip().await?;
        // One write lock spans the lookup and the write.
        let mut rows = self.attendance.write().await;
        match rows
            .iter()
            .position(|r| r.student_id == record.student_id && r.date == record.date)
        {
            Some(index) => {
                let before = rows[index].clone();
                let after = AttendanceRecord {
                    status: record.status,
                    marked_at: now_millis(),
                    ..before.clone()
                };
                self.record_audit(ATTENDANCE_TABLE, AuditAction::Update, &after.id, Some(&before), Some(&after))
                    .await?;
                rows[index] = after.clone();
                Ok(after)
            }
            None => {
                let row = Self::new_attendance_row(record);
                self.record_audit(ATTENDANCE_TABLE, AuditAction::Insert, &row.id, None, Some(&row))
                    .await?;
                rows.push(row.clone());
                Ok(row)
            }
        }
    }

    async fn delete_one(&self, id: &str) -> Result<AttendanceRecord, StoreError> {
        self.round_trip().await?;
        let mut rows = self.attendance.write().await;
        let index = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                table: ATTENDANCE_TABLE,
                id: id.to_string(),
            })?;
        self.record_audit(ATTENDANCE_TABLE, AuditAction::Delete, id, Some(&rows[index]), None)
            .await?;
        Ok(rows.remove(index))
    }
}
