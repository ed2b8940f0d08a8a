use crate::modules::attendance::core::attendance_record::{AttendanceRecord, AttendanceStatus};
use crate::shared::core::primitives::CanonicalDate;
use serde::Serialize;

/// Records for exactly one date, in the order the backing store returned them
/// followed by anything marked since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSnapshot {
    date: CanonicalDate,
    records: Vec<AttendanceRecord>,
}

impl AttendanceSnapshot {
    pub fn empty(date: CanonicalDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    /// Keeps only records for `date`.
    pub fn new(date: CanonicalDate, records: Vec<AttendanceRecord>) -> Self {
        Self {
            date,
            records: records.into_iter().filter(|r| r.date == date).collect(),
        }
    }

    pub fn date(&self) -> CanonicalDate {
        self.date
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_student(&self, student_id: &str) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.student_id == student_id)
    }

    pub fn status_of(&self, student_id: &str) -> Option<AttendanceStatus> {
        self.find_by_student(student_id).map(|r| r.status)
    }

    /// Replaces the record with the same id, or appends it. Returns `false` and
    /// leaves the snapshot alone when the record belongs to another date.
    pub fn upsert(&mut self, record: AttendanceRecord) -> bool {
        if record.date != self.date {
            return false;
        }
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        true
    }

    pub fn summary(&self, total_students: usize) -> AttendanceSummary {
        let count = |status: AttendanceStatus| {
            self.records.iter().filter(|r| r.status == status).count()
        };
        let present = count(AttendanceStatus::Present);
        let late = count(AttendanceStatus::Late);
        let absent = count(AttendanceStatus::Absent);
        AttendanceSummary {
            date: self.date,
            total_students,
            present,
            late,
            absent,
            unmarked: total_students.saturating_sub(present + late + absent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub date: CanonicalDate,
    pub total_students: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    pub unmarked: usize,
}
