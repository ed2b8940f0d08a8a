use crate::modules::attendance::core::attendance_record::AttendanceStatus;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkAttendance {
    pub student_id: String,
    pub status: AttendanceStatus,
}

impl MarkAttendance {
    pub fn new(student_id: impl Into<String>, status: AttendanceStatus) -> Self {
        Self {
            student_id: student_id.into(),
            status,
        }
    }
}
